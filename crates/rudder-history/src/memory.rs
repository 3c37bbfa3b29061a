//! In-process history backend.

use tracing::debug;

use crate::driver::HistoryDriver;

/// One session-history entry.
#[derive(Debug, Clone)]
struct Entry {
    path: String,
    hash: String,
}

/// An in-process [`HistoryDriver`] backed by an entry stack.
///
/// This is the driver used by the test suites and by non-browser hosts. It
/// models the parts of a session history the router cares about: pushes
/// truncate the forward tail, hash writes create entries of their own, and
/// traversal clamps at the stack bounds.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Entry>,
    cursor: usize,
    history_api: bool,
}

impl MemoryHistory {
    /// Creates a history positioned at `/` with history-API support.
    #[must_use]
    pub fn new() -> Self {
        Self::with_location("/")
    }

    /// Creates a history positioned at the given path.
    #[must_use]
    pub fn with_location(location: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                path: location.into(),
                hash: String::new(),
            }],
            cursor: 0,
            history_api: true,
        }
    }

    /// Creates a history that reports no history-API support, so mode
    /// detection falls back to hash navigation.
    #[must_use]
    pub fn hash_only() -> Self {
        Self {
            history_api: false,
            ..Self::new()
        }
    }

    /// Number of entries currently on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty. It never is; present for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current(&self) -> &Entry {
        &self.entries[self.cursor]
    }

    /// Drops every entry after the cursor, then appends and selects `entry`.
    fn append(&mut self, entry: Entry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryDriver for MemoryHistory {
    fn location(&self) -> String {
        self.current().path.clone()
    }

    fn hash(&self) -> String {
        self.current().hash.clone()
    }

    fn push(&mut self, location: &str) {
        debug!(location, "history push");
        self.append(Entry {
            path: location.to_string(),
            hash: String::new(),
        });
    }

    fn replace(&mut self, location: &str) {
        debug!(location, "history replace");
        self.entries[self.cursor].path = location.to_string();
    }

    fn set_hash(&mut self, hash: &str) {
        debug!(hash, "history hash write");
        let path = self.current().path.clone();
        self.append(Entry {
            path,
            hash: hash.to_string(),
        });
    }

    fn go(&mut self, delta: i64) {
        let last = self.entries.len() as i64 - 1;
        let target = (self.cursor as i64 + delta).clamp(0, last);
        debug!(delta, target, "history traversal");
        self.cursor = target as usize;
    }

    fn supports_history(&self) -> bool {
        self.history_api
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_traverse() {
        let mut history = MemoryHistory::new();
        history.push("/a");
        history.push("/b");
        assert_eq!(history.location(), "/b");

        history.go(-2);
        assert_eq!(history.location(), "/");
        history.go(1);
        assert_eq!(history.location(), "/a");
    }

    #[test]
    fn test_go_clamps_at_bounds() {
        let mut history = MemoryHistory::new();
        history.push("/a");
        history.go(-10);
        assert_eq!(history.location(), "/");
        history.go(10);
        assert_eq!(history.location(), "/a");
    }

    #[test]
    fn test_push_truncates_forward_tail() {
        let mut history = MemoryHistory::new();
        history.push("/a");
        history.push("/b");
        history.go(-2);
        history.push("/c");

        assert_eq!(history.len(), 2);
        assert_eq!(history.location(), "/c");
        history.go(1);
        assert_eq!(history.location(), "/c");
    }

    #[test]
    fn test_replace_overwrites_in_place() {
        let mut history = MemoryHistory::new();
        history.push("/a");
        history.replace("/b");
        assert_eq!(history.len(), 2);
        assert_eq!(history.location(), "/b");
    }

    #[test]
    fn test_hash_write_creates_entry() {
        let mut history = MemoryHistory::new();
        history.set_hash("/users/1");
        assert_eq!(history.len(), 2);
        assert_eq!(history.hash(), "/users/1");
        assert_eq!(history.location(), "/");

        history.go(-1);
        assert_eq!(history.hash(), "");
    }

    #[test]
    fn test_mode_detection() {
        use crate::driver::Mode;

        assert_eq!(Mode::detect(&MemoryHistory::new()), Mode::History);
        assert_eq!(Mode::detect(&MemoryHistory::hash_only()), Mode::Hash);
    }
}
