//! The history backend trait and navigation mode.

use serde::{Deserialize, Serialize};

/// How the router encodes the active location in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Locations live in the URL path and are written with history entries.
    History,
    /// Locations live in the URL hash fragment.
    Hash,
}

impl Mode {
    /// Picks the mode for a driver: [`Mode::History`] when the backend
    /// supports history-style entry writes, [`Mode::Hash`] otherwise.
    pub fn detect(driver: &dyn HistoryDriver) -> Self {
        if driver.supports_history() {
            Self::History
        } else {
            Self::Hash
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::History => write!(f, "history"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

/// A navigable location history.
///
/// Implementations hold a stack of entries and a cursor. Writing truncates
/// any forward tail, exactly like a browser session history; traversal moves
/// the cursor without growing the stack.
pub trait HistoryDriver: Send {
    /// Current entry's path, including any query string.
    fn location(&self) -> String;

    /// Current entry's hash fragment, without the leading `#`.
    fn hash(&self) -> String;

    /// Appends a new entry with the given path and makes it current.
    fn push(&mut self, location: &str);

    /// Overwrites the current entry's path in place.
    fn replace(&mut self, location: &str);

    /// Appends a new entry with the current path and the given fragment.
    fn set_hash(&mut self, hash: &str);

    /// Moves the cursor by `delta` entries, clamped to the stack bounds.
    fn go(&mut self, delta: i64);

    /// Whether this backend supports history-style entry writes.
    fn supports_history(&self) -> bool;
}
