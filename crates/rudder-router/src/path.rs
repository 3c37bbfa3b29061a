//! Location normalization and path pattern matching.

use std::collections::HashMap;

/// Canonicalizes a raw location into `/` or `/segment(/segment)*` form.
///
/// The same transform is applied to route templates at registration and to
/// every runtime location at match time, so comparisons are structural. The
/// steps run in order: strip a leading origin, strip the `base` prefix,
/// collapse a trailing slash in front of the query string, strip trailing
/// then leading slashes, re-prefix exactly one slash, and finally truncate
/// at the query string when `drop_query` is set.
///
/// # Example
///
/// ```
/// use rudder_router::normalize;
///
/// assert_eq!(normalize("https://example.com/users/7/", "", false), "/users/7");
/// assert_eq!(normalize("/app/users/7?tab=posts", "/app", true), "/users/7");
/// ```
#[must_use]
pub fn normalize(raw: &str, base: &str, drop_query: bool) -> String {
    let mut s = strip_origin(raw);
    if !base.is_empty() {
        if let Some(rest) = s.strip_prefix(base) {
            s = rest;
        }
    }
    let mut s = s.to_string();
    while s.contains("/?") {
        s = s.replacen("/?", "?", 1);
    }
    let s = s.trim_end_matches('/');
    let s = s.trim_start_matches('/');
    let mut out = format!("/{s}");
    while out.starts_with("//") {
        out.remove(0);
    }
    if drop_query {
        if let Some(i) = out.find('?') {
            out.truncate(i);
        }
        if out.is_empty() {
            out.push('/');
        }
    }
    out
}

/// Drops a leading `scheme://authority` so absolute and relative locations
/// compare equal. Returns the input unchanged when it carries no origin.
fn strip_origin(raw: &str) -> &str {
    let Some(scheme_end) = raw.find("://") else {
        return raw;
    };
    let scheme = &raw[..scheme_end];
    let valid_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return raw;
    }
    let authority = &raw[scheme_end + 3..];
    match authority.find(['/', '?', '#']) {
        Some(i) => &authority[i..],
        None => "/",
    }
}

/// A segment in a compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// A literal segment, matched case-insensitively.
    Literal(String),
    /// A `:name` capture, matching exactly one path segment.
    Param(String),
}

/// A compiled route template.
///
/// Templates are compiled to an explicit segment-descriptor list rather than
/// a regular expression, so regex metacharacters inside literal segments are
/// compared as plain text. A template with N segments only ever matches
/// locations with exactly N segments.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<PatternSegment>,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compiles a normalized template.
    ///
    /// # Example
    ///
    /// ```
    /// use rudder_router::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/users/:id");
    /// assert!(pattern.matches("/users/42"));
    /// assert!(!pattern.matches("/users"));
    /// assert_eq!(pattern.param_names(), ["id"]);
    /// ```
    #[must_use]
    pub fn compile(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut param_names = Vec::new();

        for part in template.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = part.strip_prefix(':') {
                segments.push(PatternSegment::Param(name.to_string()));
                param_names.push(name.to_string());
            } else {
                segments.push(PatternSegment::Literal(part.to_string()));
            }
        }

        Self {
            template: template.to_string(),
            segments,
            param_names,
        }
    }

    /// Tests a normalized location path against this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| match segment {
                PatternSegment::Literal(lit) => lit.eq_ignore_ascii_case(part),
                PatternSegment::Param(_) => true,
            })
    }

    /// Returns the template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the compiled segment descriptors.
    #[must_use]
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Returns the capture names in template order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Rebuilds a concrete path by substituting `:name` captures.
    ///
    /// Returns `None` when a capture has no value in `params`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use rudder_router::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/users/:id");
    /// let params: HashMap<String, String> =
    ///     [("id".to_string(), "7".to_string())].into_iter().collect();
    /// assert_eq!(pattern.reverse(&params), Some("/users/7".to_string()));
    /// ```
    #[must_use]
    pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
        let mut path = String::new();

        for segment in &self.segments {
            path.push('/');
            match segment {
                PatternSegment::Literal(s) => path.push_str(s),
                PatternSegment::Param(name) => path.push_str(params.get(name)?),
            }
        }

        if path.is_empty() {
            path.push('/');
        }

        Some(path)
    }
}
