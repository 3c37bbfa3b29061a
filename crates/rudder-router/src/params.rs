//! Parameter and query-string extraction.

use std::collections::HashMap;

use crate::error::{Result, RouterError};
use crate::path::{normalize, PathPattern, PatternSegment};

/// Value of a single query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// `?key=value` — the decoded value.
    Value(String),
    /// `?key` with no `=` at all.
    Flag,
}

impl QueryValue {
    /// Returns the decoded value, or `None` for a bare flag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Flag => None,
        }
    }
}

/// Extracts named parameters from a concrete location for a matched route.
///
/// The location is normalized with the query dropped, then zipped
/// positionally against the pattern's segments; every `:name` capture takes
/// the percent-decoded segment at its position. The pattern has already
/// enforced equal segment counts by matching.
///
/// # Errors
///
/// Returns [`RouterError::Decode`] when a captured segment carries invalid
/// percent-encoding.
pub fn params_for(
    location: &str,
    pattern: &PathPattern,
    base: &str,
) -> Result<HashMap<String, String>> {
    let path = normalize(location, base, true);
    let parts = path.split('/').filter(|s| !s.is_empty());

    let mut params = HashMap::new();
    for (segment, part) in pattern.segments().iter().zip(parts) {
        if let PatternSegment::Param(name) = segment {
            params.insert(name.clone(), percent_decode(part)?);
        }
    }
    Ok(params)
}

/// Parses the query portion of a location into a key/value mapping.
///
/// Takes the substring after the first `?` (empty if none), trims it, and
/// strips a single leading `?`, `#`, or `&`. Pairs are split on `&`; within
/// a pair `+` becomes a space, the key is everything before the first `=`,
/// and the value is the decoded remainder (which may itself contain `=`). A
/// key without `=` maps to [`QueryValue::Flag`]. On duplicate keys the first
/// occurrence wins.
///
/// # Errors
///
/// Returns [`RouterError::Decode`] when a key or value carries invalid
/// percent-encoding.
///
/// # Example
///
/// ```
/// use rudder_router::{query_for, QueryValue};
///
/// let query = query_for("/p?a=1&a=2&flag").unwrap();
/// assert_eq!(query["a"], QueryValue::Value("1".to_string()));
/// assert_eq!(query["flag"], QueryValue::Flag);
/// ```
pub fn query_for(location: &str) -> Result<HashMap<String, QueryValue>> {
    let raw = location.find('?').map_or("", |i| &location[i + 1..]);
    let raw = raw.trim();
    let raw = raw.strip_prefix(['?', '#', '&']).unwrap_or(raw);
    if raw.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = HashMap::new();
    for pair in raw.split('&') {
        let pair = pair.replace('+', " ");
        let (key, value) = match pair.split_once('=') {
            Some((key, rest)) => (
                percent_decode(key)?,
                QueryValue::Value(percent_decode(rest)?),
            ),
            None => (percent_decode(&pair)?, QueryValue::Flag),
        };
        query.entry(key).or_insert(value);
    }
    Ok(query)
}

/// Decodes `%XX` escapes in a path or query component.
///
/// `+` is left alone here; only query pairs treat it as a space, and they do
/// so before decoding.
fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let (hi, lo) = bytes
                .get(i + 1..i + 3)
                .and_then(|hex| Some((hex_digit(hex[0])?, hex_digit(hex[1])?)))
                .ok_or_else(|| RouterError::Decode {
                    input: input.to_string(),
                })?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| RouterError::Decode {
        input: input.to_string(),
    })
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
