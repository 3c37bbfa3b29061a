//! Error types for routing.

use thiserror::Error;

/// Phase of the transition lifecycle in which a hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Before the commit phase.
    Before,
    /// After the commit phase.
    After,
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Route definition rejected at registration.
    #[error("invalid route template `{template}`: {reason}")]
    InvalidTemplate {
        /// The offending path template.
        template: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configured origin is not a parseable absolute URL.
    #[error("invalid origin `{0}`")]
    InvalidOrigin(String),

    /// A hook failed; the navigation attempt was abandoned.
    #[error("{phase} hook failed: {message}")]
    HookFailed {
        /// Which hook list was running.
        phase: HookPhase,
        /// The hook's error, stringified.
        message: String,
    },

    /// Percent-decoding of a path or query component failed.
    #[error("invalid percent-encoding in `{input}`")]
    Decode {
        /// The component that failed to decode.
        input: String,
    },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
