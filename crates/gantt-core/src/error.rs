//! Error types for the chart orchestrator
//!
//! Every error here is recoverable: the chart keeps its previous grid and
//! resource list whenever a command fails.
//! - [`FetchError`]: record service failures
//! - [`ConfigError`]: configuration loading and validation
//! - [`GanttError`]: umbrella type returned by chart commands

use gantt_calendar::CalendarError;

/// Main chart error type
#[derive(Debug, thiserror::Error)]
pub enum GanttError {
    /// Rejected calendar input (view mode, date, slot bounds)
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Record service failure
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Allocation id not present in the resource list
    #[error("allocation not found: {0}")]
    AllocationNotFound(String),
}

impl GanttError {
    /// Check if repeating the command may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Check if the error stems from user input and should be shown as a
    /// validation notice
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Calendar(
                CalendarError::InvalidDate(_)
                    | CalendarError::InvalidViewMode(_)
                    | CalendarError::InvalidInput(_)
            )
        )
    }

    /// Message for a toast or status line
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Calendar(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Record service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The service answered with an error
    #[error("backend error: {0}")]
    Backend(String),

    /// The response could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service could not be reached
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Transport failures are transient; the rest are not
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`crate::GanttConfig`]
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values are individually valid but unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result alias for chart commands
pub type Result<T> = std::result::Result<T, GanttError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_is_the_only_retryable_fetch_error() {
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(!FetchError::Backend("500".into()).is_retryable());
        assert!(!FetchError::Malformed("eof".into()).is_retryable());

        let err = GanttError::from(FetchError::Transport("reset".into()));
        assert!(err.is_retryable());
        assert!(!err.is_user_facing());
    }

    #[test]
    fn calendar_input_errors_are_user_facing() {
        let err = GanttError::from(CalendarError::InvalidDate("2026-13-40".into()));
        assert!(err.is_user_facing());
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "Invalid Date");

        let err = GanttError::from(CalendarError::OutOfRange);
        assert!(!err.is_user_facing());
    }

    #[test]
    fn display_includes_source() {
        let err = GanttError::from(FetchError::Backend("denied".into()));
        assert_eq!(err.to_string(), "fetch failed: backend error: denied");
    }
}
