//! Error types for the calendar grid

/// Calendar errors
///
/// All variants are input rejections: the caller keeps its previous grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Non-positive slot size or slot count
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Start date could not be parsed
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// View option value is not of the form `<size>/<count>`
    #[error("invalid view mode: {0}")]
    InvalidViewMode(String),

    /// Date arithmetic left chrono's supported range
    #[error("date out of supported range")]
    OutOfRange,
}

impl CalendarError {
    /// Message suitable for a validation notice
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDate(_) => "Invalid Date".to_string(),
            other => other.to_string(),
        }
    }
}
