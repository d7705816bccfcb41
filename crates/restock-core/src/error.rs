//! # Error Types
//!
//! Domain-specific error types for restock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  restock-core errors (this file)                                    │
//! │  └── PeriodError      - Invalid report period selectors             │
//! │                                                                     │
//! │  restock-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  API errors (in app)                                                │
//! │  └── ApiError         - What the HTTP client sees (status + JSON)   │
//! │                                                                     │
//! │  Flow: PeriodError ──► ApiError (400)                               │
//! │        DbError     ──► ApiError (404 / 422 / 500)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors produced while resolving a report period.
///
/// Both variants are client errors: the period selector or its custom
/// bounds came in malformed. The API layer maps them to HTTP 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// The `period` query parameter is not one of the known modes.
    #[error("Unknown period mode: '{0}' (expected month, year, all or custom)")]
    UnknownMode(String),

    /// A `start`/`end` bound of a custom period failed to parse.
    #[error("Invalid {field} date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Convenience type alias for Results with PeriodError.
pub type PeriodResult<T> = Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PeriodError::UnknownMode("weekly".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown period mode: 'weekly' (expected month, year, all or custom)"
        );

        let err = PeriodError::InvalidDate {
            field: "start",
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid start date: 'not-a-date' (expected YYYY-MM-DD)"
        );
    }
}
