//! Unified error type for the sanction pipeline.
//!
//! Every component returns [`Result`] and raises a distinguishable variant.
//! Callers that only care about the broad category (user-visible validation
//! message, missing record, storage failure, document failure) use
//! [`Error::kind`].

use thiserror::Error;

/// All errors raised by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input rejected before anything was persisted
    #[error("Validation error: {message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// No teacher with this application ID exists in the roster
    #[error("Teacher not found: {app_id}")]
    TeacherNotFound {
        /// The unknown application ID
        app_id: String,
    },

    /// No sanction order with this ID exists
    #[error("Sanction order not found: {id}")]
    OrderNotFound {
        /// The unknown order ID
        id: i64,
    },

    /// Designation matched no rate tier while the rate table rejects unknown categories
    #[error("Unrecognized designation category: {designation}")]
    UnrecognizedDesignation {
        /// The offending designation text
        designation: String,
    },

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Document could not be assembled or written
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
    },

    /// File system failure outside document output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored day count or amount does not fit its column type
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),
}

/// Broad error categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; safe to show to the operator
    Validation,
    /// Unknown teacher or order
    NotFound,
    /// Storage unavailable or a write failed; nothing was half-committed
    Persistence,
    /// Document assembly or output failed; no partial document exists
    Render,
    /// Startup configuration problem
    Config,
}

impl Error {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::UnrecognizedDesignation { .. } => {
                ErrorKind::Validation
            }
            Self::TeacherNotFound { .. } | Self::OrderNotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) | Self::IntConversion(_) => ErrorKind::Persistence,
            Self::Render { .. } | Self::Io(_) => ErrorKind::Render,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_not_found_variants() {
        let teacher = Error::TeacherNotFound {
            app_id: "42".to_string(),
        };
        let order = Error::OrderNotFound { id: 7 };
        assert_eq!(teacher.kind(), ErrorKind::NotFound);
        assert_eq!(order.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_kind_for_validation_and_storage() {
        assert_eq!(Error::validation("month").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::UnrecognizedDesignation {
                designation: "PRINCIPAL".to_string()
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::Database(sea_orm::DbErr::Custom("down".to_string())).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_display_messages() {
        let err = Error::OrderNotFound { id: 3 };
        assert_eq!(err.to_string(), "Sanction order not found: 3");
        let err = Error::validation("Month is required");
        assert_eq!(err.to_string(), "Validation error: Month is required");
    }
}
