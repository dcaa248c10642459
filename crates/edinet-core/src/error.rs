//! Error types for filing data operations.
//!
//! This module defines [`EdinetError`] which covers all error cases that can
//! occur when fetching feeds, unpacking filing packages, or extracting facts
//! from XBRL documents.

use thiserror::Error;

/// Errors that can occur during filing data operations.
#[derive(Error, Debug)]
pub enum EdinetError {
    /// Network-related errors (connection failures, bad statuses, exhausted retries).
    #[error("Network error: {0}")]
    Network(String),

    /// Every requested symbol failed to produce feed entries.
    #[error("No data fetched for any of: {}", .symbols.join(", "))]
    NoData {
        /// The symbols that were requested.
        symbols: Vec<String>,
    },

    /// Error parsing feed or XBRL content.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error retrieving or unpacking a filing package.
    #[error("Package error: {0}")]
    Package(String),

    /// A concept's value could not be coerced from a matched fact.
    #[error("Failed to extract {concept} from {text:?}: {reason}")]
    Extraction {
        /// Qualified name of the concept being resolved.
        concept: String,
        /// Text content of the offending fact.
        text: String,
        /// Underlying cause.
        reason: String,
    },

    /// The filing's accounting-standard value matched no supported taxonomy.
    #[error("Unrecognized accounting standard: {value:?}")]
    UnresolvedStandard {
        /// The accounting-standard value found in the filing.
        value: String,
    },

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`EdinetError`].
pub type Result<T> = std::result::Result<T, EdinetError>;
