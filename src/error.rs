//! Error types for the schedule engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for infrastructure failures: configuration loading, listing lookup and
//! malformed input. Selection rejections are not errors; they are reported
//! as [`ErrorState`](crate::models::ErrorState) values.

use thiserror::Error;

/// The main error type for the schedule engine.
///
/// # Example
///
/// ```
/// use schedule_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pricing.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pricing.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No listing with the given id was loaded.
    #[error("Listing not found: {listing_id}")]
    ListingNotFound {
        /// The listing id that was not found.
        listing_id: String,
    },

    /// A listing contained inconsistent values.
    #[error("Invalid listing '{listing_id}' field '{field}': {message}")]
    InvalidListing {
        /// The id of the invalid listing.
        listing_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A day index outside Sunday (0) to Saturday (6).
    #[error("Invalid day of week: {value} (expected 0-6)")]
    InvalidDayOfWeek {
        /// The rejected value.
        value: i64,
    },

    /// A request was missing information or contradicted itself.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
