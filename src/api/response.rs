//! Response types for the schedule engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PriceBreakdown;
use crate::schedule::{ProposalTerms, ScheduleSnapshot, SelectionOutcome, SelectionSession};

/// Response body for the `/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResponse {
    /// Unique id of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The computed price.
    pub breakdown: PriceBreakdown,
}

/// Response body for the `/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The result of the requested change.
    pub outcome: SelectionOutcome,
    /// The updated session, to be sent with the next request.
    pub session: SelectionSession,
    /// The schedule state after the change.
    pub snapshot: ScheduleSnapshot,
    /// Proposal terms, when the selection can be submitted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proposal: Option<ProposalTerms>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a listing not found error response.
    pub fn listing_not_found(listing_id: &str) -> Self {
        Self::with_details(
            "LISTING_NOT_FOUND",
            format!("Listing not found: {}", listing_id),
            format!("No listing with id '{}' is configured", listing_id),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::ListingNotFound { listing_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::listing_not_found(&listing_id),
            },
            EngineError::InvalidListing {
                listing_id,
                field,
                message,
            } => ApiErrorResponse::bad_request(ApiError::with_details(
                "INVALID_LISTING",
                format!("Invalid listing '{}' field '{}': {}", listing_id, field, message),
                "The listing data contains inconsistent values",
            )),
            error @ EngineError::InvalidDayOfWeek { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(error.to_string()))
            }
            EngineError::InvalidRequest { message } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_listing_not_found_error() {
        let error = ApiError::listing_not_found("missing_listing");
        assert_eq!(error.code, "LISTING_NOT_FOUND");
        assert!(error.message.contains("missing_listing"));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let api_error: ApiErrorResponse = EngineError::ListingNotFound {
            listing_id: "missing".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LISTING_NOT_FOUND");

        let api_error: ApiErrorResponse = EngineError::InvalidRequest {
            message: "listing or listing_id is required".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_invalid_listing_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidListing {
            listing_id: "inline".to_string(),
            field: "maximum_nights".to_string(),
            message: "must not exceed 7".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_LISTING");
        assert!(api_error.error.message.contains("maximum_nights"));
    }
}
