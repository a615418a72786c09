//! HTTP request handlers for the schedule engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{ListingConfig, PriceBreakdown};
use crate::pricing::calculate_price;
use crate::schedule::{
    ScheduleSnapshot, SelectionOutcome, check_consistency, is_contiguous, nights_for_selection,
    sort_days,
};

use super::request::{PriceRequest, ScheduleAction, ScheduleRequest, ValidateRequest};
use super::response::{ApiError, ApiErrorResponse, PricingResponse, ScheduleResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/price", post(price_handler))
        .route("/schedule", post(schedule_handler))
        .route("/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /price.
///
/// Prices a weekday selection against a listing.
async fn price_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing price request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let listing = match resolve_listing(config, request.listing, request.listing_id) {
        Ok(listing) => listing,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let selection = sort_days(&request.selected_days);
    let breakdown = if is_contiguous(&selection) {
        calculate_price(
            &nights_for_selection(&selection),
            &listing,
            request.reservation_span,
            config.pricing(),
        )
    } else {
        PriceBreakdown::invalid(listing.rental_type, listing.weeks_offered, request.reservation_span)
    };

    info!(
        correlation_id = %correlation_id,
        listing_id = %listing.id,
        nights = breakdown.nights_count,
        valid = breakdown.valid,
        reservation_total = %breakdown.reservation_total,
        duration_us = start_time.elapsed().as_micros(),
        "Price calculated"
    );

    let response = PricingResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        breakdown,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /schedule.
///
/// Applies one change to the guest's session and returns the updated
/// session with a fresh snapshot.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let listing = match resolve_listing(config, request.listing, request.listing_id) {
        Ok(listing) => listing,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let mut session = request.session;
    let limit = request.limit_to_five_nights;
    let outcome = match request.action {
        ScheduleAction::Add(day) => session.add_day(day, &listing, limit),
        ScheduleAction::Remove(day) => session.remove_day(day, &listing),
        ScheduleAction::Toggle(day) => session.toggle_day(day, &listing, limit),
        ScheduleAction::Clear => {
            session.clear();
            SelectionOutcome::Unchanged
        }
        ScheduleAction::Dismiss => {
            session.dismiss_error();
            SelectionOutcome::Unchanged
        }
        ScheduleAction::None => SelectionOutcome::Unchanged,
    };

    let snapshot = ScheduleSnapshot::build_with_night_limit(
        &session,
        &listing,
        request.reservation_span,
        config.pricing(),
        limit,
    );
    let proposal = snapshot.proposal_terms();

    info!(
        correlation_id = %correlation_id,
        listing_id = %listing.id,
        action = ?request.action,
        outcome = ?outcome,
        nights = snapshot.night_count,
        acceptable = snapshot.is_acceptable,
        "Schedule updated"
    );

    let response = ScheduleResponse {
        outcome,
        session,
        snapshot,
        proposal,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /validate.
///
/// Runs every validator against raw day indices and reports whether they
/// agree.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let listing = match resolve_listing(state.config(), request.listing, request.listing_id) {
        Ok(listing) => listing,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let report = check_consistency(&request.selected_days, &listing);
    report.emit(&request.selected_days);

    info!(
        correlation_id = %correlation_id,
        listing_id = %listing.id,
        all_agree = report.all_agree,
        recommendation = ?report.recommendation,
        "Validation completed"
    );

    (StatusCode::OK, Json(report)).into_response()
}

/// Picks the inline listing if present, otherwise looks up `listing_id`.
fn resolve_listing(
    config: &ConfigLoader,
    listing: Option<ListingConfig>,
    listing_id: Option<String>,
) -> EngineResult<ListingConfig> {
    match (listing, listing_id) {
        (Some(listing), _) => {
            listing.validate()?;
            Ok(listing)
        }
        (None, Some(listing_id)) => config.get_listing(&listing_id).cloned(),
        (None, None) => Err(EngineError::InvalidRequest {
            message: "either listing or listing_id is required".to_string(),
        }),
    }
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("Invalid day of week") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
