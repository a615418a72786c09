//! HTTP API module for the schedule engine.
//!
//! This module provides the REST endpoints for pricing a selection, driving
//! a guest's selection session, and cross-checking the validators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PriceRequest, ScheduleAction, ScheduleRequest, ValidateRequest};
pub use response::{ApiError, ApiErrorResponse, PricingResponse, ScheduleResponse};
pub use state::AppState;
