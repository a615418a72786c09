//! Core data models for the schedule engine.
//!
//! This module contains the domain models shared by the schedule validator,
//! the pricing engine and the HTTP API.

mod audit;
mod error_state;
mod listing;
mod price_breakdown;
mod weekday;

pub use audit::AuditStep;
pub use error_state::{ErrorState, SelectionErrorKind};
pub use listing::{ListingConfig, NightlyRates, RentalType, WeeksOffered};
pub use price_breakdown::{PriceBreakdown, PriceMultiplier};
pub use weekday::{DayOption, Night, Weekday};
