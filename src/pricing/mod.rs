//! Pricing logic for the schedule engine.
//!
//! This module turns a set of selected nights into guest and host prices
//! across the nightly, weekly and monthly rental models, including host rate
//! proration, the guest price multiplier, and billing over recurring weekly
//! patterns.

mod billing;
mod calculator;
mod host_rate;
mod multiplier;

pub use billing::{BillingCycleResult, calculate_billing_cycle, four_week_periods_in_span};
pub use calculator::calculate_price;
pub use host_rate::{HostRateResult, prorate_host_rate};
pub use multiplier::{MultiplierResult, calculate_multiplier, unused_nights_discount};
