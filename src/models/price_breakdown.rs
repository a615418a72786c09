//! Price breakdown models.
//!
//! This module contains the [`PriceBreakdown`] produced by the pricing
//! engine and the [`PriceMultiplier`] components that explain it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, RentalType, WeeksOffered};

/// The individual terms of the guest price multiplier.
///
/// Terms that do not apply to a rental model are zero, so
/// `total = 1 + site_markup + unit_markup + weekly_markup
/// - unused_nights_discount - full_time_discount` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMultiplier {
    /// Site-wide markup.
    pub site_markup: Decimal,
    /// Listing-specific markup.
    pub unit_markup: Decimal,
    /// Markup applied only to the weekly model.
    pub weekly_markup: Decimal,
    /// Discount for nights of the week left unbooked.
    pub unused_nights_discount: Decimal,
    /// Discount for full-time stays (nightly model only).
    pub full_time_discount: Decimal,
    /// The resulting multiplier.
    pub total: Decimal,
}

/// The complete price of a selection.
///
/// Per-night figures are rounded to cents; all other amounts are rounded to
/// whole currency units.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{PriceBreakdown, RentalType, WeeksOffered};
/// use rust_decimal::Decimal;
///
/// let breakdown = PriceBreakdown::invalid(RentalType::Nightly, WeeksOffered::EveryWeek, 13);
/// assert!(!breakdown.valid);
/// assert_eq!(breakdown.reservation_total, Decimal::ZERO);
/// assert_eq!(breakdown.reservation_span, 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Whether the selection could be priced.
    pub valid: bool,
    /// The rental model used.
    pub rental_type: RentalType,
    /// The weekly pattern used.
    pub weeks_offered: WeeksOffered,
    /// The reservation span in weeks.
    pub reservation_span: u32,
    /// The number of nights per occupied week.
    pub nights_count: u32,
    /// Guest price per night.
    pub price_per_night: Decimal,
    /// Host rate per night before markup.
    pub host_nightly_rate: Decimal,
    /// Guest price for a four-week cycle.
    pub four_week_rent: Decimal,
    /// Host compensation for a four-week cycle.
    pub host_four_week_compensation: Decimal,
    /// Guest price for the whole reservation.
    pub reservation_total: Decimal,
    /// Cleaning fee charged with the first payment.
    pub cleaning_fee: Decimal,
    /// Damage deposit charged with the first payment.
    pub damage_deposit: Decimal,
    /// First payment: four-week rent plus cleaning fee and damage deposit.
    pub initial_payment: Decimal,
    /// The multiplier terms applied to the host rate.
    pub multiplier: PriceMultiplier,
    /// The pricing decisions, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl PriceBreakdown {
    /// An all-zero breakdown signalling that the selection cannot be priced yet.
    pub fn invalid(rental_type: RentalType, weeks_offered: WeeksOffered, reservation_span: u32) -> Self {
        Self {
            valid: false,
            rental_type,
            weeks_offered,
            reservation_span,
            nights_count: 0,
            price_per_night: Decimal::ZERO,
            host_nightly_rate: Decimal::ZERO,
            four_week_rent: Decimal::ZERO,
            host_four_week_compensation: Decimal::ZERO,
            reservation_total: Decimal::ZERO,
            cleaning_fee: Decimal::ZERO,
            damage_deposit: Decimal::ZERO,
            initial_payment: Decimal::ZERO,
            multiplier: PriceMultiplier::default(),
            audit_steps: vec![],
        }
    }
}
