//! Host rate proration.
//!
//! Each rental model expresses the host's price differently. This module
//! reduces all three to a markup-free host rate per night.

use rust_decimal::Decimal;

use crate::config::PriceConfig;
use crate::models::{AuditStep, ListingConfig, RentalType};

/// Days in a week, used to turn a monthly rate into a weekly figure.
const DAYS_PER_WEEK: u32 = 7;

/// The prorated host nightly rate and its audit step.
#[derive(Debug, Clone)]
pub struct HostRateResult {
    /// Host rate per night before any markup.
    pub host_nightly_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates the listing's host rate to a per-night figure.
///
/// - Nightly: the rate for the exact night count, falling back to the
///   4-night rate.
/// - Weekly: the weekly rate divided by the night count.
/// - Monthly: the monthly rate converted to a daily average, scaled to a
///   week, then divided by the night count.
///
/// Returns `None` when the relevant rate is missing or zero, `nights` is
/// zero, or the proration overflows.
///
/// # Example
///
/// ```
/// use schedule_engine::config::PriceConfig;
/// use schedule_engine::models::ListingConfig;
/// use schedule_engine::pricing::prorate_host_rate;
/// use rust_decimal::Decimal;
///
/// let listing: ListingConfig = serde_json::from_str(
///     r#"{ "rental_type": "monthly", "monthly_host_rate": "3040" }"#,
/// ).unwrap();
///
/// // 3040 / 30.4 = 100 per day, x 7 = 700 per week, / 5 nights = 140
/// let result = prorate_host_rate(&listing, 5, &PriceConfig::default(), 1).unwrap();
/// assert_eq!(result.host_nightly_rate, Decimal::new(140, 0));
/// ```
pub fn prorate_host_rate(
    listing: &ListingConfig,
    nights: u32,
    config: &PriceConfig,
    step_number: u32,
) -> Option<HostRateResult> {
    if nights == 0 {
        return None;
    }
    let nights_dec = Decimal::from(nights);

    let (host_nightly_rate, source_rate, reasoning) = match listing.rental_type {
        RentalType::Nightly => {
            let rate = positive(listing.nightly_rates.for_nights(nights))?;
            (
                rate,
                rate,
                format!("Nightly host rate for {} nights: ${}", nights, rate.normalize()),
            )
        }
        RentalType::Weekly => {
            let weekly = positive(listing.weekly_host_rate)?;
            let rate = weekly.checked_div(nights_dec)?;
            (
                rate,
                weekly,
                format!(
                    "${} weekly / {} nights = ${}",
                    weekly.normalize(),
                    nights,
                    rate.round_dp(4).normalize()
                ),
            )
        }
        RentalType::Monthly => {
            let monthly = positive(listing.monthly_host_rate)?;
            let daily = monthly.checked_div(positive(Some(config.avg_days_per_month))?)?;
            let rate = daily.checked_mul(Decimal::from(DAYS_PER_WEEK))?.checked_div(nights_dec)?;
            (
                rate,
                monthly,
                format!(
                    "${} monthly / {} days x {} / {} nights = ${}",
                    monthly.normalize(),
                    config.avg_days_per_month.normalize(),
                    DAYS_PER_WEEK,
                    nights,
                    rate.round_dp(4).normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "host_nightly_rate".to_string(),
        rule_name: "Host Nightly Rate".to_string(),
        input: serde_json::json!({
            "rental_type": listing.rental_type,
            "host_rate": source_rate.normalize().to_string(),
            "nights": nights
        }),
        output: serde_json::json!({
            "host_nightly_rate": host_nightly_rate.round_dp(4).normalize().to_string()
        }),
        reasoning,
    };

    Some(HostRateResult {
        host_nightly_rate,
        audit_step,
    })
}

fn positive(rate: Option<Decimal>) -> Option<Decimal> {
    rate.filter(|r| *r > Decimal::ZERO)
}
