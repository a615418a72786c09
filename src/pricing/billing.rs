//! Billing cycle calculation for recurring weekly patterns.
//!
//! Converts a reservation span in weeks and a weeks-offered pattern into the
//! number of occupied weeks that are billed.

use rust_decimal::Decimal;

use crate::models::{AuditStep, WeeksOffered};

/// Four-week periods for the reservation spans offered to guests.
const SPAN_TABLE: [(u32, i64, u32); 12] = [
    (6, 15, 1),
    (7, 175, 2),
    (8, 2, 0),
    (9, 225, 2),
    (10, 25, 1),
    (12, 3, 0),
    (13, 325, 2),
    (16, 4, 0),
    (17, 425, 2),
    (20, 5, 0),
    (22, 55, 1),
    (26, 65, 1),
];

/// Returns the number of four-week periods in a reservation span.
///
/// Standard spans are looked up in a fixed table; any other span is divided
/// by four.
///
/// # Example
///
/// ```
/// use schedule_engine::pricing::four_week_periods_in_span;
/// use rust_decimal::Decimal;
///
/// assert_eq!(four_week_periods_in_span(13), Decimal::new(325, 2));
/// assert_eq!(four_week_periods_in_span(14), Decimal::new(35, 1));
/// ```
pub fn four_week_periods_in_span(reservation_span_weeks: u32) -> Decimal {
    SPAN_TABLE
        .iter()
        .find(|(span, _, _)| *span == reservation_span_weeks)
        .map(|&(_, mantissa, scale)| Decimal::new(mantissa, scale))
        .unwrap_or_else(|| Decimal::from(reservation_span_weeks) / Decimal::from(4))
}

/// How a reservation span is billed under a weekly pattern.
#[derive(Debug, Clone)]
pub struct BillingCycleResult {
    /// Weeks in one repetition of the pattern.
    pub schedule_period: u32,
    /// Occupied weeks in any four-week span.
    pub occupied_weeks_per_four_weeks: u32,
    /// Four-week periods in the reservation span.
    pub four_week_periods: Decimal,
    /// Occupied weeks billed over the reservation, rounded up.
    pub billed_weeks: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the billed occupied weeks for a reservation.
///
/// The product of occupied weeks and four-week periods is rounded up, so a
/// partial final cycle is billed as a full occupied week.
pub fn calculate_billing_cycle(
    weeks_offered: WeeksOffered,
    reservation_span_weeks: u32,
    step_number: u32,
) -> BillingCycleResult {
    let schedule_period = weeks_offered.schedule_period();
    let occupied = weeks_offered.occupied_weeks_per_four_weeks();
    let four_week_periods = four_week_periods_in_span(reservation_span_weeks);
    let billed_weeks = (Decimal::from(occupied) * four_week_periods).ceil();

    let audit_step = AuditStep {
        step_number,
        rule_id: "billing_cycle".to_string(),
        rule_name: "Billing Cycle".to_string(),
        input: serde_json::json!({
            "weeks_offered": weeks_offered.as_str(),
            "reservation_span": reservation_span_weeks
        }),
        output: serde_json::json!({
            "schedule_period": schedule_period,
            "occupied_weeks_per_four_weeks": occupied,
            "four_week_periods": four_week_periods.normalize().to_string(),
            "billed_weeks": billed_weeks.normalize().to_string()
        }),
        reasoning: format!(
            "ceil({} occupied weeks x {} four-week periods) = {} billed weeks",
            occupied,
            four_week_periods.normalize(),
            billed_weeks.normalize()
        ),
    };

    BillingCycleResult {
        schedule_period,
        occupied_weeks_per_four_weeks: occupied,
        four_week_periods,
        billed_weeks,
        audit_step,
    }
}
