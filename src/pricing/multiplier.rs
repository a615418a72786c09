//! Guest price multiplier.
//!
//! Builds the multiplier applied to the host nightly rate. The set of terms
//! differs per rental model:
//!
//! | Term                   | Nightly | Weekly | Monthly |
//! |------------------------|---------|--------|---------|
//! | site markup            | yes     | yes    | yes     |
//! | unit markup            | yes     | yes    | yes     |
//! | unused nights discount | yes     | yes    | yes     |
//! | full-time discount     | 7 nights only | no | no    |
//! | weekly markup          | no      | yes    | no      |

use rust_decimal::Decimal;

use crate::config::PriceConfig;
use crate::models::{AuditStep, PriceMultiplier, RentalType};

use crate::schedule::FULL_WEEK_NIGHTS;

/// The multiplier and its audit step.
#[derive(Debug, Clone)]
pub struct MultiplierResult {
    /// The multiplier terms and total.
    pub multiplier: PriceMultiplier,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the discount for the nights of the week left unbooked, or `None`
/// if the product overflows.
///
/// # Example
///
/// ```
/// use schedule_engine::pricing::unused_nights_discount;
/// use rust_decimal::Decimal;
///
/// // 3 unused nights x 0.03
/// assert_eq!(unused_nights_discount(4, Decimal::new(3, 2)), Some(Decimal::new(9, 2)));
/// assert_eq!(unused_nights_discount(7, Decimal::new(3, 2)), Some(Decimal::ZERO));
/// ```
pub fn unused_nights_discount(nights: u32, discount_per_night: Decimal) -> Option<Decimal> {
    Decimal::from(FULL_WEEK_NIGHTS.saturating_sub(nights)).checked_mul(discount_per_night)
}

/// Calculates the guest price multiplier for a rental model.
///
/// Returns `None` when the configured terms are too large to sum.
///
/// # Example
///
/// ```
/// use schedule_engine::config::PriceConfig;
/// use schedule_engine::models::RentalType;
/// use schedule_engine::pricing::calculate_multiplier;
/// use rust_decimal::Decimal;
///
/// let result = calculate_multiplier(RentalType::Nightly, 7, Decimal::new(5, 2), &PriceConfig::default(), 1).unwrap();
/// // 1 + 0.17 + 0.05 - 0 - 0.13
/// assert_eq!(result.multiplier.total, Decimal::new(109, 2));
/// ```
pub fn calculate_multiplier(
    rental_type: RentalType,
    nights: u32,
    unit_markup: Decimal,
    config: &PriceConfig,
    step_number: u32,
) -> Option<MultiplierResult> {
    let unused = unused_nights_discount(nights, config.unused_nights_discount_multiplier)?;

    let full_time_discount = match rental_type {
        RentalType::Nightly if nights == FULL_WEEK_NIGHTS => config.full_time_discount,
        _ => Decimal::ZERO,
    };
    let weekly_markup = match rental_type {
        RentalType::Weekly => config.weekly_markup,
        _ => Decimal::ZERO,
    };

    let total = Decimal::ONE
        .checked_add(config.overall_site_markup)?
        .checked_add(unit_markup)?
        .checked_add(weekly_markup)?
        .checked_sub(unused)?
        .checked_sub(full_time_discount)?;

    let multiplier = PriceMultiplier {
        site_markup: config.overall_site_markup,
        unit_markup,
        weekly_markup,
        unused_nights_discount: unused,
        full_time_discount,
        total,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "price_multiplier".to_string(),
        rule_name: "Price Multiplier".to_string(),
        input: serde_json::json!({
            "rental_type": rental_type,
            "nights": nights,
            "site_markup": config.overall_site_markup.normalize().to_string(),
            "unit_markup": unit_markup.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_markup": weekly_markup.normalize().to_string(),
            "unused_nights_discount": unused.normalize().to_string(),
            "full_time_discount": full_time_discount.normalize().to_string(),
            "multiplier": total.normalize().to_string()
        }),
        reasoning: format!(
            "1 + {} site + {} unit + {} weekly - {} unused - {} full-time = {}",
            config.overall_site_markup.normalize(),
            unit_markup.normalize(),
            weekly_markup.normalize(),
            unused.normalize(),
            full_time_discount.normalize(),
            total.normalize()
        ),
    };

    Some(MultiplierResult {
        multiplier,
        audit_step,
    })
}
