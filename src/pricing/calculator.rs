//! Price calculation entry point.
//!
//! Composes host rate proration, the price multiplier and the billing cycle
//! into a single [`PriceBreakdown`]. All arithmetic runs on unrounded
//! intermediates; rounding happens once when the breakdown is assembled.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::PriceConfig;
use crate::models::{AuditStep, ListingConfig, Night, PriceBreakdown};

use super::{BillingCycleResult, calculate_billing_cycle, calculate_multiplier, prorate_host_rate};

/// Weeks in the four-week cycle that rent is quoted over.
const WEEKS_PER_CYCLE: u32 = 4;

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn to_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

struct PriceTotals {
    price_per_night: Decimal,
    four_week_rent: Decimal,
    host_four_week_compensation: Decimal,
    reservation_total: Decimal,
    initial_payment: Decimal,
}

/// Unrounded per-night price and whole-unit totals; `None` on overflow.
fn price_totals(
    host_nightly_rate: Decimal,
    multiplier: Decimal,
    nights: u32,
    billing: &BillingCycleResult,
    listing: &ListingConfig,
) -> Option<PriceTotals> {
    let nights_dec = Decimal::from(nights);
    let cycle_scale = nights_dec
        .checked_mul(Decimal::from(WEEKS_PER_CYCLE))?
        .checked_div(Decimal::from(billing.schedule_period))?;

    let price_per_night = host_nightly_rate.checked_mul(multiplier)?;
    let four_week_rent = to_whole(price_per_night.checked_mul(cycle_scale)?);
    let host_four_week_compensation = to_whole(host_nightly_rate.checked_mul(cycle_scale)?);
    let reservation_total = to_whole(
        price_per_night
            .checked_mul(nights_dec)?
            .checked_mul(billing.billed_weeks)?,
    );
    let initial_payment = to_whole(
        four_week_rent
            .checked_add(listing.cleaning_fee)?
            .checked_add(listing.damage_deposit)?,
    );

    Some(PriceTotals {
        price_per_night,
        four_week_rent,
        host_four_week_compensation,
        reservation_total,
        initial_payment,
    })
}

/// Calculates the guest and host prices for a set of selected nights.
///
/// Returns [`PriceBreakdown::invalid`] when no nights are selected, the
/// listing has no usable rate for its rental model, or an amount is too
/// large to represent. The function is pure:
/// identical inputs always produce identical breakdowns.
///
/// # Example
///
/// ```
/// use schedule_engine::config::PriceConfig;
/// use schedule_engine::models::{ListingConfig, Weekday};
/// use schedule_engine::pricing::calculate_price;
/// use schedule_engine::schedule::nights_for_selection;
/// use rust_decimal::Decimal;
///
/// let listing: ListingConfig = serde_json::from_str(r#"{
///     "rental_type": "nightly",
///     "nightly_rates": { "four_nights": "100" },
///     "unit_markup": "0.05"
/// }"#).unwrap();
///
/// let nights = nights_for_selection(&[
///     Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday,
///     Weekday::Thursday, Weekday::Friday,
/// ]);
/// let breakdown = calculate_price(&nights, &listing, 13, &PriceConfig::default());
///
/// assert!(breakdown.valid);
/// assert_eq!(breakdown.price_per_night, Decimal::new(11300, 2));
/// assert_eq!(breakdown.four_week_rent, Decimal::new(1808, 0));
/// ```
pub fn calculate_price(
    selected_nights: &[Night],
    listing: &ListingConfig,
    reservation_span: u32,
    config: &PriceConfig,
) -> PriceBreakdown {
    let invalid = || PriceBreakdown::invalid(listing.rental_type, listing.weeks_offered, reservation_span);

    let nights = selected_nights.len() as u32;
    if nights == 0 {
        return invalid();
    }

    let Some(host_rate) = prorate_host_rate(listing, nights, config, 1) else {
        debug!(
            listing_id = %listing.id,
            rental_type = %listing.rental_type,
            nights,
            "No usable host rate; selection cannot be priced"
        );
        return invalid();
    };
    let Some(multiplier) = calculate_multiplier(listing.rental_type, nights, listing.unit_markup, config, 2) else {
        debug!(listing_id = %listing.id, "Price multiplier overflowed; selection cannot be priced");
        return invalid();
    };
    let billing = calculate_billing_cycle(listing.weeks_offered, reservation_span, 3);

    let host_nightly_rate = host_rate.host_nightly_rate;
    let Some(totals) = price_totals(
        host_nightly_rate,
        multiplier.multiplier.total,
        nights,
        &billing,
        listing,
    ) else {
        debug!(
            listing_id = %listing.id,
            nights,
            reservation_span,
            "Price totals overflowed; selection cannot be priced"
        );
        return invalid();
    };
    let PriceTotals {
        price_per_night,
        four_week_rent,
        host_four_week_compensation,
        reservation_total,
        initial_payment,
    } = totals;

    let totals_step = AuditStep {
        step_number: 4,
        rule_id: "price_totals".to_string(),
        rule_name: "Price Totals".to_string(),
        input: serde_json::json!({
            "price_per_night": to_cents(price_per_night).to_string(),
            "nights": nights,
            "schedule_period": billing.schedule_period,
            "billed_weeks": billing.billed_weeks.normalize().to_string(),
            "cleaning_fee": listing.cleaning_fee.normalize().to_string(),
            "damage_deposit": listing.damage_deposit.normalize().to_string()
        }),
        output: serde_json::json!({
            "four_week_rent": four_week_rent.to_string(),
            "host_four_week_compensation": host_four_week_compensation.to_string(),
            "reservation_total": reservation_total.to_string(),
            "initial_payment": initial_payment.to_string()
        }),
        reasoning: format!(
            "${} x {} nights x {} / {} = ${} per four weeks; x {} billed weeks = ${} total",
            to_cents(price_per_night),
            nights,
            WEEKS_PER_CYCLE,
            billing.schedule_period,
            four_week_rent,
            billing.billed_weeks.normalize(),
            reservation_total
        ),
    };

    debug!(
        listing_id = %listing.id,
        rental_type = %listing.rental_type,
        nights,
        reservation_span,
        price_per_night = %to_cents(price_per_night),
        reservation_total = %reservation_total,
        "Priced selection"
    );

    PriceBreakdown {
        valid: true,
        rental_type: listing.rental_type,
        weeks_offered: listing.weeks_offered,
        reservation_span,
        nights_count: nights,
        price_per_night: to_cents(price_per_night),
        host_nightly_rate: to_cents(host_nightly_rate),
        four_week_rent,
        host_four_week_compensation,
        reservation_total,
        cleaning_fee: listing.cleaning_fee,
        damage_deposit: listing.damage_deposit,
        initial_payment,
        multiplier: multiplier.multiplier,
        audit_steps: vec![host_rate.audit_step, multiplier.audit_step, billing.audit_step, totals_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NightlyRates, RentalType, Weekday, WeeksOffered};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_listing(rental_type: RentalType) -> ListingConfig {
        ListingConfig {
            id: "listing_001".to_string(),
            minimum_nights: 2,
            maximum_nights: 7,
            days_available: Weekday::ALL.to_vec(),
            rental_type,
            nightly_rates: NightlyRates::flat(dec("100")),
            weekly_host_rate: Some(dec("700")),
            monthly_host_rate: Some(dec("3040")),
            unit_markup: dec("0.05"),
            cleaning_fee: dec("75"),
            damage_deposit: dec("400"),
            weeks_offered: WeeksOffered::EveryWeek,
        }
    }

    fn nights(count: usize) -> Vec<Night> {
        Weekday::ALL[..count].iter().map(|&day| Night::following(day)).collect()
    }

    #[test]
    fn test_nightly_full_week() {
        let listing = create_test_listing(RentalType::Nightly);
        let breakdown = calculate_price(&nights(7), &listing, 13, &PriceConfig::default());

        assert!(breakdown.valid);
        assert_eq!(breakdown.nights_count, 7);
        assert_eq!(breakdown.multiplier.total, dec("1.09"));
        assert_eq!(breakdown.price_per_night, dec("109.00"));
        // 109 x 7 x 4
        assert_eq!(breakdown.four_week_rent, dec("3052"));
        assert_eq!(breakdown.host_four_week_compensation, dec("2800"));
        // 109 x 7 x 13
        assert_eq!(breakdown.reservation_total, dec("9919"));
    }

    #[test]
    fn test_nightly_four_nights() {
        let listing = create_test_listing(RentalType::Nightly);
        let breakdown = calculate_price(&nights(4), &listing, 13, &PriceConfig::default());

        assert_eq!(breakdown.multiplier.total, dec("1.13"));
        assert_eq!(breakdown.price_per_night, dec("113.00"));
        assert_eq!(breakdown.four_week_rent, dec("1808"));
        assert_eq!(breakdown.initial_payment, dec("2283"));
    }

    #[test]
    fn test_weekly_one_on_one_off() {
        let listing = ListingConfig {
            weeks_offered: WeeksOffered::OneOnOneOff,
            ..create_test_listing(RentalType::Weekly)
        };
        let breakdown = calculate_price(&nights(4), &listing, 8, &PriceConfig::default());

        assert!(breakdown.valid);
        assert_eq!(breakdown.host_nightly_rate, dec("175.00"));
        // 175 x 1.13
        assert_eq!(breakdown.price_per_night, dec("197.75"));
        // 197.75 x 4 x 4 / 2
        assert_eq!(breakdown.four_week_rent, dec("1582"));
        assert_eq!(breakdown.host_four_week_compensation, dec("1400"));
        // 197.75 x 4 x ceil(2 x 2)
        assert_eq!(breakdown.reservation_total, dec("3164"));
        assert_eq!(breakdown.initial_payment, dec("2057"));
    }

    #[test]
    fn test_monthly_five_nights() {
        let listing = ListingConfig {
            unit_markup: Decimal::ZERO,
            cleaning_fee: dec("100"),
            damage_deposit: dec("1000"),
            ..create_test_listing(RentalType::Monthly)
        };
        let breakdown = calculate_price(&nights(5), &listing, 13, &PriceConfig::default());

        assert_eq!(breakdown.host_nightly_rate, dec("140.00"));
        assert_eq!(breakdown.multiplier.total, dec("1.11"));
        assert_eq!(breakdown.price_per_night, dec("155.40"));
        assert_eq!(breakdown.four_week_rent, dec("3108"));
        assert_eq!(breakdown.host_four_week_compensation, dec("2800"));
        assert_eq!(breakdown.reservation_total, dec("10101"));
        assert_eq!(breakdown.initial_payment, dec("4208"));
    }

    #[test]
    fn test_totals_round_from_unrounded_price() {
        // 700 / 3 = 233.333..., x 1.10 = 256.666...
        let listing = create_test_listing(RentalType::Weekly);
        let breakdown = calculate_price(&nights(3), &listing, 52, &PriceConfig::default());

        assert_eq!(breakdown.price_per_night, dec("256.67"));
        assert_eq!(breakdown.four_week_rent, dec("3080"));
        // 256.666... x 3 x 52 = 40040, not 256.67 x 156 = 40040.52
        assert_eq!(breakdown.reservation_total, dec("40040"));
    }

    #[test]
    fn test_empty_selection_is_invalid() {
        let listing = create_test_listing(RentalType::Nightly);
        let breakdown = calculate_price(&[], &listing, 13, &PriceConfig::default());

        assert!(!breakdown.valid);
        assert_eq!(breakdown.reservation_total, Decimal::ZERO);
        assert!(breakdown.audit_steps.is_empty());
    }

    #[test]
    fn test_missing_rate_is_invalid() {
        let listing = ListingConfig {
            weekly_host_rate: None,
            ..create_test_listing(RentalType::Weekly)
        };
        let breakdown = calculate_price(&nights(4), &listing, 13, &PriceConfig::default());

        assert!(!breakdown.valid);
        assert_eq!(breakdown.rental_type, RentalType::Weekly);
        assert_eq!(breakdown.reservation_span, 13);
        assert_eq!(breakdown.price_per_night, Decimal::ZERO);
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let listing = create_test_listing(RentalType::Nightly);
        let breakdown = calculate_price(&nights(4), &listing, 13, &PriceConfig::default());

        let ids: Vec<&str> = breakdown.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["host_nightly_rate", "price_multiplier", "billing_cycle", "price_totals"]);
        for (i, step) in breakdown.audit_steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_rate_at_decimal_limit_is_invalid() {
        let listing = ListingConfig {
            weekly_host_rate: Some(dec("79228162514264337593543950335")),
            ..create_test_listing(RentalType::Weekly)
        };
        // Mon, Tue, Wed: two nights
        let breakdown = calculate_price(&nights(3)[1..], &listing, 13, &PriceConfig::default());

        assert!(!breakdown.valid);
        assert_eq!(breakdown.reservation_total, Decimal::ZERO);
        assert!(breakdown.audit_steps.is_empty());
    }

    #[test]
    fn test_longest_span_overflow_is_invalid() {
        let listing = ListingConfig {
            weekly_host_rate: Some(dec("1000000000000000000000")),
            ..create_test_listing(RentalType::Weekly)
        };
        let breakdown = calculate_price(&nights(3)[1..], &listing, u32::MAX, &PriceConfig::default());

        assert!(!breakdown.valid);
        assert_eq!(breakdown.reservation_span, u32::MAX);
        assert_eq!(breakdown.initial_payment, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_fees_are_invalid() {
        let listing = ListingConfig {
            cleaning_fee: Decimal::MAX,
            damage_deposit: Decimal::MAX,
            ..create_test_listing(RentalType::Nightly)
        };
        let breakdown = calculate_price(&nights(4), &listing, 13, &PriceConfig::default());
        assert!(!breakdown.valid);
    }

    fn rental_type() -> impl Strategy<Value = RentalType> {
        prop_oneof![
            Just(RentalType::Nightly),
            Just(RentalType::Weekly),
            Just(RentalType::Monthly),
        ]
    }

    fn weeks_offered() -> impl Strategy<Value = WeeksOffered> {
        prop_oneof![
            Just(WeeksOffered::EveryWeek),
            Just(WeeksOffered::OneOnOneOff),
            Just(WeeksOffered::TwoOnTwoOff),
            Just(WeeksOffered::OneOnThreeOff),
        ]
    }

    proptest! {
        #[test]
        fn pricing_is_idempotent(
            rental_type in rental_type(),
            weeks_offered in weeks_offered(),
            count in 1usize..=7,
            span in 1u32..=52,
            rate_cents in 1i64..1_000_000,
        ) {
            let listing = ListingConfig {
                nightly_rates: NightlyRates::flat(Decimal::new(rate_cents, 2)),
                weekly_host_rate: Some(Decimal::new(rate_cents * 7, 2)),
                monthly_host_rate: Some(Decimal::new(rate_cents * 30, 2)),
                weeks_offered,
                ..create_test_listing(rental_type)
            };
            let selected = nights(count);
            let config = PriceConfig::default();

            let first = calculate_price(&selected, &listing, span, &config);
            let second = calculate_price(&selected, &listing, span, &config);

            prop_assert!(first.valid);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }

        #[test]
        fn initial_payment_adds_fees_to_rent(
            rental_type in rental_type(),
            count in 1usize..=7,
        ) {
            let listing = create_test_listing(rental_type);
            let breakdown = calculate_price(&nights(count), &listing, 13, &PriceConfig::default());

            prop_assert_eq!(
                breakdown.initial_payment,
                breakdown.four_week_rent + listing.cleaning_fee + listing.damage_deposit
            );
        }
    }
}
