//! Multi-validator consistency checking.
//!
//! The primary selection validator and an independent bitmask-based
//! validator recompute selection validity from the same raw day indices.
//! Any disagreement between them is a regression signal: it is reported as
//! a structured `tracing` event on the `schedule_engine::diagnostics` target
//! and never used to accept or reject a selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{ListingConfig, Weekday};

use super::{is_contiguous, night_count, sort_days};

/// Tracing target for validator diagnostics.
pub const DIAGNOSTICS_TARGET: &str = "schedule_engine::diagnostics";

/// Bitmask with one bit set for every day of the week.
const FULL_WEEK_MASK: u8 = 0b111_1111;

/// The validation path that produced a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorSource {
    /// The primary validator used by selection sessions.
    Golden,
    /// The independent bitmask validator.
    Workflow,
}

/// The overall verdict of a consistency report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    /// Every validator found the selection valid.
    Valid,
    /// At least one validator found the selection invalid.
    Invalid,
}

/// The verdict of a single validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorCheck {
    /// Which validator produced this check.
    pub source: ValidatorSource,
    /// Whether the selection is valid overall.
    pub valid: bool,
    /// Nights covered by the recognised days.
    pub night_count: u32,
    /// Whether the recognised days form one unbroken run.
    pub is_contiguous: bool,
    /// Whether the night count lies within the listing's bounds.
    pub within_night_bounds: bool,
    /// Whether every recognised day is offered by the listing.
    pub all_days_available: bool,
    /// Reasons the selection is invalid.
    pub errors: Vec<String>,
}

impl ValidatorCheck {
    fn verdict(&self) -> (bool, u32, bool, bool, bool) {
        (
            self.valid,
            self.night_count,
            self.is_contiguous,
            self.within_night_bounds,
            self.all_days_available,
        )
    }
}

/// The combined result of every validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// One check per validator.
    pub checks: Vec<ValidatorCheck>,
    /// Whether every validator reached the same verdict.
    pub all_agree: bool,
    /// `VALID` only if every validator found the selection valid.
    pub recommendation: Recommendation,
    /// A one-line summary of the outcome.
    pub summary: String,
}

impl ConsistencyReport {
    /// Emits the report as a diagnostic event.
    ///
    /// Disagreement is logged at `warn` level with every check attached;
    /// agreement is logged at `debug` level.
    pub fn emit(&self, selected_day_indices: &[i64]) {
        if self.all_agree {
            debug!(
                target: DIAGNOSTICS_TARGET,
                selection = ?selected_day_indices,
                recommendation = ?self.recommendation,
                "Validators agree"
            );
        } else {
            let checks = serde_json::to_string(&self.checks).unwrap_or_default();
            warn!(
                target: DIAGNOSTICS_TARGET,
                selection = ?selected_day_indices,
                checks = %checks,
                summary = %self.summary,
                "Validator disagreement detected"
            );
        }
    }
}

/// Runs every validator against raw day indices and compares the results.
///
/// Out-of-range indices make a selection invalid; duplicate indices are
/// collapsed.
///
/// # Example
///
/// ```
/// use schedule_engine::models::ListingConfig;
/// use schedule_engine::schedule::{check_consistency, Recommendation};
///
/// let listing: ListingConfig = serde_json::from_str(
///     r#"{ "rental_type": "nightly", "minimum_nights": 2, "maximum_nights": 7 }"#,
/// ).unwrap();
///
/// let report = check_consistency(&[5, 6, 0, 1], &listing);
/// assert!(report.all_agree);
/// assert_eq!(report.recommendation, Recommendation::Valid);
///
/// let report = check_consistency(&[1, 3], &listing);
/// assert_eq!(report.recommendation, Recommendation::Invalid);
/// ```
pub fn check_consistency(selected_day_indices: &[i64], listing: &ListingConfig) -> ConsistencyReport {
    let checks = vec![
        golden_check(selected_day_indices, listing),
        workflow_check(selected_day_indices, listing),
    ];

    let all_agree = checks.windows(2).all(|pair| pair[0].verdict() == pair[1].verdict());
    let recommendation = if checks.iter().all(|c| c.valid) {
        Recommendation::Valid
    } else {
        Recommendation::Invalid
    };

    let summary = if all_agree {
        format!(
            "All {} validators agree: {:?}",
            checks.len(),
            recommendation
        )
    } else {
        let verdicts: Vec<String> = checks
            .iter()
            .map(|c| format!("{:?}={}", c.source, if c.valid { "valid" } else { "invalid" }))
            .collect();
        format!("Validators disagree ({})", verdicts.join(", "))
    };

    ConsistencyReport {
        checks,
        all_agree,
        recommendation,
        summary,
    }
}

/// Validation through the same functions the selection session uses.
fn golden_check(indices: &[i64], listing: &ListingConfig) -> ValidatorCheck {
    let mut errors = Vec::new();
    let mut days = Vec::new();

    for &index in indices {
        match u8::try_from(index).ok().and_then(Weekday::from_index) {
            Some(day) => days.push(day),
            None => errors.push(format!("Invalid day index {}", index)),
        }
    }

    let days = sort_days(&days);
    let nights = night_count(days.len());
    let contiguous = is_contiguous(&days);
    let within = nights >= listing.minimum_nights && nights <= listing.maximum_nights;
    let available = days.iter().all(|&day| listing.is_day_available(day));

    collect_errors(&mut errors, nights, contiguous, within, available, listing);

    ValidatorCheck {
        source: ValidatorSource::Golden,
        valid: errors.is_empty(),
        night_count: nights,
        is_contiguous: contiguous,
        within_night_bounds: within,
        all_days_available: available,
        errors,
    }
}

/// Independent validation over a seven-bit day mask.
fn workflow_check(indices: &[i64], listing: &ListingConfig) -> ValidatorCheck {
    let mut errors = Vec::new();
    let mut mask: u8 = 0;

    for &index in indices {
        if (0..7).contains(&index) {
            mask |= 1 << index;
        } else {
            errors.push(format!("Invalid day index {}", index));
        }
    }

    let selected = mask.count_ones();
    let nights = if mask == FULL_WEEK_MASK {
        7
    } else {
        selected.saturating_sub(1)
    };

    // A circular run has exactly one day whose predecessor is unselected.
    let run_starts = (0..7u8)
        .filter(|&d| mask & (1 << d) != 0 && mask & (1 << ((d + 6) % 7)) == 0)
        .count();
    let contiguous = mask == FULL_WEEK_MASK || run_starts == 1;

    let available_mask = listing
        .days_available
        .iter()
        .fold(0u8, |acc, day| acc | (1 << day.day_of_week()));
    let available = mask & !available_mask == 0;
    let within = (listing.minimum_nights..=listing.maximum_nights).contains(&nights);

    collect_errors(&mut errors, nights, contiguous, within, available, listing);

    ValidatorCheck {
        source: ValidatorSource::Workflow,
        valid: errors.is_empty(),
        night_count: nights,
        is_contiguous: contiguous,
        within_night_bounds: within,
        all_days_available: available,
        errors,
    }
}

fn collect_errors(
    errors: &mut Vec<String>,
    nights: u32,
    contiguous: bool,
    within: bool,
    available: bool,
    listing: &ListingConfig,
) {
    if !contiguous {
        errors.push("Selected days are not contiguous".to_string());
    }
    if !within {
        errors.push(format!(
            "{} nights is outside the allowed range {}-{}",
            nights, listing.minimum_nights, listing.maximum_nights
        ));
    }
    if !available {
        errors.push("Selection includes days the listing does not offer".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NightlyRates, RentalType, WeeksOffered};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn create_test_listing(minimum_nights: u32, maximum_nights: u32) -> ListingConfig {
        ListingConfig {
            id: "listing_001".to_string(),
            minimum_nights,
            maximum_nights,
            days_available: Weekday::ALL.to_vec(),
            rental_type: RentalType::Nightly,
            nightly_rates: NightlyRates::flat(Decimal::new(100, 0)),
            weekly_host_rate: None,
            monthly_host_rate: None,
            unit_markup: Decimal::ZERO,
            cleaning_fee: Decimal::ZERO,
            damage_deposit: Decimal::ZERO,
            weeks_offered: WeeksOffered::EveryWeek,
        }
    }

    #[test]
    fn test_valid_weekday_run() {
        let report = check_consistency(&[1, 2, 3, 4], &create_test_listing(2, 7));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Valid);
        assert_eq!(report.checks.len(), 2);
        assert!(report.checks.iter().all(|c| c.night_count == 3));
        assert!(report.summary.contains("agree"));
    }

    #[test]
    fn test_wrap_around_run_is_valid() {
        let report = check_consistency(&[4, 5, 6, 0], &create_test_listing(2, 7));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Valid);
    }

    #[test]
    fn test_non_contiguous_is_invalid() {
        let report = check_consistency(&[1, 2, 4, 5], &create_test_listing(2, 7));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Invalid);
        for check in &report.checks {
            assert!(!check.is_contiguous);
            assert!(check.errors.iter().any(|e| e.contains("contiguous")));
        }
    }

    #[test]
    fn test_night_bounds_are_checked() {
        let report = check_consistency(&[1, 2, 3, 4, 5, 6], &create_test_listing(2, 4));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Invalid);
        assert!(report.checks.iter().all(|c| !c.within_night_bounds));
    }

    #[test]
    fn test_full_week_counts_seven_nights() {
        let report = check_consistency(&[0, 1, 2, 3, 4, 5, 6], &create_test_listing(7, 7));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Valid);
        assert!(report.checks.iter().all(|c| c.night_count == 7));
    }

    #[test]
    fn test_unavailable_day_is_invalid() {
        let listing = ListingConfig {
            days_available: vec![Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday],
            ..create_test_listing(2, 7)
        };
        let report = check_consistency(&[1, 2, 3, 4], &listing);

        assert!(report.all_agree);
        assert!(report.checks.iter().all(|c| !c.all_days_available));
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        let report = check_consistency(&[1, 2, 9], &create_test_listing(1, 7));

        assert!(report.all_agree);
        assert_eq!(report.recommendation, Recommendation::Invalid);
        assert!(report
            .checks
            .iter()
            .all(|c| c.errors.iter().any(|e| e.contains("Invalid day index 9"))));
    }

    #[test]
    fn test_duplicate_indices_collapse() {
        let report = check_consistency(&[2, 2, 3, 3, 4], &create_test_listing(2, 7));

        assert!(report.all_agree);
        assert!(report.checks.iter().all(|c| c.night_count == 2));
    }

    #[test]
    fn test_recommendation_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&Recommendation::Valid).unwrap(),
            "\"VALID\""
        );
        assert_eq!(
            serde_json::to_string(&Recommendation::Invalid).unwrap(),
            "\"INVALID\""
        );
    }

    proptest! {
        #[test]
        fn validators_agree_on_every_subset(mask in 0u8..128, min in 1u32..=7, span in 0u32..=6) {
            let max = (min + span).min(7);
            let indices: Vec<i64> = (0..7).filter(|d| mask & (1 << d) != 0).collect();
            let report = check_consistency(&indices, &create_test_listing(min, max));
            prop_assert!(report.all_agree, "{}", report.summary);
        }

        #[test]
        fn validators_agree_with_stray_indices(indices in proptest::collection::vec(-3i64..10, 0..10)) {
            let report = check_consistency(&indices, &create_test_listing(2, 7));
            prop_assert!(report.all_agree, "{}", report.summary);
        }
    }
}
