//! Listing configuration model.
//!
//! A [`ListingConfig`] is supplied by the host page for every listing and
//! carries the night bounds, bookable days, rental model and host rates the
//! engine needs to validate a selection and price it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::Weekday;

/// The rental model a listing is priced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalType {
    /// Priced from per-night host rates that vary with the number of nights.
    Nightly,
    /// Priced from a single weekly host rate prorated across the nights.
    Weekly,
    /// Priced from a monthly host rate converted to a weekly figure.
    Monthly,
}

impl std::fmt::Display for RentalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalType::Nightly => write!(f, "Nightly"),
            RentalType::Weekly => write!(f, "Weekly"),
            RentalType::Monthly => write!(f, "Monthly"),
        }
    }
}

/// The recurring weekly availability pattern a host offers.
///
/// Hosts enter this as free text. It is parsed once, case-insensitively,
/// when the listing is deserialized; text that matches no known pattern is
/// treated as [`WeeksOffered::EveryWeek`].
///
/// # Example
///
/// ```
/// use schedule_engine::models::WeeksOffered;
///
/// assert_eq!(WeeksOffered::parse("One week on, one week off"), WeeksOffered::OneOnOneOff);
/// assert_eq!(WeeksOffered::parse("one week on/three weeks off"), WeeksOffered::OneOnThreeOff);
/// assert_eq!(WeeksOffered::parse("EVERY WEEK"), WeeksOffered::EveryWeek);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeeksOffered {
    /// Available every week.
    #[default]
    EveryWeek,
    /// One week on, one week off.
    OneOnOneOff,
    /// Two weeks on, two weeks off.
    TwoOnTwoOff,
    /// One week on, three weeks off.
    OneOnThreeOff,
}

impl WeeksOffered {
    /// Parses a host-entered pattern description.
    pub fn parse(text: &str) -> Self {
        match Self::try_parse(text) {
            Some(pattern) => pattern,
            None => {
                warn!(weeks_offered = %text, "Unrecognised weeks offered pattern, using every week");
                WeeksOffered::EveryWeek
            }
        }
    }

    /// Parses a pattern description, returning `None` when nothing matches.
    pub fn try_parse(text: &str) -> Option<Self> {
        let text = text.to_lowercase().replace(['_', '-'], " ");

        if text.contains("every week") {
            Some(WeeksOffered::EveryWeek)
        } else if text.contains("one week on") && text.contains("three weeks off") {
            Some(WeeksOffered::OneOnThreeOff)
        } else if text.contains("one week on") && text.contains("one week off") {
            Some(WeeksOffered::OneOnOneOff)
        } else if text.contains("two weeks on") && text.contains("two weeks off") {
            Some(WeeksOffered::TwoOnTwoOff)
        } else {
            None
        }
    }

    /// Returns the canonical description of the pattern.
    pub fn as_str(self) -> &'static str {
        match self {
            WeeksOffered::EveryWeek => "Every week",
            WeeksOffered::OneOnOneOff => "One week on, one week off",
            WeeksOffered::TwoOnTwoOff => "Two weeks on, two weeks off",
            WeeksOffered::OneOnThreeOff => "One week on, three weeks off",
        }
    }

    /// The length in weeks of one repetition of the pattern, used to
    /// divide the nominal four-week rent.
    pub fn schedule_period(self) -> u32 {
        match self {
            WeeksOffered::EveryWeek => 1,
            WeeksOffered::OneOnOneOff => 2,
            WeeksOffered::TwoOnTwoOff => 2,
            WeeksOffered::OneOnThreeOff => 4,
        }
    }

    /// The number of occupied weeks within any four-week span.
    pub fn occupied_weeks_per_four_weeks(self) -> u32 {
        match self {
            WeeksOffered::EveryWeek => 4,
            WeeksOffered::OneOnOneOff => 2,
            WeeksOffered::TwoOnTwoOff => 2,
            WeeksOffered::OneOnThreeOff => 1,
        }
    }
}

impl From<String> for WeeksOffered {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<WeeksOffered> for String {
    fn from(pattern: WeeksOffered) -> Self {
        pattern.as_str().to_string()
    }
}

impl std::fmt::Display for WeeksOffered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host rates for the nightly rental model, one per night count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyRates {
    /// Host rate per night for a 2-night stay.
    #[serde(default)]
    pub two_nights: Option<Decimal>,
    /// Host rate per night for a 3-night stay.
    #[serde(default)]
    pub three_nights: Option<Decimal>,
    /// Host rate per night for a 4-night stay.
    #[serde(default)]
    pub four_nights: Option<Decimal>,
    /// Host rate per night for a 5-night stay.
    #[serde(default)]
    pub five_nights: Option<Decimal>,
    /// Host rate per night for a 6-night stay.
    #[serde(default)]
    pub six_nights: Option<Decimal>,
    /// Host rate per night for a full-time (7-night) stay.
    #[serde(default)]
    pub seven_nights: Option<Decimal>,
}

impl NightlyRates {
    /// Creates rates with the same host rate for every night count.
    pub fn flat(rate: Decimal) -> Self {
        Self {
            two_nights: Some(rate),
            three_nights: Some(rate),
            four_nights: Some(rate),
            five_nights: Some(rate),
            six_nights: Some(rate),
            seven_nights: Some(rate),
        }
    }

    /// Returns the host rate for an exact night count.
    ///
    /// Night counts without a dedicated rate fall back to the 4-night rate.
    pub fn for_nights(&self, nights: u32) -> Option<Decimal> {
        let exact = match nights {
            2 => self.two_nights,
            3 => self.three_nights,
            4 => self.four_nights,
            5 => self.five_nights,
            6 => self.six_nights,
            7 => self.seven_nights,
            _ => None,
        };
        exact.or(self.four_nights)
    }
}

fn default_minimum_nights() -> u32 {
    2
}

fn default_maximum_nights() -> u32 {
    7
}

fn default_days_available() -> Vec<Weekday> {
    Weekday::ALL.to_vec()
}

/// Configuration of a single listing, as supplied by the host page.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{ListingConfig, RentalType, WeeksOffered};
///
/// let json = r#"{
///     "id": "listing_001",
///     "rental_type": "weekly",
///     "weekly_host_rate": "700.00",
///     "weeks_offered": "One week on, one week off"
/// }"#;
///
/// let listing: ListingConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(listing.rental_type, RentalType::Weekly);
/// assert_eq!(listing.weeks_offered, WeeksOffered::OneOnOneOff);
/// assert_eq!(listing.minimum_nights, 2);
/// assert_eq!(listing.days_available.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Identifier of the listing.
    #[serde(default)]
    pub id: String,
    /// The fewest nights a guest may book.
    #[serde(default = "default_minimum_nights")]
    pub minimum_nights: u32,
    /// The most nights a guest may book.
    #[serde(default = "default_maximum_nights")]
    pub maximum_nights: u32,
    /// The weekdays the host allows guests to select.
    #[serde(default = "default_days_available")]
    pub days_available: Vec<Weekday>,
    /// The rental model used to price the listing.
    pub rental_type: RentalType,
    /// Per-night-count host rates (nightly model).
    #[serde(default)]
    pub nightly_rates: NightlyRates,
    /// Host rate for a whole week (weekly model).
    #[serde(default)]
    pub weekly_host_rate: Option<Decimal>,
    /// Host rate for a whole month (monthly model).
    #[serde(default)]
    pub monthly_host_rate: Option<Decimal>,
    /// Listing-specific markup as a fraction (0.05 = 5%).
    #[serde(default)]
    pub unit_markup: Decimal,
    /// One-off cleaning fee charged with the initial payment.
    #[serde(default)]
    pub cleaning_fee: Decimal,
    /// Refundable damage deposit charged with the initial payment.
    #[serde(default)]
    pub damage_deposit: Decimal,
    /// The recurring weekly pattern the host offers.
    #[serde(default)]
    pub weeks_offered: WeeksOffered,
}

impl ListingConfig {
    /// Returns true if the host allows `day` to be selected.
    pub fn is_day_available(&self, day: Weekday) -> bool {
        self.days_available.contains(&day)
    }

    /// Checks the listing for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidListing`] when the night bounds are
    /// inverted or out of range, no day is available, or a monetary amount
    /// is negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |field: &str, message: String| EngineError::InvalidListing {
            listing_id: self.id.clone(),
            field: field.to_string(),
            message,
        };

        if self.minimum_nights > self.maximum_nights {
            return Err(invalid(
                "minimum_nights",
                format!(
                    "minimum nights ({}) exceeds maximum nights ({})",
                    self.minimum_nights, self.maximum_nights
                ),
            ));
        }
        if self.maximum_nights > 7 {
            return Err(invalid(
                "maximum_nights",
                format!("maximum nights ({}) exceeds 7", self.maximum_nights),
            ));
        }
        if self.days_available.is_empty() {
            return Err(invalid(
                "days_available",
                "at least one day must be available".to_string(),
            ));
        }

        let amounts = [
            ("unit_markup", Some(self.unit_markup)),
            ("cleaning_fee", Some(self.cleaning_fee)),
            ("damage_deposit", Some(self.damage_deposit)),
            ("weekly_host_rate", self.weekly_host_rate),
            ("monthly_host_rate", self.monthly_host_rate),
        ];
        for (field, amount) in amounts {
            if amount.is_some_and(|a| a.is_sign_negative() && !a.is_zero()) {
                return Err(invalid(field, "cannot be negative".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_listing() -> ListingConfig {
        ListingConfig {
            id: "listing_001".to_string(),
            minimum_nights: 2,
            maximum_nights: 7,
            days_available: Weekday::ALL.to_vec(),
            rental_type: RentalType::Nightly,
            nightly_rates: NightlyRates::flat(dec("100")),
            weekly_host_rate: None,
            monthly_host_rate: None,
            unit_markup: dec("0.05"),
            cleaning_fee: dec("50"),
            damage_deposit: dec("500"),
            weeks_offered: WeeksOffered::EveryWeek,
        }
    }

    #[test]
    fn test_weeks_offered_parses_known_patterns() {
        assert_eq!(WeeksOffered::parse("Every week"), WeeksOffered::EveryWeek);
        assert_eq!(
            WeeksOffered::parse("one week on/one week off"),
            WeeksOffered::OneOnOneOff
        );
        assert_eq!(
            WeeksOffered::parse("Two Weeks On / Two Weeks Off"),
            WeeksOffered::TwoOnTwoOff
        );
        assert_eq!(
            WeeksOffered::parse("One week on, three weeks off"),
            WeeksOffered::OneOnThreeOff
        );
    }

    #[test]
    fn test_weeks_offered_accepts_snake_case() {
        assert_eq!(
            WeeksOffered::try_parse("one_week_on_one_week_off"),
            Some(WeeksOffered::OneOnOneOff)
        );
    }

    #[test]
    fn test_weeks_offered_unknown_falls_back_to_every_week() {
        assert_eq!(WeeksOffered::try_parse("weekends only"), None);
        assert_eq!(WeeksOffered::parse("weekends only"), WeeksOffered::EveryWeek);
    }

    #[test]
    fn test_schedule_period_and_occupied_weeks() {
        let table = [
            (WeeksOffered::EveryWeek, 1, 4),
            (WeeksOffered::OneOnOneOff, 2, 2),
            (WeeksOffered::TwoOnTwoOff, 2, 2),
            (WeeksOffered::OneOnThreeOff, 4, 1),
        ];
        for (pattern, period, occupied) in table {
            assert_eq!(pattern.schedule_period(), period, "{pattern}");
            assert_eq!(pattern.occupied_weeks_per_four_weeks(), occupied, "{pattern}");
        }
    }

    #[test]
    fn test_weeks_offered_serializes_as_canonical_text() {
        let json = serde_json::to_string(&WeeksOffered::TwoOnTwoOff).unwrap();
        assert_eq!(json, "\"Two weeks on, two weeks off\"");
    }

    #[test]
    fn test_nightly_rates_exact_match() {
        let rates = NightlyRates {
            two_nights: Some(dec("150")),
            three_nights: Some(dec("140")),
            four_nights: Some(dec("130")),
            five_nights: Some(dec("120")),
            six_nights: Some(dec("110")),
            seven_nights: Some(dec("100")),
        };
        assert_eq!(rates.for_nights(2), Some(dec("150")));
        assert_eq!(rates.for_nights(7), Some(dec("100")));
    }

    #[test]
    fn test_nightly_rates_fall_back_to_four_nights() {
        let rates = NightlyRates {
            four_nights: Some(dec("130")),
            ..NightlyRates::default()
        };
        assert_eq!(rates.for_nights(6), Some(dec("130")));
        assert_eq!(rates.for_nights(1), Some(dec("130")));
    }

    #[test]
    fn test_nightly_rates_missing_everything() {
        assert_eq!(NightlyRates::default().for_nights(3), None);
    }

    #[test]
    fn test_valid_listing_passes_validation() {
        assert!(create_test_listing().validate().is_ok());
    }

    #[test]
    fn test_inverted_night_bounds_rejected() {
        let listing = ListingConfig {
            minimum_nights: 5,
            maximum_nights: 3,
            ..create_test_listing()
        };
        match listing.validate() {
            Err(EngineError::InvalidListing { field, .. }) => assert_eq!(field, "minimum_nights"),
            other => panic!("Expected InvalidListing error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cleaning_fee_rejected() {
        let listing = ListingConfig {
            cleaning_fee: dec("-1"),
            ..create_test_listing()
        };
        match listing.validate() {
            Err(EngineError::InvalidListing { field, .. }) => assert_eq!(field, "cleaning_fee"),
            other => panic!("Expected InvalidListing error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_available_days_rejected() {
        let listing = ListingConfig {
            days_available: vec![],
            ..create_test_listing()
        };
        assert!(listing.validate().is_err());
    }

    #[test]
    fn test_is_day_available() {
        let listing = ListingConfig {
            days_available: vec![Weekday::Monday, Weekday::Tuesday],
            ..create_test_listing()
        };
        assert!(listing.is_day_available(Weekday::Monday));
        assert!(!listing.is_day_available(Weekday::Sunday));
    }

    #[test]
    fn test_deserialize_nightly_listing_from_json() {
        let json = r#"{
            "id": "listing_002",
            "minimum_nights": 3,
            "maximum_nights": 5,
            "days_available": [1, 2, 3, 4, 5],
            "rental_type": "nightly",
            "nightly_rates": { "four_nights": "125.00" },
            "unit_markup": "0.05",
            "cleaning_fee": "75",
            "damage_deposit": "300",
            "weeks_offered": "Every week"
        }"#;

        let listing: ListingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(listing.minimum_nights, 3);
        assert_eq!(listing.days_available.len(), 5);
        assert_eq!(listing.nightly_rates.for_nights(5), Some(dec("125.00")));
        assert_eq!(listing.unit_markup, dec("0.05"));
    }
}
