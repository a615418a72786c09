//! Configuration types for pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shared markup and discount constants applied to every listing's price
/// (the "ZAT" configuration).
///
/// Missing fields in `pricing.yaml` take their default values, and the
/// whole default configuration is used when the file is unavailable.
///
/// # Example
///
/// ```
/// use schedule_engine::config::PriceConfig;
/// use rust_decimal::Decimal;
///
/// let config = PriceConfig::default();
/// assert_eq!(config.overall_site_markup, Decimal::new(17, 2));
/// assert_eq!(config.avg_days_per_month, Decimal::new(304, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Site-wide markup applied to every rental model.
    pub overall_site_markup: Decimal,
    /// Additional markup for the weekly rental model.
    pub weekly_markup: Decimal,
    /// Discount for 7-night stays under the nightly model.
    pub full_time_discount: Decimal,
    /// Discount per night of the week left unbooked.
    pub unused_nights_discount_multiplier: Decimal,
    /// Average number of days in a month, used to convert monthly rates.
    pub avg_days_per_month: Decimal,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            overall_site_markup: Decimal::new(17, 2),
            weekly_markup: Decimal::ZERO,
            full_time_discount: Decimal::new(13, 2),
            unused_nights_discount_multiplier: Decimal::new(3, 2),
            avg_days_per_month: Decimal::new(304, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_values() {
        let config = PriceConfig::default();
        assert_eq!(config.overall_site_markup, dec("0.17"));
        assert_eq!(config.weekly_markup, dec("0"));
        assert_eq!(config.full_time_discount, dec("0.13"));
        assert_eq!(config.unused_nights_discount_multiplier, dec("0.03"));
        assert_eq!(config.avg_days_per_month, dec("30.4"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults_for_missing_fields() {
        let yaml = "weekly_markup: \"0.05\"\n";
        let config: PriceConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.weekly_markup, dec("0.05"));
        assert_eq!(config.overall_site_markup, dec("0.17"));
        assert_eq!(config.avg_days_per_month, dec("30.4"));
    }
}
