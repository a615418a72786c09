//! Day and night derivation.
//!
//! Pure helpers that turn a listing's available days and a guest's selection
//! into the canonical sorted form every other validator relies on.

use crate::models::{DayOption, Weekday};

/// Number of nights in a full-time (all seven days) stay.
pub const FULL_WEEK_NIGHTS: u32 = 7;

/// Returns all seven weekdays in ascending order, each flagged with whether
/// the listing offers it.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday;
/// use schedule_engine::schedule::create_all_days;
///
/// let days = create_all_days(&[Weekday::Monday, Weekday::Tuesday]);
/// assert_eq!(days.len(), 7);
/// assert_eq!(days[0].weekday, Weekday::Sunday);
/// assert!(!days[0].is_available);
/// assert!(days[1].is_available);
/// ```
pub fn create_all_days(days_available: &[Weekday]) -> Vec<DayOption> {
    Weekday::ALL
        .iter()
        .map(|&weekday| DayOption {
            weekday,
            is_available: days_available.contains(&weekday),
        })
        .collect()
}

/// Sorts a selection by `day_of_week` ascending, dropping duplicates.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday;
/// use schedule_engine::schedule::sort_days;
///
/// let sorted = sort_days(&[Weekday::Saturday, Weekday::Monday, Weekday::Saturday]);
/// assert_eq!(sorted, vec![Weekday::Monday, Weekday::Saturday]);
/// ```
pub fn sort_days(selection: &[Weekday]) -> Vec<Weekday> {
    let mut sorted = selection.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Returns the number of nights covered by `day_count` selected days.
///
/// A run of *k* days covers *k − 1* nights, except a full week which covers
/// all seven nights.
///
/// # Example
///
/// ```
/// use schedule_engine::schedule::night_count;
///
/// assert_eq!(night_count(0), 0);
/// assert_eq!(night_count(1), 0);
/// assert_eq!(night_count(4), 3);
/// assert_eq!(night_count(7), 7);
/// ```
pub fn night_count(day_count: usize) -> u32 {
    if day_count >= Weekday::ALL.len() {
        FULL_WEEK_NIGHTS
    } else {
        day_count.saturating_sub(1) as u32
    }
}
