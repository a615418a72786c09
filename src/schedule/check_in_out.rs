//! Check-in and check-out resolution.
//!
//! Derives the check-in day, check-out day and the nights of a stay from a
//! weekday selection, including selections that wrap from Saturday into
//! Sunday.

use serde::{Deserialize, Serialize};

use crate::models::{Night, Weekday};

use super::{night_count, sort_days, wraps_week_boundary};

/// The check-in and check-out days derived from a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOut {
    /// The day the guest arrives.
    pub check_in: Weekday,
    /// The last selected day of the stay.
    pub check_out: Weekday,
    /// Night number of the first night (the check-in day).
    pub start_night: u8,
    /// Night number of the last night of the stay.
    pub end_night: u8,
    /// Number of nights in the stay.
    pub night_count: u32,
    /// Whether the stay crosses the Saturday to Sunday boundary.
    pub wraps_around: bool,
}

/// Resolves check-in and check-out for a selection.
///
/// Returns `None` for an empty selection. Without wrap-around, check-in is
/// the earliest selected day and check-out the latest. When the selection
/// holds both Saturday and Sunday but not the whole week, check-in is the
/// first day after the gap and check-out the last day before it.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday::*;
/// use schedule_engine::schedule::resolve_check_in_out;
///
/// let stay = resolve_check_in_out(&[Friday, Saturday, Sunday, Monday]).unwrap();
/// assert_eq!(stay.check_in, Friday);
/// assert_eq!(stay.check_out, Monday);
/// assert_eq!(stay.night_count, 3);
/// ```
pub fn resolve_check_in_out(selection: &[Weekday]) -> Option<CheckInOut> {
    let sorted = sort_days(selection);
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    let nights = night_count(sorted.len());

    let gap_index = if wraps_week_boundary(&sorted) {
        sorted
            .windows(2)
            .position(|pair| pair[1].day_of_week() - pair[0].day_of_week() > 1)
            .map(|i| i + 1)
    } else {
        None
    };

    let (check_in, check_out) = match gap_index {
        Some(index) => (sorted[index], sorted[index - 1]),
        None => (first, last),
    };

    let end_night = if nights == 0 {
        check_in
    } else if sorted.len() == Weekday::ALL.len() {
        Weekday::Saturday
    } else {
        check_out.previous()
    };

    Some(CheckInOut {
        check_in,
        check_out,
        start_night: check_in.day_of_week(),
        end_night: end_night.day_of_week(),
        night_count: nights,
        wraps_around: gap_index.is_some(),
    })
}

/// Returns the nights of the stay in stay order, starting at check-in.
///
/// Every selected day except the check-out day contributes its following
/// night; a full week contributes all seven.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday::*;
/// use schedule_engine::schedule::nights_for_selection;
///
/// let nights = nights_for_selection(&[Sunday, Monday, Friday, Saturday]);
/// let numbers: Vec<u8> = nights.iter().map(|n| n.night_number).collect();
/// assert_eq!(numbers, vec![5, 6, 0]);
/// ```
pub fn nights_for_selection(selection: &[Weekday]) -> Vec<Night> {
    let sorted = sort_days(selection);
    let Some(stay) = resolve_check_in_out(&sorted) else {
        return vec![];
    };

    if sorted.len() == Weekday::ALL.len() {
        return Weekday::ALL.iter().map(|&day| Night::following(day)).collect();
    }

    let start = sorted
        .iter()
        .position(|&day| day == stay.check_in)
        .unwrap_or(0);

    let mut in_stay_order = sorted[start..].to_vec();
    in_stay_order.extend_from_slice(&sorted[..start]);
    in_stay_order.pop();

    in_stay_order.into_iter().map(Night::following).collect()
}
