//! Contiguity rule for weekday selections.

use crate::models::Weekday;

use super::sort_days;

/// Returns true if the selection forms one unbroken run of days.
///
/// Consecutive sorted days must differ by exactly one. A selection holding
/// both Sunday and Saturday may instead contain a single gap, because the
/// Saturday to Sunday transition closes the run around the week boundary.
/// An empty selection is not contiguous; a single day and the full week are.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday::*;
/// use schedule_engine::schedule::is_contiguous;
///
/// assert!(is_contiguous(&[Monday, Tuesday, Wednesday]));
/// assert!(is_contiguous(&[Friday, Saturday, Sunday, Monday]));
/// assert!(!is_contiguous(&[Monday, Wednesday]));
/// ```
pub fn is_contiguous(selection: &[Weekday]) -> bool {
    let sorted = sort_days(selection);

    match sorted.len() {
        0 => false,
        1 => true,
        n if n == Weekday::ALL.len() => true,
        _ => {
            let gaps = count_gaps(&sorted);
            gaps == 0 || (wraps_week_boundary(&sorted) && gaps == 1)
        }
    }
}

/// Returns true if a sorted, partial-week selection holds both Sunday and
/// Saturday.
pub fn wraps_week_boundary(sorted: &[Weekday]) -> bool {
    sorted.len() < Weekday::ALL.len()
        && sorted.first() == Some(&Weekday::Sunday)
        && sorted.last() == Some(&Weekday::Saturday)
}

/// Counts the places where consecutive sorted days are not adjacent.
fn count_gaps(sorted: &[Weekday]) -> usize {
    sorted
        .windows(2)
        .filter(|pair| pair[1].day_of_week() - pair[0].day_of_week() > 1)
        .count()
}
