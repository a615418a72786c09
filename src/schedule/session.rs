//! Per-guest selection session.
//!
//! A [`SelectionSession`] owns one guest's weekday selection together with
//! the one-time warning flags and the current error state. Sessions are
//! plain values: concurrent guests each own their own session, and the HTTP
//! API round-trips the session through every request.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::models::{ErrorState, ListingConfig, SelectionErrorKind, Weekday};

use super::{check_consistency, is_contiguous, night_count, sort_days};

/// Nights a selection may never drop below by removing days.
pub const ABSOLUTE_MINIMUM_NIGHTS: u32 = 2;

/// Maximum nights when the five-night limit is in effect.
pub const FIVE_NIGHT_LIMIT: u32 = 5;

/// Returns the night cap for additions and acceptance.
///
/// The five-night limit replaces the listing's maximum outright, so a
/// listing capped below five nights still allows five when it is on.
pub fn effective_maximum_nights(listing: &ListingConfig, limit_to_five_nights: bool) -> u32 {
    if limit_to_five_nights {
        FIVE_NIGHT_LIMIT
    } else {
        listing.maximum_nights
    }
}

/// The result of a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error_type")]
pub enum SelectionOutcome {
    /// The day was added to the selection.
    Added,
    /// The day was removed from the selection.
    Removed,
    /// The request did not change the selection.
    Unchanged,
    /// The change was refused; the session's error state explains why.
    Rejected(SelectionErrorKind),
}

impl SelectionOutcome {
    /// Returns true unless the change was rejected.
    pub fn is_accepted(self) -> bool {
        !matches!(self, SelectionOutcome::Rejected(_))
    }
}

fn deserialize_sorted_days<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = Vec::<Weekday>::deserialize(deserializer)?;
    Ok(sort_days(&days))
}

/// One guest's selection, warning flags and error state.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{ListingConfig, SelectionErrorKind, Weekday};
/// use schedule_engine::schedule::{SelectionOutcome, SelectionSession};
///
/// let listing: ListingConfig = serde_json::from_str(
///     r#"{ "rental_type": "nightly", "maximum_nights": 3 }"#,
/// ).unwrap();
///
/// let mut session = SelectionSession::with_days(&[
///     Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday,
/// ]);
///
/// // The first attempt past the maximum is refused with a warning...
/// let outcome = session.add_day(Weekday::Friday, &listing, false);
/// assert_eq!(outcome, SelectionOutcome::Rejected(SelectionErrorKind::MaximumNightsWarning));
///
/// // ...and the identical retry is allowed.
/// assert_eq!(session.add_day(Weekday::Friday, &listing, false), SelectionOutcome::Added);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSession {
    #[serde(default, deserialize_with = "deserialize_sorted_days")]
    selected_days: Vec<Weekday>,
    #[serde(default)]
    max_nights_warning_shown: bool,
    #[serde(default)]
    min_nights_warning_shown: bool,
    #[serde(default)]
    error_state: ErrorState,
}

impl SelectionSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with an initial selection and no warnings shown.
    pub fn with_days(days: &[Weekday]) -> Self {
        Self {
            selected_days: sort_days(days),
            ..Self::default()
        }
    }

    /// The selected days, sorted by `day_of_week`.
    pub fn selected_days(&self) -> &[Weekday] {
        &self.selected_days
    }

    /// Whether `day` is currently selected.
    pub fn contains(&self, day: Weekday) -> bool {
        self.selected_days.contains(&day)
    }

    /// Whether the maximum-nights warning has been shown.
    pub fn max_nights_warning_shown(&self) -> bool {
        self.max_nights_warning_shown
    }

    /// Whether the minimum-nights warning has been shown.
    pub fn min_nights_warning_shown(&self) -> bool {
        self.min_nights_warning_shown
    }

    /// The current error state.
    pub fn error_state(&self) -> &ErrorState {
        &self.error_state
    }

    /// Adds `day` to the selection.
    ///
    /// Unavailable days are refused. Exceeding the maximum nights (five when
    /// `limit_to_five_nights` is set) is refused once with a warning and
    /// allowed on every later attempt until the selection is cleared.
    pub fn add_day(
        &mut self,
        day: Weekday,
        listing: &ListingConfig,
        limit_to_five_nights: bool,
    ) -> SelectionOutcome {
        if self.contains(day) {
            self.error_state = ErrorState::none();
            return SelectionOutcome::Unchanged;
        }

        if !listing.is_day_available(day) {
            return self.reject(
                SelectionErrorKind::Availability,
                format!("{} is not available for this listing", day),
            );
        }

        let effective_max = effective_maximum_nights(listing, limit_to_five_nights);
        let nights_after = night_count(self.selected_days.len() + 1);

        if nights_after > effective_max {
            if !self.max_nights_warning_shown {
                self.max_nights_warning_shown = true;
                return self.reject(
                    SelectionErrorKind::MaximumNightsWarning,
                    format!(
                        "This listing allows a maximum of {} nights. Select {} again to continue anyway.",
                        effective_max, day
                    ),
                );
            }
            debug!(
                day = %day,
                nights = nights_after,
                maximum_nights = effective_max,
                "Maximum nights warning already shown, allowing"
            );
        }

        self.selected_days.push(day);
        self.selected_days.sort();
        self.error_state = ErrorState::none();

        debug!(
            day = %day,
            selected = self.selected_days.len(),
            "Day added to selection"
        );

        let indices: Vec<i64> = self
            .selected_days
            .iter()
            .map(|d| i64::from(d.day_of_week()))
            .collect();
        check_consistency(&indices, listing).emit(&indices);

        SelectionOutcome::Added
    }

    /// Removes `day` from the selection.
    ///
    /// Removal is refused when fewer than two nights would remain (always),
    /// when the remaining days would no longer be contiguous (always), and
    /// once with a warning when the remaining nights fall below the
    /// listing's minimum.
    pub fn remove_day(&mut self, day: Weekday, listing: &ListingConfig) -> SelectionOutcome {
        if !self.contains(day) {
            self.error_state = ErrorState::none();
            return SelectionOutcome::Unchanged;
        }

        let remaining_days = self.selected_days.len() - 1;
        let remaining_nights = remaining_days.saturating_sub(1) as u32;

        if remaining_nights < ABSOLUTE_MINIMUM_NIGHTS {
            return self.reject(
                SelectionErrorKind::AbsoluteMinimum,
                format!(
                    "A stay must include at least {} nights",
                    ABSOLUTE_MINIMUM_NIGHTS
                ),
            );
        }

        let remainder: Vec<Weekday> = self
            .selected_days
            .iter()
            .copied()
            .filter(|&d| d != day)
            .collect();

        if !is_contiguous(&remainder) {
            return self.reject(
                SelectionErrorKind::Contiguity,
                format!("Removing {} would split your stay. Please keep consecutive days.", day),
            );
        }

        if remaining_nights < listing.minimum_nights {
            if !self.min_nights_warning_shown {
                self.min_nights_warning_shown = true;
                return self.reject(
                    SelectionErrorKind::MinimumNightsWarning,
                    format!(
                        "This listing requires a minimum of {} nights. Remove {} again to continue anyway.",
                        listing.minimum_nights, day
                    ),
                );
            }
            debug!(
                day = %day,
                nights = remaining_nights,
                minimum_nights = listing.minimum_nights,
                "Minimum nights warning already shown, allowing"
            );
        }

        self.selected_days = remainder;
        self.error_state = ErrorState::none();

        debug!(
            day = %day,
            selected = self.selected_days.len(),
            "Day removed from selection"
        );

        SelectionOutcome::Removed
    }

    /// Adds `day` if it is not selected, otherwise removes it.
    pub fn toggle_day(
        &mut self,
        day: Weekday,
        listing: &ListingConfig,
        limit_to_five_nights: bool,
    ) -> SelectionOutcome {
        if self.contains(day) {
            self.remove_day(day, listing)
        } else {
            self.add_day(day, listing, limit_to_five_nights)
        }
    }

    /// Empties the selection and resets the warning flags and error state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Clears the current error without changing the selection.
    pub fn dismiss_error(&mut self) {
        self.error_state = ErrorState::none();
    }

    fn reject(&mut self, kind: SelectionErrorKind, message: String) -> SelectionOutcome {
        if kind.is_warning() {
            debug!(error_type = %kind, message = %message, "Selection change needs confirmation");
        } else {
            warn!(error_type = %kind, message = %message, "Selection change rejected");
        }
        self.error_state = ErrorState::new(kind, message);
        SelectionOutcome::Rejected(kind)
    }
}
