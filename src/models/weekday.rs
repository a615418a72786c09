//! Weekday and night models.
//!
//! This module defines the seven canonical [`Weekday`] values and the
//! [`Night`] that follows each of them. Day numbering starts at Sunday (0)
//! and ends at Saturday (6), matching the booking calendar used by hosts.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A day of the week, numbered from Sunday (0) to Saturday (6).
///
/// Ordering follows the numeric `day_of_week` value, so sorting a selection
/// always yields Sunday first.
///
/// # Example
///
/// ```
/// use schedule_engine::models::Weekday;
///
/// assert_eq!(Weekday::Friday.day_of_week(), 5);
/// assert_eq!(Weekday::Friday.name(), "Friday");
/// assert_eq!(Weekday::Friday.abbreviation(), "Fri");
/// assert!(Weekday::Sunday < Weekday::Saturday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    /// Sunday (0).
    Sunday,
    /// Monday (1).
    Monday,
    /// Tuesday (2).
    Tuesday,
    /// Wednesday (3).
    Wednesday,
    /// Thursday (4).
    Thursday,
    /// Friday (5).
    Friday,
    /// Saturday (6).
    Saturday,
}

impl Weekday {
    /// All seven weekdays in ascending `day_of_week` order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Returns the numeric day of the week (0 = Sunday).
    pub fn day_of_week(self) -> u8 {
        self as u8
    }

    /// Looks up a weekday by its numeric index.
    ///
    /// Returns `None` for values outside `0..=6`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Returns the full English name of the day.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Returns the three-letter abbreviation of the day.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }

    /// Returns the preceding day, wrapping Sunday to Saturday.
    pub fn previous(self) -> Self {
        Self::ALL[(usize::from(self.day_of_week()) + 6) % 7]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for Weekday {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(EngineError::InvalidDayOfWeek {
            value: i64::from(value),
        })
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.day_of_week()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // num_days_from_sunday is always in 0..=6
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

/// The night that follows a given weekday.
///
/// A stay checking in on Friday and out on Monday occupies the Friday,
/// Saturday and Sunday nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Night {
    /// The night number, equal to the `day_of_week` of the day it follows.
    pub night_number: u8,
    /// The weekday this night follows.
    pub follows: Weekday,
}

impl Night {
    /// Creates the night following `day`.
    pub fn following(day: Weekday) -> Self {
        Self {
            night_number: day.day_of_week(),
            follows: day,
        }
    }
}

/// A weekday flagged with whether the host allows it to be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOption {
    /// The weekday.
    pub weekday: Weekday,
    /// Whether the listing offers this day.
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_numbering_starts_at_sunday() {
        assert_eq!(Weekday::Sunday.day_of_week(), 0);
        assert_eq!(Weekday::Wednesday.day_of_week(), 3);
        assert_eq!(Weekday::Saturday.day_of_week(), 6);
    }

    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert_eq!(Weekday::from_index(4), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_previous_wraps_around_the_week() {
        assert_eq!(Weekday::Sunday.previous(), Weekday::Saturday);
        assert_eq!(Weekday::Wednesday.previous(), Weekday::Tuesday);
    }

    #[test]
    fn test_abbreviations() {
        let abbreviations: Vec<&str> = Weekday::ALL.iter().map(|d| d.abbreviation()).collect();
        assert_eq!(
            abbreviations,
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
    }

    #[test]
    fn test_from_chrono_weekday() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
    }

    #[test]
    fn test_weekday_serializes_as_index() {
        let json = serde_json::to_string(&Weekday::Friday).unwrap();
        assert_eq!(json, "5");

        let day: Weekday = serde_json::from_str("0").unwrap();
        assert_eq!(day, Weekday::Sunday);
    }

    #[test]
    fn test_weekday_deserialization_rejects_invalid_index() {
        let result: Result<Weekday, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }

    #[test]
    fn test_night_number_matches_day() {
        let night = Night::following(Weekday::Saturday);
        assert_eq!(night.night_number, 6);
        assert_eq!(night.follows, Weekday::Saturday);
    }
}
