//! Request types for the schedule engine API.
//!
//! Every request names its listing either inline (`listing`) or by the id of
//! a listing loaded from configuration (`listing_id`).

use serde::{Deserialize, Serialize};

use crate::models::{ListingConfig, Weekday};
use crate::schedule::{DEFAULT_RESERVATION_SPAN, SelectionSession};

fn default_reservation_span() -> u32 {
    DEFAULT_RESERVATION_SPAN
}

/// Request body for the `/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// An inline listing, used instead of `listing_id` when present.
    #[serde(default)]
    pub listing: Option<ListingConfig>,
    /// The id of a configured listing.
    #[serde(default)]
    pub listing_id: Option<String>,
    /// The selected days as `day_of_week` numbers (0 = Sunday).
    pub selected_days: Vec<Weekday>,
    /// The reservation span in weeks.
    #[serde(default = "default_reservation_span")]
    pub reservation_span: u32,
}

/// A change to apply to a selection session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "day")]
pub enum ScheduleAction {
    /// Add a day.
    Add(Weekday),
    /// Remove a day.
    Remove(Weekday),
    /// Add the day if unselected, otherwise remove it.
    Toggle(Weekday),
    /// Empty the selection and reset the warnings.
    Clear,
    /// Clear the current error.
    Dismiss,
    /// Only rebuild the snapshot.
    #[default]
    None,
}

/// Request body for the `/schedule` endpoint.
///
/// The session is returned with every response and sent back with the next
/// request, so the server keeps no per-guest state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// An inline listing, used instead of `listing_id` when present.
    #[serde(default)]
    pub listing: Option<ListingConfig>,
    /// The id of a configured listing.
    #[serde(default)]
    pub listing_id: Option<String>,
    /// The guest's session; a new session when absent.
    #[serde(default)]
    pub session: SelectionSession,
    /// The change to apply.
    #[serde(default)]
    pub action: ScheduleAction,
    /// The reservation span in weeks.
    #[serde(default = "default_reservation_span")]
    pub reservation_span: u32,
    /// Caps the maximum nights at five.
    #[serde(default)]
    pub limit_to_five_nights: bool,
}

/// Request body for the `/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// An inline listing, used instead of `listing_id` when present.
    #[serde(default)]
    pub listing: Option<ListingConfig>,
    /// The id of a configured listing.
    #[serde(default)]
    pub listing_id: Option<String>,
    /// Raw day indices, validated as-is.
    pub selected_days: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RentalType;

    #[test]
    fn test_deserialize_price_request_by_id() {
        let json = r#"{
            "listing_id": "listing_nightly",
            "selected_days": [1, 2, 3, 4]
        }"#;

        let request: PriceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.listing_id.as_deref(), Some("listing_nightly"));
        assert!(request.listing.is_none());
        assert_eq!(request.selected_days[0], Weekday::Monday);
        assert_eq!(request.reservation_span, DEFAULT_RESERVATION_SPAN);
    }

    #[test]
    fn test_deserialize_price_request_with_inline_listing() {
        let json = r#"{
            "listing": { "id": "inline", "rental_type": "weekly", "weekly_host_rate": "700" },
            "selected_days": [5, 6, 0],
            "reservation_span": 8
        }"#;

        let request: PriceRequest = serde_json::from_str(json).unwrap();
        let listing = request.listing.unwrap();
        assert_eq!(listing.rental_type, RentalType::Weekly);
        assert_eq!(request.reservation_span, 8);
    }

    #[test]
    fn test_out_of_range_day_is_rejected() {
        let json = r#"{ "listing_id": "x", "selected_days": [1, 9] }"#;
        let error = serde_json::from_str::<PriceRequest>(json).unwrap_err();
        assert!(error.to_string().contains("Invalid day of week: 9"));
    }

    #[test]
    fn test_deserialize_schedule_actions() {
        let toggle: ScheduleAction = serde_json::from_str(r#"{ "type": "toggle", "day": 3 }"#).unwrap();
        assert_eq!(toggle, ScheduleAction::Toggle(Weekday::Wednesday));

        let clear: ScheduleAction = serde_json::from_str(r#"{ "type": "clear" }"#).unwrap();
        assert_eq!(clear, ScheduleAction::Clear);
    }

    #[test]
    fn test_schedule_request_defaults() {
        let request: ScheduleRequest = serde_json::from_str(r#"{ "listing_id": "x" }"#).unwrap();

        assert_eq!(request.action, ScheduleAction::None);
        assert_eq!(request.session, SelectionSession::new());
        assert!(!request.limit_to_five_nights);
    }

    #[test]
    fn test_session_days_are_sorted_on_input() {
        let json = r#"{
            "listing_id": "x",
            "session": { "selected_days": [6, 1, 5, 0] }
        }"#;

        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.session.selected_days(),
            &[Weekday::Sunday, Weekday::Monday, Weekday::Friday, Weekday::Saturday]
        );
    }
}
