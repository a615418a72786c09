//! Schedule state aggregation.
//!
//! A [`ScheduleSnapshot`] combines the selection, derived nights, check-in
//! and check-out, validation flags and the price into one owned value. Every
//! change produces a new snapshot; earlier snapshots are never touched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PriceConfig;
use crate::models::{DayOption, ErrorState, ListingConfig, Night, PriceBreakdown, Weekday};
use crate::pricing::calculate_price;

use super::{
    SelectionOutcome, SelectionSession, create_all_days, effective_maximum_nights, is_contiguous,
    nights_for_selection, resolve_check_in_out,
};

/// Reservation span used when the caller has not chosen one.
pub const DEFAULT_RESERVATION_SPAN: u32 = 13;

/// The complete schedule state for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// All seven weekdays with their availability.
    pub days: Vec<DayOption>,
    /// The selected days, sorted by `day_of_week`.
    pub selected_days: Vec<Weekday>,
    /// The days not selected, sorted by `day_of_week`.
    pub unselected_days: Vec<Weekday>,
    /// The nights of the stay in stay order.
    pub nights: Vec<Night>,
    /// Number of nights in the stay.
    pub night_count: u32,
    /// The arrival day.
    pub check_in: Option<Weekday>,
    /// The last selected day of the stay.
    pub check_out: Option<Weekday>,
    /// Night number of the first night.
    pub start_night: Option<u8>,
    /// Night number of the last night.
    pub end_night: Option<u8>,
    /// Whether the selection forms one unbroken run.
    pub is_contiguous: bool,
    /// Whether the selection can be submitted as a proposal.
    pub is_acceptable: bool,
    /// The reservation span in weeks.
    pub reservation_span: u32,
    /// The price of the selection.
    pub price_breakdown: PriceBreakdown,
    /// The session's current error.
    pub error_state: ErrorState,
}

/// The schedule and price terms submitted with a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalTerms {
    /// The selected days, sorted by `day_of_week`.
    pub days_selected: Vec<Weekday>,
    /// The nights of the stay in stay order.
    pub nights: Vec<Night>,
    /// The arrival day.
    pub check_in: Weekday,
    /// The last selected day of the stay.
    pub check_out: Weekday,
    /// The reservation span in weeks.
    pub reservation_span: u32,
    /// Guest price per night.
    pub price_per_night: Decimal,
    /// Guest price for a four-week cycle.
    pub four_week_rent: Decimal,
    /// Guest price for the whole reservation.
    pub reservation_total: Decimal,
    /// First payment due.
    pub initial_payment: Decimal,
    /// Host compensation for a four-week cycle.
    pub host_four_week_compensation: Decimal,
}

impl ScheduleSnapshot {
    /// Builds a snapshot for a session against the listing's night limits.
    ///
    /// # Example
    ///
    /// ```
    /// use schedule_engine::config::PriceConfig;
    /// use schedule_engine::models::{ListingConfig, Weekday::*};
    /// use schedule_engine::schedule::{ScheduleSnapshot, SelectionSession};
    ///
    /// let listing: ListingConfig = serde_json::from_str(r#"{
    ///     "rental_type": "weekly",
    ///     "weekly_host_rate": "700"
    /// }"#).unwrap();
    ///
    /// let session = SelectionSession::with_days(&[Friday, Saturday, Sunday, Monday]);
    /// let snapshot = ScheduleSnapshot::build(&session, &listing, 13, &PriceConfig::default());
    ///
    /// assert_eq!(snapshot.check_in, Some(Friday));
    /// assert_eq!(snapshot.check_out, Some(Monday));
    /// assert_eq!(snapshot.night_count, 3);
    /// assert!(snapshot.is_acceptable);
    /// assert!(snapshot.price_breakdown.valid);
    /// ```
    pub fn build(
        session: &SelectionSession,
        listing: &ListingConfig,
        reservation_span: u32,
        price_config: &PriceConfig,
    ) -> Self {
        Self::build_with_night_limit(session, listing, reservation_span, price_config, false)
    }

    /// Builds a snapshot, using five as the maximum nights when
    /// `limit_to_five_nights` is set.
    pub fn build_with_night_limit(
        session: &SelectionSession,
        listing: &ListingConfig,
        reservation_span: u32,
        price_config: &PriceConfig,
        limit_to_five_nights: bool,
    ) -> Self {
        let selected_days = session.selected_days().to_vec();
        let unselected_days: Vec<Weekday> = Weekday::ALL
            .iter()
            .copied()
            .filter(|day| !selected_days.contains(day))
            .collect();

        let contiguous = is_contiguous(&selected_days);
        let stay = resolve_check_in_out(&selected_days);
        let nights = nights_for_selection(&selected_days);
        let night_count = stay.map_or(0, |s| s.night_count);

        let effective_max = effective_maximum_nights(listing, limit_to_five_nights);
        let meets_minimum = night_count >= listing.minimum_nights || session.min_nights_warning_shown();
        let meets_maximum = night_count <= effective_max || session.max_nights_warning_shown();
        let is_acceptable = contiguous && night_count >= 1 && meets_minimum && meets_maximum;

        let price_breakdown = if contiguous {
            calculate_price(&nights, listing, reservation_span, price_config)
        } else {
            PriceBreakdown::invalid(listing.rental_type, listing.weeks_offered, reservation_span)
        };

        debug!(
            listing_id = %listing.id,
            selected = selected_days.len(),
            nights = night_count,
            contiguous,
            acceptable = is_acceptable,
            priced = price_breakdown.valid,
            "Built schedule snapshot"
        );

        Self {
            days: create_all_days(&listing.days_available),
            selected_days,
            unselected_days,
            nights,
            night_count,
            check_in: stay.map(|s| s.check_in),
            check_out: stay.map(|s| s.check_out),
            start_night: stay.map(|s| s.start_night),
            end_night: stay.map(|s| s.end_night),
            is_contiguous: contiguous,
            is_acceptable,
            reservation_span,
            price_breakdown,
            error_state: session.error_state().clone(),
        }
    }

    /// The terms to submit with a proposal, or `None` unless the selection
    /// is acceptable and priced.
    pub fn proposal_terms(&self) -> Option<ProposalTerms> {
        if !self.is_acceptable || !self.price_breakdown.valid {
            return None;
        }

        Some(ProposalTerms {
            days_selected: self.selected_days.clone(),
            nights: self.nights.clone(),
            check_in: self.check_in?,
            check_out: self.check_out?,
            reservation_span: self.reservation_span,
            price_per_night: self.price_breakdown.price_per_night,
            four_week_rent: self.price_breakdown.four_week_rent,
            reservation_total: self.price_breakdown.reservation_total,
            initial_payment: self.price_breakdown.initial_payment,
            host_four_week_compensation: self.price_breakdown.host_four_week_compensation,
        })
    }
}

/// Drives one guest's selection against a listing.
///
/// Owns the session together with the listing, reservation span and price
/// configuration, and returns a fresh [`ScheduleSnapshot`] after every
/// change.
///
/// # Example
///
/// ```
/// use schedule_engine::config::PriceConfig;
/// use schedule_engine::models::{ListingConfig, Weekday::*};
/// use schedule_engine::schedule::ScheduleSelector;
///
/// let listing: ListingConfig = serde_json::from_str(r#"{
///     "rental_type": "nightly",
///     "nightly_rates": { "four_nights": "100" }
/// }"#).unwrap();
///
/// let mut selector = ScheduleSelector::new(listing, PriceConfig::default());
/// for day in [Monday, Tuesday, Wednesday] {
///     selector.toggle_day(day);
/// }
/// let snapshot = selector.snapshot();
/// assert_eq!(snapshot.night_count, 2);
/// assert!(snapshot.is_acceptable);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleSelector {
    session: SelectionSession,
    listing: ListingConfig,
    reservation_span: u32,
    price_config: PriceConfig,
    limit_to_five_nights: bool,
    last_outcome: SelectionOutcome,
}

impl ScheduleSelector {
    /// Creates a selector with an empty selection and the default span.
    pub fn new(listing: ListingConfig, price_config: PriceConfig) -> Self {
        Self {
            session: SelectionSession::new(),
            listing,
            reservation_span: DEFAULT_RESERVATION_SPAN,
            price_config,
            limit_to_five_nights: false,
            last_outcome: SelectionOutcome::Unchanged,
        }
    }

    /// Caps the maximum nights at five.
    pub fn with_five_night_limit(mut self) -> Self {
        self.limit_to_five_nights = true;
        self
    }

    /// Adds or removes `day`.
    pub fn toggle_day(&mut self, day: Weekday) -> ScheduleSnapshot {
        self.last_outcome = self.session.toggle_day(day, &self.listing, self.limit_to_five_nights);
        self.snapshot()
    }

    /// Adds `day`.
    pub fn add_day(&mut self, day: Weekday) -> ScheduleSnapshot {
        self.last_outcome = self.session.add_day(day, &self.listing, self.limit_to_five_nights);
        self.snapshot()
    }

    /// Removes `day`.
    pub fn remove_day(&mut self, day: Weekday) -> ScheduleSnapshot {
        self.last_outcome = self.session.remove_day(day, &self.listing);
        self.snapshot()
    }

    /// Empties the selection and resets the warnings.
    pub fn clear(&mut self) -> ScheduleSnapshot {
        self.session.clear();
        self.last_outcome = SelectionOutcome::Unchanged;
        self.snapshot()
    }

    /// Clears the current error.
    pub fn dismiss_error(&mut self) -> ScheduleSnapshot {
        self.session.dismiss_error();
        self.snapshot()
    }

    /// Changes the reservation span in weeks.
    pub fn set_reservation_span(&mut self, weeks: u32) -> ScheduleSnapshot {
        self.reservation_span = weeks;
        self.snapshot()
    }

    /// Replaces the price configuration.
    pub fn set_price_config(&mut self, price_config: PriceConfig) -> ScheduleSnapshot {
        self.price_config = price_config;
        self.snapshot()
    }

    /// The underlying session.
    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    /// The outcome of the most recent selection change.
    pub fn last_outcome(&self) -> SelectionOutcome {
        self.last_outcome
    }

    /// Builds a snapshot of the current state.
    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot::build_with_night_limit(
            &self.session,
            &self.listing,
            self.reservation_span,
            &self.price_config,
            self.limit_to_five_nights,
        )
    }
}
