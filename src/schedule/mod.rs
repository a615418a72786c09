//! Schedule selection logic.
//!
//! This module turns a guest's weekday selection into a validated stay:
//! day and night derivation, contiguity (including stays that wrap from
//! Saturday into Sunday), check-in and check-out resolution, the per-guest
//! selection session with its one-time night-limit warnings, the
//! cross-validator consistency check, and the aggregated schedule snapshot.

mod check_in_out;
mod consistency;
mod contiguity;
mod day_model;
mod session;
mod snapshot;

pub use check_in_out::{CheckInOut, nights_for_selection, resolve_check_in_out};
pub use consistency::{
    ConsistencyReport, DIAGNOSTICS_TARGET, Recommendation, ValidatorCheck, ValidatorSource,
    check_consistency,
};
pub use contiguity::{is_contiguous, wraps_week_boundary};
pub use day_model::{FULL_WEEK_NIGHTS, create_all_days, night_count, sort_days};
pub use session::{
    ABSOLUTE_MINIMUM_NIGHTS, FIVE_NIGHT_LIMIT, SelectionOutcome, SelectionSession, effective_maximum_nights,
};
pub use snapshot::{DEFAULT_RESERVATION_SPAN, ProposalTerms, ScheduleSelector, ScheduleSnapshot};
