//! Selection error state.
//!
//! Selection rejections and soft warnings are never raised as errors. They
//! are reported to the caller as an [`ErrorState`], which stays set until the
//! next accepted action or an explicit dismissal.

use serde::{Deserialize, Serialize};

/// The kind of problem found while changing a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionErrorKind {
    /// The host does not offer the requested day.
    Availability,
    /// The selection would exceed the maximum nights (shown once, then allowed).
    MaximumNightsWarning,
    /// The selection would fall below the minimum nights (shown once, then allowed).
    MinimumNightsWarning,
    /// The selection would fall below the absolute two-night floor.
    AbsoluteMinimum,
    /// The selection would no longer be one unbroken run of days.
    Contiguity,
}

impl SelectionErrorKind {
    /// Returns true for the one-time warnings that are allowed on retry.
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            SelectionErrorKind::MaximumNightsWarning | SelectionErrorKind::MinimumNightsWarning
        )
    }
}

impl std::fmt::Display for SelectionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SelectionErrorKind::Availability => "availability",
            SelectionErrorKind::MaximumNightsWarning => "maximum_nights_warning",
            SelectionErrorKind::MinimumNightsWarning => "minimum_nights_warning",
            SelectionErrorKind::AbsoluteMinimum => "absolute_minimum",
            SelectionErrorKind::Contiguity => "contiguity",
        };
        write!(f, "{}", text)
    }
}

/// The transient error shown to the user after a selection change.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{ErrorState, SelectionErrorKind};
///
/// let state = ErrorState::new(SelectionErrorKind::Contiguity, "Please select consecutive days");
/// assert!(state.has_error);
/// assert_eq!(state.error_type, Some(SelectionErrorKind::Contiguity));
///
/// assert!(!ErrorState::none().has_error);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    /// Whether an error is currently shown.
    pub has_error: bool,
    /// The kind of the current error.
    pub error_type: Option<SelectionErrorKind>,
    /// A human-readable message for the current error.
    pub error_message: Option<String>,
}

impl ErrorState {
    /// An empty error state.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an error state of the given kind.
    pub fn new(kind: SelectionErrorKind, message: impl Into<String>) -> Self {
        Self {
            has_error: true,
            error_type: Some(kind),
            error_message: Some(message.into()),
        }
    }
}
