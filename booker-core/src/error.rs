//! Error types for booking operations.

use thiserror::Error;

use crate::model::BookingStep;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Slot catalog must contain at least one slot")]
    EmptySlotCatalog,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("A date and a time must be selected before submitting")]
    MissingSelection,

    #[error("A booking submission is already in progress")]
    SubmissionInProgress,

    #[error("Expected the {expected} step, wizard is on {actual}")]
    InvalidStep {
        expected: BookingStep,
        actual: BookingStep,
    },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Failure reported by a [`crate::BookingBackend`] collaborator.
///
/// The wizard only logs the message; users see the configured copy string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
    pub kind: BackendErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendErrorKind {
    #[default]
    Other,
    /// The requested date and time is already booked.
    Conflict,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BackendErrorKind::Other,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BackendErrorKind::Conflict,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == BackendErrorKind::Conflict
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
