//! Booking wizard core: the step state machine, availability filtering,
//! the month grid and the calendar export behind the Chrono Booker UI.
//!
//! Nothing here depends on a UI framework. Storage is reached through the
//! [`BookingBackend`] trait supplied by the host.

pub mod availability;
pub mod backend;
pub mod calendar;
pub mod copy;
pub mod error;
pub mod form;
pub mod ics;
pub mod model;
pub mod slots;
pub mod wizard;

pub use availability::{is_date_past, Availability};
pub use backend::{BookingBackend, InMemoryBackend};
pub use calendar::{calendar_days, format_long_date, month_grid, CalendarDay, Month, WEEKDAY_LABELS};
pub use copy::BookerCopy;
pub use error::{BackendError, BackendErrorKind, BookingError, Result};
pub use form::ContactForm;
pub use ics::{generate_ics, ICS_FILE_NAME, ICS_MIME};
pub use model::{
    iso_date, parse_iso_date, BookingConfirmationPayload, BookingData, BookingRecord, BookingStep,
    CreateBookingInput, Period, TimeSlotDefinition,
};
pub use slots::{parse_slot_time, PeriodDisplay, SlotCatalog};
pub use wizard::{
    complete_submission, refresh_bookings, BookingWizard, WizardConfig, WizardError, WizardHandle,
};
