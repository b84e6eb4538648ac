//! Step state machine for the booking flow.
//!
//! The wizard never talks to storage directly. Asynchronous work goes through
//! a [`BookingBackend`] and is split into `begin_*` / `finish_*` phases so a
//! reactive UI can release its state between the two halves. `load_bookings`
//! and `submit_booking` chain those phases for callers that own the wizard
//! across the await; [`refresh_bookings`] and [`complete_submission`] do the
//! same through a [`WizardHandle`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::backend::BookingBackend;
use crate::copy::BookerCopy;
use crate::error::{BackendError, BookingError, Result};
use crate::model::{
    iso_date, BookingConfirmationPayload, BookingData, BookingRecord, BookingStep,
    CreateBookingInput,
};
use crate::slots::SlotCatalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardConfig {
    pub time_slots: SlotCatalog,
    /// Days before this date cannot be selected.
    pub min_date: Option<NaiveDate>,
    pub copy: BookerCopy,
    /// Load availability when the wizard is mounted. When disabled, the
    /// wizard reloads on "book another" instead.
    pub auto_fetch_on_mount: bool,
    /// Length of the exported calendar event.
    pub slot_duration_minutes: i64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            time_slots: SlotCatalog::default(),
            min_date: None,
            copy: BookerCopy::default(),
            auto_fetch_on_mount: true,
            slot_duration_minutes: 60,
        }
    }
}

/// Which collaborator call failed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardError {
    Fetch,
    Submit,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    config: WizardConfig,
    step: BookingStep,
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
    booking_data: Option<BookingData>,
    existing_bookings: Vec<BookingRecord>,
    is_fetching: bool,
    is_submitting: bool,
    error: Option<WizardError>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}

impl BookingWizard {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            config,
            step: BookingStep::Calendar,
            selected_date: None,
            selected_time: None,
            booking_data: None,
            existing_bookings: Vec::new(),
            is_fetching: false,
            is_submitting: false,
            error: None,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn booking_data(&self) -> Option<&BookingData> {
        self.booking_data.as_ref()
    }

    pub fn existing_bookings(&self) -> &[BookingRecord] {
        &self.existing_bookings
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error(&self) -> Option<WizardError> {
        self.error
    }

    /// Banner text for the last failure, taken from the configured copy.
    pub fn error_message(&self) -> Option<&str> {
        self.error.map(|error| match error {
            WizardError::Fetch => self.config.copy.fetch_error.as_str(),
            WizardError::Submit => self.config.copy.submit_error.as_str(),
        })
    }

    pub fn availability(&self) -> Availability<'_> {
        Availability::new(&self.existing_bookings, &self.config.time_slots)
    }

    /// Whether the primary action of the current step is enabled.
    pub fn can_continue(&self) -> bool {
        match self.step {
            BookingStep::Calendar => self.selected_date.is_some() && !self.is_fetching,
            BookingStep::Timeslot => self.selected_time.is_some(),
            BookingStep::Details => {
                self.selected_date.is_some() && self.selected_time.is_some() && !self.is_submitting
            }
            BookingStep::Confirmation => true,
        }
    }

    /// Picks a day on the calendar step. Disabled days are ignored.
    ///
    /// A previously chosen time survives unless it is taken on the new day.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.step != BookingStep::Calendar {
            return false;
        }
        let availability = self.availability();
        if availability.is_day_disabled(date, today, self.config.min_date) {
            return false;
        }
        let time_taken = self
            .selected_time
            .as_deref()
            .is_some_and(|time| availability.is_slot_booked(date, time));
        if time_taken {
            self.selected_time = None;
        }
        self.selected_date = Some(date);
        true
    }

    /// Picks a slot on the time step. Unknown or booked labels are ignored.
    pub fn select_time(&mut self, time: &str) -> bool {
        if self.step != BookingStep::Timeslot {
            return false;
        }
        let Some(date) = self.selected_date else {
            return false;
        };
        if !self.config.time_slots.contains(time) || self.availability().is_slot_booked(date, time)
        {
            return false;
        }
        self.selected_time = Some(time.to_string());
        true
    }

    pub fn continue_to_timeslot(&mut self) -> bool {
        self.advance(BookingStep::Calendar, self.selected_date.is_some())
    }

    pub fn continue_to_details(&mut self) -> bool {
        self.advance(BookingStep::Timeslot, self.selected_time.is_some())
    }

    pub fn back_to_calendar(&mut self) -> bool {
        self.retreat(BookingStep::Timeslot)
    }

    pub fn back_to_timeslot(&mut self) -> bool {
        !self.is_submitting && self.retreat(BookingStep::Details)
    }

    fn advance(&mut self, from: BookingStep, guard: bool) -> bool {
        match self.step.next() {
            Some(next) if self.step == from && guard => {
                self.step = next;
                true
            }
            _ => false,
        }
    }

    fn retreat(&mut self, from: BookingStep) -> bool {
        match self.step.previous() {
            Some(previous) if self.step == from => {
                self.step = previous;
                true
            }
            _ => false,
        }
    }

    /// "Book another" from the confirmation step. Clears the selections and
    /// returns whether availability must be reloaded by the caller.
    pub fn start_new_booking(&mut self) -> bool {
        if self.step != BookingStep::Confirmation {
            return false;
        }
        self.step = BookingStep::Calendar;
        self.selected_date = None;
        self.selected_time = None;
        self.booking_data = None;
        !self.config.auto_fetch_on_mount
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn begin_fetch(&mut self) {
        self.is_fetching = true;
    }

    /// On failure the previous bookings stay in place so the calendar keeps
    /// working from possibly stale data.
    pub fn finish_fetch(&mut self, result: std::result::Result<Vec<BookingRecord>, BackendError>) {
        self.is_fetching = false;
        match result {
            Ok(bookings) => {
                self.existing_bookings = bookings;
                if self.error == Some(WizardError::Fetch) {
                    self.error = None;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load bookings");
                self.error = Some(WizardError::Fetch);
            }
        }
    }

    /// Starts a submission and returns the payload for the create call.
    pub fn begin_submit(&mut self, data: BookingData) -> Result<CreateBookingInput> {
        if self.step != BookingStep::Details {
            return Err(BookingError::InvalidStep {
                expected: BookingStep::Details,
                actual: self.step,
            });
        }
        if self.is_submitting {
            return Err(BookingError::SubmissionInProgress);
        }
        let (Some(date), Some(time)) = (self.selected_date, self.selected_time.clone()) else {
            return Err(BookingError::MissingSelection);
        };

        self.is_submitting = true;
        self.error = None;
        Ok(CreateBookingInput {
            booking_date: iso_date(date),
            booking_time: time,
            data,
        })
    }

    /// The user stays on the details step and may retry or go back.
    pub fn submit_failed(&mut self, err: &BackendError) {
        tracing::warn!(error = %err, "failed to submit booking");
        self.is_submitting = false;
        self.error = Some(WizardError::Submit);
    }

    pub fn record_submitted(&mut self, input: &CreateBookingInput) {
        self.booking_data = Some(input.data.clone());
    }

    /// Moves to the confirmation step once the post-write reload is done.
    pub fn finish_submit(&mut self, input: CreateBookingInput) -> BookingConfirmationPayload {
        self.is_submitting = false;
        self.step = BookingStep::Confirmation;
        input
    }

    pub async fn load_bookings<B>(&mut self, backend: &B)
    where
        B: BookingBackend + ?Sized,
    {
        self.begin_fetch();
        let result = backend.fetch_bookings().await;
        self.finish_fetch(result);
    }

    /// Creates the booking, then reloads availability before confirming.
    pub async fn submit_booking<B>(
        &mut self,
        backend: &B,
        data: BookingData,
    ) -> Result<BookingConfirmationPayload>
    where
        B: BookingBackend + ?Sized,
    {
        let input = self.begin_submit(data)?;
        if let Err(err) = backend.create_booking(input.clone()).await {
            self.submit_failed(&err);
            return Err(err.into());
        }
        self.record_submitted(&input);
        self.load_bookings(backend).await;
        Ok(self.finish_submit(input))
    }
}

/// Shared access to a wizard owned by someone else, such as a reactive
/// signal, that may be dropped while a backend call is in flight.
pub trait WizardHandle {
    /// Runs `f` against the wizard, or returns `None` once it is gone.
    fn try_update<R>(&self, f: impl FnOnce(&mut BookingWizard) -> R) -> Option<R>;
}

/// [`BookingWizard::load_bookings`] for a wizard behind a handle.
pub async fn refresh_bookings<H, B>(handle: &H, backend: &B)
where
    H: WizardHandle + ?Sized,
    B: BookingBackend + ?Sized,
{
    if handle.try_update(BookingWizard::begin_fetch).is_none() {
        return;
    }
    let result = backend.fetch_bookings().await;
    handle.try_update(|w| w.finish_fetch(result));
}

/// Finishes a submission started with [`BookingWizard::begin_submit`].
///
/// Returns the confirmation payload only when the booking was written, the
/// availability reload has completed and the wizard is still alive. Callers
/// fire their completion hook on `Some`, so it runs at most once per
/// `begin_submit`.
pub async fn complete_submission<H, B>(
    handle: &H,
    backend: &B,
    input: CreateBookingInput,
) -> Option<BookingConfirmationPayload>
where
    H: WizardHandle + ?Sized,
    B: BookingBackend + ?Sized,
{
    if let Err(err) = backend.create_booking(input.clone()).await {
        handle.try_update(|w| w.submit_failed(&err));
        return None;
    }
    handle.try_update(|w| {
        w.record_submitted(&input);
        w.begin_fetch();
    })?;
    let result = backend.fetch_bookings().await;
    handle.try_update(|w| {
        w.finish_fetch(result);
        w.finish_submit(input)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let wizard = BookingWizard::default();
        assert_eq!(wizard.step(), BookingStep::Calendar);
        assert_eq!(wizard.selected_date(), None);
        assert_eq!(wizard.selected_time(), None);
        assert!(wizard.booking_data().is_none());
        assert!(wizard.error_message().is_none());
        assert!(!wizard.can_continue());
    }

    #[test]
    fn test_continue_without_date_is_noop() {
        let mut wizard = BookingWizard::default();
        assert!(!wizard.continue_to_timeslot());
        assert_eq!(wizard.step(), BookingStep::Calendar);
    }

    #[test]
    fn test_cannot_skip_steps() {
        let mut wizard = BookingWizard::default();
        let today = day(2024, 6, 1);
        assert!(wizard.select_date(day(2024, 6, 10), today));
        assert!(!wizard.continue_to_details());
        assert!(!wizard.back_to_calendar());
        assert!(!wizard.back_to_timeslot());
        assert!(!wizard.start_new_booking());
        assert_eq!(wizard.step(), BookingStep::Calendar);
    }

    #[test]
    fn test_back_navigation_keeps_selection() {
        let mut wizard = BookingWizard::default();
        wizard.select_date(day(2024, 6, 10), day(2024, 6, 1));
        wizard.continue_to_timeslot();
        assert!(wizard.select_time("09:00 AM"));
        assert!(wizard.continue_to_details());
        assert!(wizard.back_to_timeslot());
        assert!(wizard.back_to_calendar());
        assert_eq!(wizard.selected_date(), Some(day(2024, 6, 10)));
        assert_eq!(wizard.selected_time(), Some("09:00 AM"));
    }

    #[test]
    fn test_select_date_rejects_past_and_full_days() {
        let mut wizard = BookingWizard::new(WizardConfig {
            min_date: Some(day(2024, 6, 5)),
            ..Default::default()
        });
        let today = day(2024, 6, 3);

        assert!(!wizard.select_date(day(2024, 6, 2), today));
        assert!(!wizard.select_date(day(2024, 6, 4), today));

        let full: Vec<_> = SlotCatalog::default()
            .slots()
            .iter()
            .map(|s| BookingRecord::new("2024-06-10", s.time.clone()))
            .collect();
        wizard.begin_fetch();
        wizard.finish_fetch(Ok(full));
        assert!(!wizard.select_date(day(2024, 6, 10), today));
        assert!(wizard.select_date(day(2024, 6, 11), today));
    }

    #[test]
    fn test_select_time_rejects_booked_and_unknown_slots() {
        let mut wizard = BookingWizard::default();
        wizard.begin_fetch();
        wizard.finish_fetch(Ok(vec![BookingRecord::new("2024-06-10", "09:00 AM")]));
        wizard.select_date(day(2024, 6, 10), day(2024, 6, 1));
        wizard.continue_to_timeslot();

        assert!(!wizard.select_time("09:00 AM"));
        assert!(!wizard.select_time("11:30 PM"));
        assert!(wizard.select_time("10:00 AM"));
        assert_eq!(wizard.selected_time(), Some("10:00 AM"));
    }

    #[test]
    fn test_changing_date_drops_taken_time() {
        let mut wizard = BookingWizard::default();
        wizard.begin_fetch();
        wizard.finish_fetch(Ok(vec![BookingRecord::new("2024-06-11", "09:00 AM")]));
        let today = day(2024, 6, 1);
        wizard.select_date(day(2024, 6, 10), today);
        wizard.continue_to_timeslot();
        wizard.select_time("09:00 AM");
        wizard.back_to_calendar();

        assert!(wizard.select_date(day(2024, 6, 12), today));
        assert_eq!(wizard.selected_time(), Some("09:00 AM"));
        assert!(wizard.select_date(day(2024, 6, 11), today));
        assert_eq!(wizard.selected_time(), None);
    }

    #[test]
    fn test_fetch_failure_keeps_stale_bookings() {
        let mut wizard = BookingWizard::default();
        wizard.begin_fetch();
        wizard.finish_fetch(Ok(vec![BookingRecord::new("2024-06-10", "09:00 AM")]));

        wizard.begin_fetch();
        assert!(wizard.is_fetching());
        wizard.finish_fetch(Err(BackendError::new("offline")));
        assert!(!wizard.is_fetching());
        assert_eq!(wizard.existing_bookings().len(), 1);
        assert_eq!(wizard.error(), Some(WizardError::Fetch));
        assert_eq!(
            wizard.error_message(),
            Some("Failed to load booking availability.")
        );

        wizard.begin_fetch();
        wizard.finish_fetch(Ok(vec![]));
        assert!(wizard.error().is_none());
        assert!(wizard.existing_bookings().is_empty());
    }

    #[test]
    fn test_calendar_continue_disabled_while_fetching() {
        let mut wizard = BookingWizard::default();
        wizard.select_date(day(2024, 6, 10), day(2024, 6, 1));
        assert!(wizard.can_continue());
        wizard.begin_fetch();
        assert!(!wizard.can_continue());
    }

    #[test]
    fn test_begin_submit_requires_details_step() {
        let mut wizard = BookingWizard::default();
        let err = wizard.begin_submit(BookingData::default()).unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidStep {
                expected: BookingStep::Details,
                actual: BookingStep::Calendar
            }
        );
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn test_begin_submit_blocks_second_submission() {
        let mut wizard = BookingWizard::default();
        wizard.select_date(day(2024, 6, 10), day(2024, 6, 1));
        wizard.continue_to_timeslot();
        wizard.select_time("09:00 AM");
        wizard.continue_to_details();

        let input = wizard.begin_submit(BookingData::default()).unwrap();
        assert_eq!(input.booking_date, "2024-06-10");
        assert_eq!(input.booking_time, "09:00 AM");
        assert!(!wizard.can_continue());
        assert!(!wizard.back_to_timeslot());
        assert_eq!(
            wizard.begin_submit(BookingData::default()),
            Err(BookingError::SubmissionInProgress)
        );
    }
}
