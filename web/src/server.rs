use async_trait::async_trait;
use booker_core::{BackendError, BookingBackend, BookingRecord, CreateBookingInput, WizardConfig};
use leptos::prelude::*;
use leptos::server;

/// Wizard settings for the page, including copy overrides from the environment.
#[server]
pub async fn get_booker_config() -> Result<WizardConfig, ServerFnError> {
    Ok(crate::config::app_config().wizard.clone())
}

#[server]
pub async fn list_bookings() -> Result<Vec<BookingRecord>, ServerFnError> {
    use crate::db::BookingStore;

    let today = chrono::Local::now().date_naive();
    match BookingStore::current().upcoming_bookings(today).await {
        Ok(bookings) => {
            tracing::debug!(count = bookings.len(), "Loaded upcoming bookings");
            Ok(bookings)
        }
        Err(e) => {
            tracing::error!("Failed to load bookings: {}", e);
            Err(ServerFnError::new(format!("Database error: {}", e)))
        }
    }
}

#[server]
pub async fn create_booking(input: CreateBookingInput) -> Result<(), ServerFnError> {
    use crate::db::{BookingStore, StoreError};
    use http::StatusCode;

    let today = chrono::Local::now().date_naive();
    if let Err(reason) = check_booking(&input, today) {
        tracing::warn!(date = %input.booking_date, time = %input.booking_time, "Rejected booking: {}", reason);
        set_status(StatusCode::UNPROCESSABLE_ENTITY);
        return Err(ServerFnError::new(reason));
    }

    match BookingStore::current().insert_booking(&input).await {
        Ok(()) => {
            tracing::info!(date = %input.booking_date, time = %input.booking_time, "Booking created");
            Ok(())
        }
        Err(e @ StoreError::SlotTaken { .. }) => {
            tracing::warn!("Booking conflict: {}", e);
            set_status(StatusCode::CONFLICT);
            Err(ServerFnError::new(e.to_string()))
        }
        Err(e) => {
            tracing::error!("Failed to create booking: {}", e);
            Err(ServerFnError::new(format!("Database error: {}", e)))
        }
    }
}

#[cfg(feature = "ssr")]
fn set_status(status: http::StatusCode) {
    if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
        response.set_status(status);
    }
}

/// Server-side checks mirroring what the wizard enforces in the browser.
#[cfg(feature = "ssr")]
fn check_booking(input: &CreateBookingInput, today: chrono::NaiveDate) -> Result<(), String> {
    let missing = input.data.missing_required_fields();
    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    let date = booker_core::parse_iso_date(&input.booking_date).map_err(|e| e.to_string())?;
    if booker_core::is_date_past(date, today) {
        return Err(format!("{} is in the past", input.booking_date));
    }

    let wizard = &crate::config::app_config().wizard;
    if wizard.min_date.is_some_and(|min| date < min) {
        return Err(format!("{} is before the first bookable day", input.booking_date));
    }
    if !wizard.time_slots.contains(&input.booking_time) {
        return Err(format!("Unknown time slot: {}", input.booking_time));
    }
    Ok(())
}

/// Routes the wizard's storage calls through the server functions above.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerBackend;

#[async_trait]
impl BookingBackend for ServerBackend {
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, BackendError> {
        list_bookings()
            .await
            .map_err(|e| BackendError::new(e.to_string()))
    }

    async fn create_booking(&self, input: CreateBookingInput) -> Result<(), BackendError> {
        create_booking(input)
            .await
            .map_err(|e| BackendError::new(e.to_string()))
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use booker_core::BookingData;
    use chrono::NaiveDate;

    fn input(date: &str, time: &str) -> CreateBookingInput {
        CreateBookingInput {
            booking_date: date.to_string(),
            booking_time: time.to_string(),
            data: BookingData {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555".to_string(),
                notes: String::new(),
            },
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_check_booking_accepts_valid_input() {
        assert_eq!(check_booking(&input("2024-06-10", "09:00 AM"), today()), Ok(()));
    }

    #[test]
    fn test_check_booking_rejects_bad_input() {
        assert!(check_booking(&input("2024-06-09", "09:00 AM"), today()).is_err());
        assert!(check_booking(&input("June 11", "09:00 AM"), today()).is_err());
        assert!(check_booking(&input("2024-06-11", "11:45 PM"), today()).is_err());

        let mut spaced = input("2024-06-11", "09:00 AM");
        spaced.data.phone = " ".to_string();
        assert_eq!(check_booking(&spaced, today()), Ok(()));

        let mut blank = input("2024-06-11", "09:00 AM");
        blank.data.email = String::new();
        assert_eq!(
            check_booking(&blank, today()),
            Err("Missing required fields: email".to_string())
        );
    }
}
