//! Collaborators that load and persist bookings on behalf of the wizard.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::model::{BookingRecord, CreateBookingInput};

/// Storage supplied by the host application.
///
/// Implementations decide which bookings count as occupying slots (usually
/// today onwards) and are responsible for rejecting a second booking of the
/// same date and time.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, BackendError>;

    async fn create_booking(&self, input: CreateBookingInput) -> Result<(), BackendError>;
}

/// Process-local store. Enforces date + time uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    bookings: Mutex<Vec<BookingRecord>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<BookingRecord>) -> Self {
        Self {
            bookings: Mutex::new(bookings),
        }
    }

    pub fn snapshot(&self) -> Vec<BookingRecord> {
        self.bookings
            .lock()
            .map(|bookings| bookings.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookingBackend for InMemoryBackend {
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, BackendError> {
        self.bookings
            .lock()
            .map(|bookings| bookings.clone())
            .map_err(|_| BackendError::new("booking store lock poisoned"))
    }

    async fn create_booking(&self, input: CreateBookingInput) -> Result<(), BackendError> {
        let mut bookings = self
            .bookings
            .lock()
            .map_err(|_| BackendError::new("booking store lock poisoned"))?;

        let taken = bookings.iter().any(|booking| {
            booking.booking_date == input.booking_date && booking.booking_time == input.booking_time
        });
        if taken {
            return Err(BackendError::conflict(format!(
                "{} at {} is already booked",
                input.booking_date, input.booking_time
            )));
        }

        let id = (bookings.len() + 1).to_string();
        let data = input.data;
        let notes = data.notes_opt().map(str::to_string);
        bookings.push(BookingRecord {
            id: Some(id),
            booking_date: input.booking_date,
            booking_time: input.booking_time,
            name: Some(data.name),
            email: Some(data.email),
            phone: Some(data.phone),
            notes,
            ..Default::default()
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingData;

    fn input(date: &str, time: &str) -> CreateBookingInput {
        CreateBookingInput {
            booking_date: date.to_string(),
            booking_time: time.to_string(),
            data: BookingData {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                notes: "  ".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_in_memory_rejects_double_booking() {
        let backend = InMemoryBackend::new();
        backend.create_booking(input("2024-06-10", "09:00 AM")).await.unwrap();

        let err = backend
            .create_booking(input("2024-06-10", "09:00 AM"))
            .await
            .unwrap_err();
        assert!(err.message.contains("already booked"));
        assert!(err.is_conflict());

        backend.create_booking(input("2024-06-10", "10:00 AM")).await.unwrap();
        let stored = backend.fetch_bookings().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].notes, None);
        assert_eq!(stored[1].id.as_deref(), Some("2"));
    }
}
