use std::sync::OnceLock;

use booker_core::{iso_date, BookingBackend, BookingRecord, CreateBookingInput, InMemoryBackend};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{date} at {time} is already booked")]
    SlotTaken { date: String, time: String },

    #[error("Invalid booking: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Memory(#[from] booker_core::BackendError),
}

type StoreResult<T> = Result<T, StoreError>;

static MEMORY_STORE: OnceLock<InMemoryBackend> = OnceLock::new();

/// Where bookings live for this process.
#[derive(Clone, Copy)]
pub enum BookingStore {
    Postgres(&'static PgPool),
    Memory(&'static InMemoryBackend),
}

impl BookingStore {
    /// Postgres once the pool is up, otherwise a process-local store.
    pub fn current() -> Self {
        match super::pool::get_pool() {
            Some(pool) => BookingStore::Postgres(pool),
            None => BookingStore::Memory(MEMORY_STORE.get_or_init(InMemoryBackend::new)),
        }
    }

    pub async fn upcoming_bookings(&self, today: NaiveDate) -> StoreResult<Vec<BookingRecord>> {
        match self {
            BookingStore::Postgres(pool) => upcoming_bookings(pool, today).await,
            BookingStore::Memory(store) => {
                let today = iso_date(today);
                let mut bookings: Vec<_> = store
                    .fetch_bookings()
                    .await?
                    .into_iter()
                    .filter(|b| b.booking_date >= today)
                    .collect();
                bookings.sort_by(|a, b| {
                    (&a.booking_date, &a.booking_time).cmp(&(&b.booking_date, &b.booking_time))
                });
                Ok(bookings)
            }
        }
    }

    pub async fn insert_booking(&self, input: &CreateBookingInput) -> StoreResult<()> {
        match self {
            BookingStore::Postgres(pool) => insert_booking(pool, input).await.map(|_| ()),
            // The check and the insert happen under the store's lock.
            BookingStore::Memory(store) => {
                store
                    .create_booking(input.clone())
                    .await
                    .map_err(|e| if e.is_conflict() { slot_taken(input) } else { e.into() })
            }
        }
    }
}

fn slot_taken(input: &CreateBookingInput) -> StoreError {
    StoreError::SlotTaken {
        date: input.booking_date.clone(),
        time: input.booking_time.clone(),
    }
}

/// Bookings on or after `today`, ordered by slot.
pub async fn upcoming_bookings(pool: &PgPool, today: NaiveDate) -> StoreResult<Vec<BookingRecord>> {
    let rows = sqlx::query(
        "SELECT id, booking_date, booking_time, name, email, phone, notes
         FROM bookings
         WHERE booking_date >= $1
         ORDER BY booking_date, booking_time",
    )
    .bind(today)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| -> StoreResult<BookingRecord> {
            let id: i64 = row.try_get("id")?;
            let date: NaiveDate = row.try_get("booking_date")?;
            Ok(BookingRecord {
                id: Some(id.to_string()),
                booking_date: iso_date(date),
                booking_time: row.try_get("booking_time")?,
                name: row.try_get("name").ok(),
                email: row.try_get("email").ok(),
                phone: row.try_get("phone").ok(),
                notes: row.try_get("notes").ok().flatten(),
                extra: Default::default(),
            })
        })
        .collect()
}

/// Inserts a booking and returns its id. A second booking for the same
/// date and time fails with [`StoreError::SlotTaken`].
pub async fn insert_booking(pool: &PgPool, input: &CreateBookingInput) -> StoreResult<i64> {
    let date = booker_core::parse_iso_date(&input.booking_date)
        .map_err(|e| StoreError::Invalid(e.to_string()))?;

    let result = sqlx::query(
        "INSERT INTO bookings (booking_date, booking_time, name, email, phone, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(date)
    .bind(&input.booking_time)
    .bind(&input.data.name)
    .bind(&input.data.email)
    .bind(&input.data.phone)
    .bind(input.data.notes_opt())
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row.try_get::<i64, _>("id")?),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(slot_taken(input))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booker_core::BookingData;

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

    #[tokio::test]
    async fn test_memory_store_rejects_taken_slot() {
        let store = BookingStore::Memory(Box::leak(Box::new(InMemoryBackend::new())));
        store.insert_booking(&input("2099-01-05", "09:00 AM")).await.unwrap();

        let err = store
            .insert_booking(&input("2099-01-05", "09:00 AM"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SlotTaken { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_race_loser_gets_slot_taken() {
        let store = BookingStore::Memory(Box::leak(Box::new(InMemoryBackend::new())));
        let first = input("2099-01-05", "10:00 AM");
        let second = first.clone();

        let (a, b) = tokio::join!(store.insert_booking(&first), store.insert_booking(&second));

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(StoreError::SlotTaken { .. }))));
    }

    #[tokio::test]
    async fn test_memory_store_hides_past_bookings() {
        let store = BookingStore::Memory(Box::leak(Box::new(InMemoryBackend::new())));
        store.insert_booking(&input("2024-06-11", "09:00 AM")).await.unwrap();
        store.insert_booking(&input("2024-06-09", "09:00 AM")).await.unwrap();
        store.insert_booking(&input("2024-06-10", "10:00 AM")).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let upcoming = store.upcoming_bookings(today).await.unwrap();
        let dates: Vec<_> = upcoming.iter().map(|b| b.booking_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-10", "2024-06-11"]);
    }
}
