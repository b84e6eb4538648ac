pub mod bookings;
pub mod pool;
pub mod schema;

pub use bookings::{BookingStore, StoreError};
