pub mod booking_calendar;
pub mod booking_confirmation;
pub mod booking_form;
pub mod chrono_booker;
pub mod error;
pub mod loading;
pub mod time_slot_selector;

pub use chrono_booker::ChronoBooker;
