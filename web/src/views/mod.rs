pub mod booking;
pub mod not_found;
