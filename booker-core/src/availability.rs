//! Availability of dates and slots given the bookings already made.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{iso_date, BookingRecord};
use crate::slots::SlotCatalog;

/// Read-only view over the current bookings and the slot catalog.
#[derive(Debug, Clone, Copy)]
pub struct Availability<'a> {
    bookings: &'a [BookingRecord],
    catalog: &'a SlotCatalog,
}

impl<'a> Availability<'a> {
    pub fn new(bookings: &'a [BookingRecord], catalog: &'a SlotCatalog) -> Self {
        Self { bookings, catalog }
    }

    pub fn bookings_on(&self, date: NaiveDate) -> impl Iterator<Item = &'a BookingRecord> {
        let day = iso_date(date);
        self.bookings
            .iter()
            .filter(move |booking| booking.booking_date == day)
    }

    pub fn booked_times_for_date(&self, date: NaiveDate) -> HashSet<&'a str> {
        self.bookings_on(date)
            .map(|booking| booking.booking_time.as_str())
            .collect()
    }

    /// Exact label match against bookings on the same ISO date.
    pub fn is_slot_booked(&self, date: NaiveDate, time: &str) -> bool {
        self.bookings_on(date).any(|booking| booking.booking_time == time)
    }

    /// Capacity check: the number of bookings on the date reaches the number
    /// of configured slots. Which times are booked is not inspected.
    pub fn is_date_fully_booked(&self, date: NaiveDate) -> bool {
        self.bookings_on(date).count() >= self.catalog.len()
    }

    pub fn available_slot_count(&self, date: NaiveDate) -> usize {
        let booked = self.booked_times_for_date(date);
        self.catalog
            .slots()
            .iter()
            .filter(|slot| !booked.contains(slot.time.as_str()))
            .count()
    }

    /// A day cannot be picked when it is past, fully booked, or earlier than
    /// the configured minimum date.
    pub fn is_day_disabled(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        min_date: Option<NaiveDate>,
    ) -> bool {
        is_date_past(date, today)
            || self.is_date_fully_booked(date)
            || is_before_min(date, min_date)
    }
}

/// Strictly earlier than today. Both values are local calendar dates, so the
/// midnight truncation is implicit.
pub fn is_date_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_before_min(date: NaiveDate, min_date: Option<NaiveDate>) -> bool {
    min_date.is_some_and(|min| date < min)
}
