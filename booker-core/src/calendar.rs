//! Month grid used by the date step.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::{is_before_min, is_date_past, Availability};

pub const WEEKDAY_LABELS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. Navigation is unbounded in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        if next == self.first {
            // Only reachable at the upper bound of NaiveDate.
            return 31;
        }
        next.signed_duration_since(self.first).num_days() as u32
    }

    /// Weekday index of day 1, Sunday = 0.
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }
}

/// Blank cells for the days before the 1st, then one cell per day.
pub fn month_grid(month: Month) -> Vec<Option<NaiveDate>> {
    let mut cells = vec![None; month.leading_blanks()];
    cells.extend((1..=month.days_in_month()).map(|day| month.day(day)));
    cells
}

/// State of one day cell in the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_fully_booked: bool,
    pub is_before_min: bool,
    pub is_selected: bool,
}

impl CalendarDay {
    pub fn is_disabled(&self) -> bool {
        self.is_past || self.is_fully_booked || self.is_before_min
    }

    pub fn day_number(&self) -> u32 {
        self.date.day()
    }
}

pub fn calendar_days(
    month: Month,
    availability: &Availability<'_>,
    today: NaiveDate,
    min_date: Option<NaiveDate>,
    selected: Option<NaiveDate>,
) -> Vec<Option<CalendarDay>> {
    month_grid(month)
        .into_iter()
        .map(|cell| {
            cell.map(|date| CalendarDay {
                date,
                is_past: is_date_past(date, today),
                is_fully_booked: availability.is_date_fully_booked(date),
                is_before_min: is_before_min(date, min_date),
                is_selected: selected.is_some_and(|s| {
                    s.day() == date.day() && s.month() == date.month() && s.year() == date.year()
                }),
            })
        })
        .collect()
}

/// "Monday, June 10, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingRecord;
    use crate::slots::SlotCatalog;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_grid_leading_blanks() {
        // June 1st 2024 is a Saturday.
        let grid = month_grid(Month::new(2024, 6).unwrap());
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 6);
        assert_eq!(grid.len(), 6 + 30);
        assert_eq!(grid[6], Some(day(2024, 6, 1)));
        assert_eq!(grid.last().copied().flatten(), Some(day(2024, 6, 30)));
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(Month::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(Month::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(Month::new(2024, 12).unwrap().days_in_month(), 31);
        // September 1st 2024 is a Sunday.
        assert_eq!(Month::new(2024, 9).unwrap().leading_blanks(), 0);
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date(day(2024, 6, 10)), "Monday, June 10, 2024");
    }

    #[test]
    fn test_navigation_wraps_years() {
        let december = Month::new(2024, 12).unwrap();
        assert_eq!(december.next(), Month::new(2025, 1).unwrap());
        assert_eq!(december.next().previous(), december);
        assert_eq!(Month::new(2024, 1).unwrap().previous().title(), "December 2023");
        assert_eq!(Month::containing(day(2024, 6, 17)).title(), "June 2024");
    }

    #[test]
    fn test_calendar_days_disables_full_and_past_days() {
        let catalog = SlotCatalog::default();
        let mut bookings: Vec<BookingRecord> = catalog
            .slots()
            .iter()
            .map(|s| BookingRecord::new("2024-06-10", s.time.clone()))
            .collect();
        bookings.extend(
            catalog.slots()[..3]
                .iter()
                .map(|s| BookingRecord::new("2024-06-11", s.time.clone())),
        );
        let availability = Availability::new(&bookings, &catalog);

        let cells = calendar_days(
            Month::new(2024, 6).unwrap(),
            &availability,
            day(2024, 6, 5),
            None,
            Some(day(2024, 6, 11)),
        );
        let find = |d: u32| {
            cells
                .iter()
                .flatten()
                .find(|c| c.day_number() == d)
                .copied()
                .unwrap()
        };

        assert!(find(4).is_disabled());
        assert!(find(4).is_past);
        assert!(find(10).is_disabled());
        assert!(find(10).is_fully_booked);
        assert!(!find(11).is_disabled());
        assert!(find(11).is_selected);
        assert_eq!(cells.iter().flatten().filter(|c| c.is_selected).count(), 1);
    }

    #[test]
    fn test_selection_must_match_month_and_year() {
        let catalog = SlotCatalog::default();
        let availability = Availability::new(&[], &catalog);
        let cells = calendar_days(
            Month::new(2024, 7).unwrap(),
            &availability,
            day(2024, 6, 1),
            Some(day(2024, 7, 3)),
            Some(day(2024, 6, 11)),
        );
        assert!(cells.iter().flatten().all(|c| !c.is_selected));
        let second = cells.iter().flatten().find(|c| c.day_number() == 2).unwrap();
        assert!(second.is_before_min && second.is_disabled());
    }
}
