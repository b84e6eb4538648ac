//! iCalendar export offered on the confirmation step.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::model::BookingData;
use crate::slots::parse_slot_time;

pub const ICS_FILE_NAME: &str = "appointment.ics";
pub const ICS_MIME: &str = "text/calendar;charset=utf-8";
const SUMMARY: &str = "Appointment Booking";

/// Builds a single-event calendar for a confirmed booking.
///
/// Times are floating local times. A label that does not parse as a clock
/// time, or a duration that is not positive or overflows the calendar,
/// produces an all-day event instead.
pub fn generate_ics(
    date: NaiveDate,
    time_label: &str,
    data: &BookingData,
    duration_minutes: i64,
    stamp: NaiveDateTime,
) -> String {
    let timed = parse_slot_time(time_label).and_then(|time| {
        let start = date.and_time(time);
        let end = TimeDelta::try_minutes(duration_minutes)
            .filter(|duration| *duration > TimeDelta::zero())
            .and_then(|duration| start.checked_add_signed(duration))?;
        Some((start, end))
    });
    let (dtstart, dtend) = match timed {
        Some((start, end)) => (
            format!("DTSTART:{}", start.format("%Y%m%dT%H%M%S")),
            format!("DTEND:{}", end.format("%Y%m%dT%H%M%S")),
        ),
        None => {
            let next = date.succ_opt().unwrap_or(date);
            (
                format!("DTSTART;VALUE=DATE:{}", date.format("%Y%m%d")),
                format!("DTEND;VALUE=DATE:{}", next.format("%Y%m%d")),
            )
        }
    };
    let uid = format!(
        "{}-{}@chrono-booker",
        date.format("%Y%m%d"),
        time_label
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
    );
    let dtstamp = stamp.format("%Y%m%dT%H%M%S");
    let summary = SUMMARY;
    let description = escape_text(&format!("Appointment confirmed for {}", data.name));

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Chrono Booker//Appointment Booking//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         {dtstart}\r\n\
         {dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> BookingData {
        BookingData {
            name: name.to_string(),
            email: "ada@example.com".to_string(),
            phone: "555".to_string(),
            notes: String::new(),
        }
    }

    fn stamp() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-06-01 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_generate_ics_with_clock_time() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ics = generate_ics(date, "02:00 PM", &data("Ada"), 60, stamp());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("BEGIN:VEVENT\r\n"));
        assert!(ics.contains("DTSTART:20240610T140000\r\n"));
        assert!(ics.contains("DTEND:20240610T150000\r\n"));
        assert!(ics.contains("DTSTAMP:20240601T083000\r\n"));
        assert!(ics.contains("UID:20240610-0200PM@chrono-booker\r\n"));
        assert!(ics.contains("SUMMARY:Appointment Booking\r\n"));
        assert!(ics.contains("DESCRIPTION:Appointment confirmed for Ada\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_ics_all_day_fallback() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let ics = generate_ics(date, "Whenever", &data("Ada"), 60, stamp());
        assert!(ics.contains("DTSTART;VALUE=DATE:20241231\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250101\r\n"));
    }

    #[test]
    fn test_description_is_escaped() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let ics = generate_ics(date, "09:00 AM", &data("Doe, Jane; Jr."), 30, stamp());
        assert!(ics.contains("DESCRIPTION:Appointment confirmed for Doe\\, Jane\\; Jr.\r\n"));
        assert!(ics.contains("DTEND:20240610T093000\r\n"));
    }

    #[test]
    fn test_unusable_duration_falls_back_to_all_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        for minutes in [0, -90, 1_000_000_000_000, i64::MAX] {
            let ics = generate_ics(date, "02:00 PM", &data("Ada"), minutes, stamp());
            assert!(ics.contains("DTSTART;VALUE=DATE:20240610\r\n"), "{minutes}");
            assert!(ics.contains("DTEND;VALUE=DATE:20240611\r\n"), "{minutes}");
        }
    }
}
