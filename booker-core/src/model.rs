use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BookingError, Result};

/// A booking as returned by the store. Read-only to the wizard.
///
/// `booking_date` + `booking_time` identify the occupied slot. Columns the
/// store adds beyond the known ones are kept in `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BookingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub booking_date: String,
    pub booking_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookingRecord {
    pub fn new(booking_date: impl Into<String>, booking_time: impl Into<String>) -> Self {
        Self {
            booking_date: booking_date.into(),
            booking_time: booking_time.into(),
            ..Default::default()
        }
    }
}

/// Contact details entered on the details step.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct BookingData {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl BookingData {
    /// Names of the required fields that are empty. Only presence is
    /// checked: any non-empty value, whitespace included, is accepted.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Notes as an optional column value: empty notes are stored as NULL.
    pub fn notes_opt(&self) -> Option<&str> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then_some(notes)
    }
}

/// Payload handed to the create-booking collaborator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub booking_date: String,
    pub booking_time: String,
    pub data: BookingData,
}

/// Sent to the confirmation callback after a successful submission.
pub type BookingConfirmationPayload = CreateBookingInput;

/// Coarse grouping of slots for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Other(String),
}

impl Period {
    pub fn as_str(&self) -> &str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
            Period::Other(name) => name,
        }
    }
}

impl From<String> for Period {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "morning" => Period::Morning,
            "afternoon" => Period::Afternoon,
            "evening" => Period::Evening,
            _ => Period::Other(value),
        }
    }
}

impl From<&str> for Period {
    fn from(value: &str) -> Self {
        Period::from(value.to_string())
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimeSlotDefinition {
    pub time: String,
    pub period: Period,
}

impl TimeSlotDefinition {
    pub fn new(time: impl Into<String>, period: impl Into<Period>) -> Self {
        Self {
            time: time.into(),
            period: period.into(),
        }
    }
}

/// One stage of the wizard. Transitions only move along
/// `Calendar -> Timeslot -> Details -> Confirmation`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    #[default]
    Calendar,
    Timeslot,
    Details,
    Confirmation,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::Calendar,
        BookingStep::Timeslot,
        BookingStep::Details,
        BookingStep::Confirmation,
    ];

    pub fn index(self) -> usize {
        match self {
            BookingStep::Calendar => 0,
            BookingStep::Timeslot => 1,
            BookingStep::Details => 2,
            BookingStep::Confirmation => 3,
        }
    }

    pub fn next(self) -> Option<BookingStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<BookingStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStep::Calendar => "calendar",
            BookingStep::Timeslot => "timeslot",
            BookingStep::Details => "details",
            BookingStep::Confirmation => "confirmation",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes the local calendar date as `YYYY-MM-DD`.
///
/// No UTC projection happens here, so dates near midnight keep their day.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_keeps_local_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(iso_date(date), "2024-06-10");
        assert_eq!(parse_iso_date("2024-06-10").unwrap(), date);
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert_eq!(
            parse_iso_date("10/06/2024"),
            Err(BookingError::InvalidDate("10/06/2024".to_string()))
        );
    }

    #[test]
    fn test_period_from_unknown_string() {
        assert_eq!(Period::from("Morning"), Period::Morning);
        assert_eq!(Period::from("night"), Period::Other("night".to_string()));
        assert_eq!(String::from(Period::Evening), "evening");
    }

    #[test]
    fn test_booking_record_keeps_extra_columns() {
        let json = r#"{"id":"7","booking_date":"2024-06-10","booking_time":"09:00 AM","created_at":"2024-06-01"}"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("7"));
        assert_eq!(record.booking_time, "09:00 AM");
        assert_eq!(record.extra.get("created_at"), Some(&Value::from("2024-06-01")));
    }

    #[test]
    fn test_create_input_uses_camel_case() {
        let input = CreateBookingInput {
            booking_date: "2024-06-10".to_string(),
            booking_time: "09:00 AM".to_string(),
            data: BookingData::default(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["bookingDate"], "2024-06-10");
        assert_eq!(json["bookingTime"], "09:00 AM");
    }

    #[test]
    fn test_missing_required_fields() {
        let data = BookingData {
            name: "Ada".to_string(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
        };
        assert_eq!(data.missing_required_fields(), vec!["email", "phone"]);
        assert!(!data.is_complete());
        assert_eq!(data.notes_opt(), None);
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let data = BookingData {
            name: " ".to_string(),
            email: "a".to_string(),
            phone: "b".to_string(),
            notes: String::new(),
        };
        assert!(data.missing_required_fields().is_empty());
        assert!(data.is_complete());
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(BookingStep::Calendar.next(), Some(BookingStep::Timeslot));
        assert_eq!(BookingStep::Confirmation.next(), None);
        assert_eq!(BookingStep::Calendar.previous(), None);
        assert_eq!(BookingStep::Details.previous(), Some(BookingStep::Timeslot));
    }
}
