//! The bookable slots of a day and how they are grouped for display.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::model::{Period, TimeSlotDefinition};

const DEFAULT_SLOTS: [(&str, &str); 15] = [
    ("06:00 AM", "morning"),
    ("07:00 AM", "morning"),
    ("08:00 AM", "morning"),
    ("09:00 AM", "morning"),
    ("10:00 AM", "morning"),
    ("11:00 AM", "morning"),
    ("12:00 PM", "afternoon"),
    ("01:00 PM", "afternoon"),
    ("02:00 PM", "afternoon"),
    ("03:00 PM", "afternoon"),
    ("04:00 PM", "afternoon"),
    ("05:00 PM", "evening"),
    ("06:00 PM", "evening"),
    ("07:00 PM", "evening"),
    ("08:00 PM", "evening"),
];

/// Ordered, non-empty list of slots offered on every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimeSlotDefinition>", into = "Vec<TimeSlotDefinition>")]
pub struct SlotCatalog {
    slots: Vec<TimeSlotDefinition>,
}

impl SlotCatalog {
    pub fn new(slots: Vec<TimeSlotDefinition>) -> Result<Self> {
        if slots.is_empty() {
            return Err(BookingError::EmptySlotCatalog);
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[TimeSlotDefinition] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, time: &str) -> bool {
        self.slots.iter().any(|slot| slot.time == time)
    }

    /// Groups slots by period. Groups follow the order in which each period
    /// first appears; slots keep catalog order inside a group.
    pub fn grouped_by_period(&self) -> Vec<(Period, Vec<&TimeSlotDefinition>)> {
        let mut groups: Vec<(Period, Vec<&TimeSlotDefinition>)> = Vec::new();
        for slot in &self.slots {
            match groups.iter_mut().find(|(period, _)| *period == slot.period) {
                Some((_, members)) => members.push(slot),
                None => groups.push((slot.period.clone(), vec![slot])),
            }
        }
        groups
    }
}

impl Default for SlotCatalog {
    /// Hourly slots from 06:00 AM to 08:00 PM.
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS
                .iter()
                .map(|(time, period)| TimeSlotDefinition::new(*time, *period))
                .collect(),
        }
    }
}

impl TryFrom<Vec<TimeSlotDefinition>> for SlotCatalog {
    type Error = BookingError;

    fn try_from(slots: Vec<TimeSlotDefinition>) -> Result<Self> {
        Self::new(slots)
    }
}

impl From<SlotCatalog> for Vec<TimeSlotDefinition> {
    fn from(catalog: SlotCatalog) -> Self {
        catalog.slots
    }
}

/// Heading shown above a group of slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDisplay {
    pub label: &'static str,
    pub icon: &'static str,
}

pub const FALLBACK_PERIOD_DISPLAY: PeriodDisplay = PeriodDisplay {
    label: "Other",
    icon: "🕐",
};

impl Period {
    pub fn display(&self) -> PeriodDisplay {
        match self {
            Period::Morning => PeriodDisplay {
                label: "Morning",
                icon: "🌅",
            },
            Period::Afternoon => PeriodDisplay {
                label: "Afternoon",
                icon: "☀",
            },
            Period::Evening => PeriodDisplay {
                label: "Evening",
                icon: "🌙",
            },
            Period::Other(_) => FALLBACK_PERIOD_DISPLAY,
        }
    }
}

/// Parses a slot label such as `"09:00 AM"` or `"14:30"`.
pub fn parse_slot_time(label: &str) -> Option<NaiveTime> {
    let label = label.trim();
    NaiveTime::parse_from_str(label, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(label, "%H:%M"))
        .ok()
}
