use serde::{Deserialize, Serialize};

/// User-facing strings. Missing keys in a deserialized override fall back to
/// the defaults, so hosts only specify what they want to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookerCopy {
    pub header_title: String,
    pub header_description: String,
    pub calendar_title: String,
    pub calendar_subtitle: String,
    pub continue_to_time: String,
    pub time_title: String,
    pub time_subtitle: String,
    pub continue_to_details: String,
    pub back_label: String,
    pub booking_submit_label: String,
    pub booking_form_title: String,
    pub booking_form_subtitle: String,
    pub confirmation_title: String,
    pub confirmation_description: String,
    pub new_booking_button: String,
    pub add_to_calendar_button: String,
    pub appointment_details_heading: String,
    pub fetch_error: String,
    pub submit_error: String,
    pub loading_availability: String,
}

impl Default for BookerCopy {
    fn default() -> Self {
        Self {
            header_title: "Appointment Booking".into(),
            header_description: "Schedule your appointment in minutes".into(),
            calendar_title: "Select a Date".into(),
            calendar_subtitle: "Choose your preferred appointment date".into(),
            continue_to_time: "Continue to Time Selection".into(),
            time_title: "Choose a Time".into(),
            time_subtitle: "Select your preferred time slot".into(),
            continue_to_details: "Continue to Details".into(),
            back_label: "Back".into(),
            booking_submit_label: "Confirm Booking".into(),
            booking_form_title: "Booking Details".into(),
            booking_form_subtitle: "Complete your appointment information".into(),
            confirmation_title: "Booking Confirmed!".into(),
            confirmation_description: "Your appointment has been successfully scheduled. A confirmation email has been sent to your inbox.".into(),
            new_booking_button: "Book Another Appointment".into(),
            add_to_calendar_button: "Add to Calendar".into(),
            appointment_details_heading: "Appointment Details".into(),
            fetch_error: "Failed to load booking availability.".into(),
            submit_error: "Failed to create booking. Please try another time slot.".into(),
            loading_availability: "Loading availability...".into(),
        }
    }
}

impl BookerCopy {
    /// Applies a partial JSON override on top of the defaults.
    pub fn from_json_overrides(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let copy =
            BookerCopy::from_json_overrides(r#"{"headerTitle":"Book a Haircut"}"#).unwrap();
        assert_eq!(copy.header_title, "Book a Haircut");
        assert_eq!(copy.back_label, "Back");
        assert_eq!(copy.submit_error, BookerCopy::default().submit_error);
    }
}
