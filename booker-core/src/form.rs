use crate::error::{BookingError, Result};
use crate::model::BookingData;

/// Buffer behind the details form.
///
/// Submitting hands out a copy of the buffer and leaves it untouched; a new
/// booking starts from a fresh form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    data: BookingData,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.data.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.data.email = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.data.phone = value.into();
    }

    pub fn set_notes(&mut self, value: impl Into<String>) {
        self.data.notes = value.into();
    }

    pub fn data(&self) -> &BookingData {
        &self.data
    }

    /// Only presence of name, email and phone is checked here. Format checks
    /// belong to the store.
    pub fn validate(&self) -> Result<BookingData> {
        let missing = self.data.missing_required_fields();
        if !missing.is_empty() {
            return Err(BookingError::MissingFields(missing));
        }
        Ok(self.data.clone())
    }
}
