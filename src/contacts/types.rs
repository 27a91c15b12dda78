//! Contact Data Types
//!
//! The persisted booking record and the incoming submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact/booking request as persisted in the record store.
///
/// `selectedPlan` keeps its wire spelling on disk so existing records and
/// frontend consumers agree on the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, rename = "selectedPlan")]
    pub selected_plan: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Incoming submission payload. Every field is optional at the parse stage
/// so the validator, not the deserializer, reports what is missing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    #[serde(default, alias = "selectedPlan")]
    pub selected_plan: Option<String>,
}

impl ContactSubmission {
    /// Pure required-field check. Returns the names of the missing fields;
    /// blank or whitespace-only values count as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if is_blank(&self.phone) {
            missing.push("phone");
        }
        if is_blank(&self.message) {
            missing.push("message");
        }
        missing
    }

    /// Stamps the submission into a persistable record. Call only after
    /// `missing_fields` came back empty.
    pub fn into_record(self) -> ContactRecord {
        ContactRecord {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            selected_plan: self.selected_plan,
            message: self.message.unwrap_or_default(),
            timestamp: Utc::now(),
        }
    }
}

/// Success payload: the booking was recorded (mail outcome not included).
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |value| value.trim().is_empty())
}
