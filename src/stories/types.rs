//! Story Data Types
//!
//! The persisted story record and the transient submission collected from
//! the multipart form.

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transformation story as persisted in the record store.
///
/// Only `name` and `story` are required to parse, so records written by
/// older frontends (some omit `email` or the location fields) still
/// aggregate. `image` holds the public `/uploads/...` path when a photo was
/// attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub story: String,
    #[serde(default)]
    pub image: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Field set drained from the multipart form, before validation.
#[derive(Debug, Default)]
pub struct StorySubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub story: Option<String>,
    pub image: Option<UploadedImage>,
}

/// An uploaded photo part, staged in memory until validation passes.
#[derive(Debug)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Bytes,
}

impl StorySubmission {
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
        if is_blank(&self.story) {
            missing.push("story");
        }
        missing
    }

    /// Stamps the submission into a persistable record. Call only after
    /// `missing_fields` came back empty; `image` is the attachment store
    /// reference, if a photo was saved.
    pub fn into_record(self, image: Option<String>) -> StoryRecord {
        StoryRecord {
            name: self.name.unwrap_or_default(),
            email: self.email,
            city: self.city,
            country: self.country,
            story: self.story.unwrap_or_default(),
            image,
            timestamp: Utc::now(),
        }
    }
}

/// Success payload for API callers.
#[derive(Debug, Serialize)]
pub struct SubmitStoryResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |value| value.trim().is_empty())
}
