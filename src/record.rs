//! Mentor record and row assembly
//!
//! [`RecordSchema::assemble`] is the only place a row becomes a
//! [`MentorRecord`]. Listing and detail resolution both go through it so the
//! two paths never read a row differently.

use crate::normalize::{self, field, FromField, PriceColumns};
use crate::payload::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display name used when a row carries none
pub const UNKNOWN_NAME: &str = "Unknown";

/// Default currency prefix for formatted prices
pub const DEFAULT_CURRENCY_PREFIX: &str = "₹ ";

/// Canonical mentor entity.
///
/// Always fully defaulted: numeric fields hold a parsed number or their
/// default, never raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRecord {
    pub id: Option<String>,
    pub display_name: String,
    pub role: String,
    pub rating: f64,
    pub rating_count: Option<i64>,
    pub profile_picture_url: Option<String>,
    pub mentorship_areas: Option<Vec<String>>,
    pub organization_name: Option<String>,
    pub session_count: Option<i64>,
    /// Pre-formatted with the currency prefix
    pub price_display: Option<String>,
    pub about: Option<String>,
    pub user_id: Option<String>,
    /// Canonical JSON blob for forward-compatible fields
    pub metadata_json: Option<String>,
    /// Raw timestamp as stored by the backend
    pub created_at: Option<String>,
}

impl Default for MentorRecord {
    fn default() -> Self {
        Self {
            id: None,
            display_name: UNKNOWN_NAME.to_string(),
            role: String::new(),
            rating: 0.0,
            rating_count: None,
            profile_picture_url: None,
            mentorship_areas: None,
            organization_name: None,
            session_count: None,
            price_display: None,
            about: None,
            user_id: None,
            metadata_json: None,
            created_at: None,
        }
    }
}

impl MentorRecord {
    /// Assemble with the default schema and currency prefix
    pub fn from_row(row: &Row) -> Self {
        RecordSchema::default().assemble(row, DEFAULT_CURRENCY_PREFIX)
    }

    /// Parsed metadata blob, if it is a JSON object
    pub fn metadata(&self) -> Option<Row> {
        let raw = self.metadata_json.as_deref()?;
        match serde_json::from_str::<Value>(raw).ok()? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar lookup inside the metadata blob, same rules as row fields
    pub fn metadata_field<T: FromField, K: AsRef<str>>(&self, keys: &[K]) -> Option<T> {
        self.metadata().and_then(|meta| field(&meta, keys))
    }

    pub fn years_of_experience(&self) -> Option<i64> {
        self.metadata_field(&[
            "years_of_experience",
            "yearsOfExperience",
            "experience_years",
            "experience",
        ])
    }

    /// Session total from metadata, falling back to the `sessionCount` column
    pub fn total_sessions(&self) -> Option<i64> {
        self.metadata_field(&["total_sessions", "totalSessions", "sessions_completed"])
            .or(self.session_count)
    }
}

/// Ordered candidate keys for every record field.
///
/// Earlier keys win. Producers that rename a column only need a config
/// change here, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub id: Vec<String>,
    pub display_name: Vec<String>,
    pub role: Vec<String>,
    pub rating: Vec<String>,
    pub rating_count: Vec<String>,
    pub profile_picture_url: Vec<String>,
    pub mentorship_areas: Vec<String>,
    pub organization_name: Vec<String>,
    pub session_count: Vec<String>,
    pub price: PriceColumns,
    pub about: Vec<String>,
    pub user_id: Vec<String>,
    pub metadata: Vec<String>,
    pub created_at: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            id: keys(&["id", "mentor_id", "mentorId"]),
            display_name: keys(&["name", "display_name", "displayName", "full_name", "fullName"]),
            role: keys(&["role", "title", "designation"]),
            rating: keys(&["rating", "avg_rating", "averageRating"]),
            rating_count: keys(&["rating_count", "ratingCount", "reviews_count"]),
            profile_picture_url: keys(&[
                "profile_picture_url",
                "profilePictureUrl",
                "profile_pic",
                "avatar_url",
            ]),
            mentorship_areas: keys(&["mentorship_areas", "mentorshipAreas", "areas"]),
            organization_name: keys(&["organization_name", "organizationName", "organization"]),
            session_count: keys(&["session_count", "sessionCount", "sessions"]),
            price: PriceColumns::default(),
            about: keys(&["about", "bio", "description"]),
            user_id: keys(&["user_id", "userId"]),
            metadata: keys(&["metadata", "meta"]),
            created_at: keys(&["created_at", "createdAt"]),
        }
    }
}

impl RecordSchema {
    /// Build a record from one row. Never fails; missing or unreadable
    /// fields take their documented defaults.
    pub fn assemble(&self, row: &Row, currency_prefix: &str) -> MentorRecord {
        let defaults = MentorRecord::default();

        MentorRecord {
            id: field(row, &self.id),
            display_name: field(row, &self.display_name).unwrap_or(defaults.display_name),
            role: field(row, &self.role).unwrap_or(defaults.role),
            rating: field(row, &self.rating).unwrap_or(defaults.rating),
            rating_count: field(row, &self.rating_count),
            profile_picture_url: field(row, &self.profile_picture_url),
            mentorship_areas: normalize::areas(row, &self.mentorship_areas),
            organization_name: field(row, &self.organization_name),
            session_count: field(row, &self.session_count),
            price_display: normalize::price(row, &self.price, currency_prefix),
            about: field(row, &self.about),
            user_id: field(row, &self.user_id),
            metadata_json: normalize::metadata(row, &self.metadata),
            created_at: field(row, &self.created_at),
        }
    }

    /// Assemble every row, preserving order
    pub fn assemble_all(&self, rows: &[Row], currency_prefix: &str) -> Vec<MentorRecord> {
        rows.iter()
            .map(|row| self.assemble(row, currency_prefix))
            .collect()
    }
}
