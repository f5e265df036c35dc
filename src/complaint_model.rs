//! Data model definitions for complaint records.
//!
//! This module defines the structures stored in the complaint slot of the
//! LMDB environment and exchanged over FFI as JSON. The primary model is
//! [`Complaint`]; new records are built from a [`ComplaintForm`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store_error::StoreError;

/// The fixed set of complaint categories offered by the submission form.
///
/// Records keep their category as text, so a persisted record with a
/// category outside this list still loads and filters normally.
pub const CATEGORIES: [&str; 6] = [
    "Roads and Infrastructure",
    "Sanitation",
    "Public Safety",
    "Utilities",
    "Parks and Recreation",
    "Other",
];

/// Category selector value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Workflow state of a complaint.
///
/// Any state may be set from any other state by an administrator; there are
/// no automatic transitions.
///
/// # Serialization
///
/// ```rust
/// use community_complaint_core::complaint_model::ComplaintStatus;
///
/// let json = serde_json::to_string(&ComplaintStatus::InProgress)?;
/// assert_eq!(json, r#""In Progress""#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

impl Display for ComplaintStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = StoreError;

    /// Parses the exact display form (`"Pending"`, `"In Progress"`, `"Resolved"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidStatus(s.to_string()))
    }
}

/// A single community complaint.
///
/// # Structure
///
/// - **id**: Unique identifier, assigned at submission and never changed
/// - **name** / **email**: Identity of the reporter
/// - **category**: One of [`CATEGORIES`]
/// - **description** / **location**: What happened and where
/// - **status**: Current [`ComplaintStatus`], the only mutable field
/// - **date**: Calendar date of submission
/// - **photo**: Optional embedded image (data URL text)
///
/// # JSON form
///
/// ```rust
/// use community_complaint_core::complaint_model::{Complaint, ComplaintStatus};
///
/// let json = r#"{
///     "id": "2",
///     "name": "Jane Smith",
///     "email": "jane@example.com",
///     "category": "Sanitation",
///     "description": "Garbage bins overflowed in the park",
///     "location": "Central Park",
///     "status": "In Progress",
///     "date": "2023-05-18"
/// }"#;
///
/// let complaint: Complaint = serde_json::from_str(json)?;
/// assert_eq!(complaint.status, ComplaintStatus::InProgress);
/// assert!(complaint.photo.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub name: String,
    pub email: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub status: ComplaintStatus,

    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,

    /// Self-describing image text such as `data:image/png;base64,...`.
    /// Omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Field state of the submission form.
///
/// Deserialized from the JSON the presentation layer sends to
/// [`submit_complaint`](crate::submit_complaint).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintForm {
    pub name: String,
    pub email: String,
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl ComplaintForm {
    /// Names of required fields that are empty, in form order.
    ///
    /// Whitespace-only values count as filled, matching an HTML `required`
    /// control. No e-mail format check is performed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("category", &self.category),
            ("description", &self.description),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// The fixed example records written on first start.
pub fn seed_complaints() -> Vec<Complaint> {
    vec![
        seed_record(
            "1",
            ("John Doe", "john@example.com"),
            "Roads and Infrastructure",
            "Large pothole causing traffic issues on Main Street",
            "Main St & 1st Ave",
            ComplaintStatus::Pending,
            (2023, 5, 15),
            Some("/placeholder-pothole.jpg"),
        ),
        seed_record(
            "2",
            ("Jane Smith", "jane@example.com"),
            "Sanitation",
            "Garbage bins overflowed in the park",
            "Central Park",
            ComplaintStatus::InProgress,
            (2023, 5, 18),
            None,
        ),
        seed_record(
            "3",
            ("Robert Johnson", "robert@example.com"),
            "Public Safety",
            "Street light out near the school",
            "Oak St & School Rd",
            ComplaintStatus::Resolved,
            (2023, 5, 10),
            None,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_record(
    id: &str,
    (name, email): (&str, &str),
    category: &str,
    description: &str,
    location: &str,
    status: ComplaintStatus,
    (year, month, day): (i32, u32, u32),
    photo: Option<&str>,
) -> Complaint {
    Complaint {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        status,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        photo: photo.map(str::to_string),
    }
}
