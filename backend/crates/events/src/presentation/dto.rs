//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::EventTemplate;

/// Default template list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplateListResponse {
    pub templates: Vec<EventTemplate>,
}

/// Booking link query (`?users=alice,bob&slug=intro`)
#[derive(Debug, Clone, Deserialize)]
pub struct BookingLinkQuery {
    /// Comma-separated usernames, in host order
    #[serde(default)]
    pub users: String,
    pub slug: String,
}

impl BookingLinkQuery {
    pub fn usernames(&self) -> Vec<&str> {
        self.users
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .collect()
    }
}

/// Booking link response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLinkResponse {
    pub path: String,
    pub group_label: String,
}
