//! Event Template Entity
//!
//! A preconfigured bookable meeting definition shown in the booking UI
//! before the user has created event types of their own.

use serde::Serialize;

/// How far into the future a template can be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodPolicy {
    #[default]
    Unlimited,
    /// Bookable for a rolling number of days from today
    Rolling,
    /// Bookable within a fixed date range
    Range,
}

/// How hosts share a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulingType {
    RoundRobin,
    #[default]
    Collective,
}

/// Booking constraints attached to a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPolicy {
    pub minimum_notice_minutes: u32,
    pub period: PeriodPolicy,
    pub period_days: Option<u32>,
    pub period_count_calendar_days: Option<bool>,
    pub buffer_before_minutes: u32,
    pub buffer_after_minutes: u32,
    pub slot_interval_minutes: Option<u32>,
    pub price_minor_units: u64,
    /// ISO 4217 code, lowercase
    pub currency_code: String,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            minimum_notice_minutes: 120,
            period: PeriodPolicy::Unlimited,
            period_days: None,
            period_count_calendar_days: None,
            buffer_before_minutes: 0,
            buffer_after_minutes: 0,
            slot_interval_minutes: None,
            price_minor_units: 0,
            currency_code: "usd".to_string(),
        }
    }
}

/// Host shown on a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRef {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub time_zone: Option<String>,
    pub hide_branding: bool,
}

impl HostRef {
    /// Anonymous placeholder host used by the defaults
    pub fn placeholder() -> Self {
        Self {
            display_name: None,
            username: None,
            time_zone: None,
            hide_branding: true,
        }
    }
}

/// Bookable event template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub id: u32,
    pub duration_minutes: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub hidden: bool,
    pub time_zone: Option<String>,
    pub scheduling_type: SchedulingType,
    pub booking_policy: BookingPolicy,
    pub hosts: Vec<HostRef>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl EventTemplate {
    /// Default template of the given length, titled and slugged `"<n>min"`
    pub fn of_minutes(duration_minutes: u32) -> Self {
        debug_assert!(duration_minutes > 0);
        let slug = format!("{}min", duration_minutes);

        Self {
            id: 0,
            duration_minutes,
            title: slug.clone(),
            slug,
            description: String::new(),
            hidden: false,
            time_zone: None,
            scheduling_type: SchedulingType::default(),
            booking_policy: BookingPolicy::default(),
            hosts: vec![HostRef::placeholder()],
            metadata: serde_json::Map::new(),
        }
    }
}
