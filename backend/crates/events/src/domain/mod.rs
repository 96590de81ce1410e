//! Domain Layer
//!
//! Event templates, the default registry and booking link formatting.

pub mod event_template;
pub mod link;
pub mod registry;

pub use event_template::{BookingPolicy, EventTemplate, HostRef, PeriodPolicy, SchedulingType};
pub use link::{format_booking_path, format_group_label};
pub use registry::EventTemplateRegistry;
