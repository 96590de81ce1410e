//! Events (Default Event Templates) Backend Module
//!
//! - `domain/` - Template entities, the immutable registry, link formatting
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! The registry is built once per process and only ever read afterwards,
//! so it can be shared across request handlers without locking.

pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use domain::{EventTemplate, EventTemplateRegistry, format_booking_path, format_group_label};
pub use error::{EventsError, EventsResult};
pub use presentation::router::events_router;
