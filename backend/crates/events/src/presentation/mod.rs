//! Presentation Layer
//!
//! Read-only HTTP surface over the template registry.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::EventsAppState;
pub use router::{events_router, events_router_with};
