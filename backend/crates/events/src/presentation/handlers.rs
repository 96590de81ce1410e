//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::domain::{EventTemplate, EventTemplateRegistry, format_booking_path, format_group_label};
use crate::error::EventsResult;
use crate::presentation::dto::{BookingLinkQuery, BookingLinkResponse, EventTemplateListResponse};

/// Shared state for event handlers
#[derive(Clone)]
pub struct EventsAppState {
    pub registry: Arc<EventTemplateRegistry>,
}

/// GET /api/events/defaults
pub async fn list_defaults(State(state): State<EventsAppState>) -> Json<EventTemplateListResponse> {
    Json(EventTemplateListResponse {
        templates: state.registry.templates().to_vec(),
    })
}

/// GET /api/events/defaults/{slug}
pub async fn get_default(
    State(state): State<EventsAppState>,
    Path(slug): Path<String>,
) -> Json<EventTemplate> {
    Json(state.registry.lookup_by_slug(&slug).clone())
}

/// GET /api/events/link
pub async fn booking_link(Query(query): Query<BookingLinkQuery>) -> EventsResult<Json<BookingLinkResponse>> {
    let usernames = query.usernames();
    let path = format_booking_path(&usernames, &query.slug)?;

    Ok(Json(BookingLinkResponse {
        path,
        group_label: format_group_label(&usernames),
    }))
}
