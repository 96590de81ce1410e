//! Events Router

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::domain::EventTemplateRegistry;
use crate::presentation::handlers::{self, EventsAppState};

/// Router over the process-wide default registry
pub fn events_router() -> Router {
    events_router_with(Arc::new(EventTemplateRegistry::defaults().clone()))
}

/// Router over a caller-supplied registry
pub fn events_router_with(registry: Arc<EventTemplateRegistry>) -> Router {
    let state = EventsAppState { registry };

    Router::new()
        .route("/defaults", get(handlers::list_defaults))
        .route("/defaults/{slug}", get(handlers::get_default))
        .route("/link", get(handlers::booking_link))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = events_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let (status, body) = get_json("/defaults").await;
        assert_eq!(status, StatusCode::OK);
        let templates = body["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[2]["slug"], "60min");
    }

    #[tokio::test]
    async fn test_get_default_falls_back() {
        let (status, body) = get_json("/defaults/does-not-exist").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["durationMinutes"], 15);

        let (_, body) = get_json("/defaults/30min").await;
        assert_eq!(body["title"], "30min");
    }

    #[tokio::test]
    async fn test_booking_link() {
        let (status, body) = get_json("/link?users=alice,bob&slug=intro").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], "/alice+bob/intro");
        assert_eq!(body["groupLabel"], "alice,bob");
    }

    #[tokio::test]
    async fn test_booking_link_without_users_is_bad_request() {
        let (status, body) = get_json("/link?slug=intro").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid-argument");
    }
}
