//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    Router::new()
        .route("/csrf", get(handlers::csrf_token::<R>))
        .route("/providers", get(handlers::providers::<R>))
        .route("/session", get(handlers::session::<R>))
        .route(
            "/callback/credentials",
            post(handlers::callback_credentials::<R>),
        )
        .route("/signout", post(handlers::sign_out::<R>))
        .with_state(state)
}
