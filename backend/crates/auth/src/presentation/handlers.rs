//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::{
    AuthConfig, CookiePolicy, CredentialAuthenticator, CsrfService, LoginAttempt, SessionService,
};
use crate::domain::outcome::Outcome;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CREDENTIALS_PROVIDER_ID, CredentialsRequest, CsrfResponse, ProviderInfo, ProvidersResponse,
    SignInResponse, SignOutRequest, SignOutResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub authenticator: Arc<CredentialAuthenticator<R>>,
    pub config: Arc<AuthConfig>,
    pub cookies: Arc<CookiePolicy>,
    pub sessions: SessionService,
    pub csrf: CsrfService,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Derive every service from one config
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let config = Arc::new(config);

        Self {
            authenticator: Arc::new(CredentialAuthenticator::new(
                Arc::new(repo),
                config.clone(),
            )),
            cookies: Arc::new(CookiePolicy::from_config(&config)),
            sessions: SessionService::new(&config),
            csrf: CsrfService::new(config.jwt_secret()),
            config,
        }
    }
}

// ============================================================================
// CSRF
// ============================================================================

/// GET /api/auth/csrf
///
/// Reuses a valid token from the cookie, otherwise issues a new one.
pub async fn csrf_token<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let existing = extract_cookie(&headers, &state.cookies.csrf_token.name)
        .and_then(|cookie| state.csrf.token_from_cookie(&cookie));

    if let Some(csrf_token) = existing {
        return Json(CsrfResponse { csrf_token }).into_response();
    }

    let (csrf_token, cookie_value) = state.csrf.issue();
    let cookie = set_cookie_header(&state.cookies.csrf_token, &cookie_value);

    (
        [(header::SET_COOKIE, cookie)],
        Json(CsrfResponse { csrf_token }),
    )
        .into_response()
}

// ============================================================================
// Providers
// ============================================================================

/// GET /api/auth/providers
pub async fn providers<R>(State(state): State<AuthAppState<R>>) -> Json<ProvidersResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let base = state.config.base_url().as_str().trim_end_matches('/');
    let provider = ProviderInfo {
        id: CREDENTIALS_PROVIDER_ID,
        name: state.config.provider_name.clone(),
        kind: "credentials",
        signin_url: format!("{base}/api/auth/signin/{CREDENTIALS_PROVIDER_ID}"),
        callback_url: format!("{base}/api/auth/callback/{CREDENTIALS_PROVIDER_ID}"),
    };

    Json(ProvidersResponse::from([(CREDENTIALS_PROVIDER_ID, provider)]))
}

// ============================================================================
// Credentials Sign In
// ============================================================================

/// POST /api/auth/callback/credentials
pub async fn callback_credentials<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<CredentialsRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let csrf_cookie = extract_cookie(&headers, &state.cookies.csrf_token.name);
    state
        .csrf
        .verify(csrf_cookie.as_deref(), req.csrf_token.as_deref())?;

    let attempt = LoginAttempt::new(req.email, req.password, req.totp_code);

    match state.authenticator.authenticate(&attempt).await? {
        Outcome::Accepted(claim) => {
            let token = state.sessions.issue(&claim)?;
            let session = state.sessions.session(&token)?;
            let cookie = set_cookie_header(&state.cookies.session_token, &token);

            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(SignInResponse::accepted(session)),
            )
                .into_response())
        }
        Outcome::Rejected(reason) => {
            let status = StatusCode::from_u16(reason.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let url = state.config.pages.error_url(reason.code());

            Ok((status, Json(SignInResponse::rejected(reason.code(), url))).into_response())
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// GET /api/auth/session
///
/// Session view, or `{}` when there is no valid session.
pub async fn session<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let session = extract_cookie(&headers, &state.cookies.session_token.name)
        .and_then(|token| state.sessions.session(&token).ok());

    match session {
        Some(session) => Json(session).into_response(),
        None => Json(serde_json::json!({})).into_response(),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<SignOutRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let csrf_cookie = extract_cookie(&headers, &state.cookies.csrf_token.name);
    state
        .csrf
        .verify(csrf_cookie.as_deref(), req.csrf_token.as_deref())?;

    let cookie = delete_cookie_header(&state.cookies.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignOutResponse {
            url: state.config.pages.sign_out.clone(),
        }),
    )
        .into_response())
}
