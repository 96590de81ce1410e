//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::session::Session;

pub const CREDENTIALS_PROVIDER_ID: &str = "credentials";

// ============================================================================
// CSRF
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}

// ============================================================================
// Providers
// ============================================================================

/// One sign-in provider
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub signin_url: String,
    pub callback_url: String,
}

/// Providers keyed by id
pub type ProvidersResponse = BTreeMap<&'static str, ProviderInfo>;

// ============================================================================
// Credentials Sign In
// ============================================================================

/// Credentials callback request (no `Debug`: carries the password)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
    /// One-time code, if the account has 2FA
    #[serde(default)]
    pub totp_code: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// Credentials callback response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    /// Rejection code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Error page to redirect to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SignInResponse {
    pub fn accepted(session: Session) -> Self {
        Self {
            ok: true,
            session: Some(session),
            error: None,
            url: None,
        }
    }

    pub fn rejected(code: &'static str, url: String) -> Self {
        Self {
            ok: false,
            session: None,
            error: Some(code),
            url: Some(url),
        }
    }
}

// ============================================================================
// Sign Out
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutRequest {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// Where the client should go after signing out
#[derive(Debug, Clone, Serialize)]
pub struct SignOutResponse {
    pub url: String,
}
