//! Cookie Policy
//!
//! Names and attributes of the auth cookies, derived once from
//! [`AuthConfig`].

use platform::cookie::{CookieConfig, SameSite};

use crate::application::config::AuthConfig;

const SECURE_PREFIX: &str = "__Secure-";
const HOST_PREFIX: &str = "__Host-";

/// The four cookies of the auth flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub session_token: CookieConfig,
    pub callback_url: CookieConfig,
    pub csrf_token: CookieConfig,
    pub pkce_code_verifier: CookieConfig,
}

impl CookiePolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        let secure = config.use_secure_cookies();
        let prefix = if secure { SECURE_PREFIX } else { "" };

        let base = CookieConfig {
            name: String::new(),
            secure,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            domain: config.cookie_domain().map(str::to_string),
            max_age_secs: None,
        };

        Self {
            session_token: CookieConfig {
                name: format!("{prefix}next-auth.session-token"),
                max_age_secs: Some(config.session_max_age_secs()),
                ..base.clone()
            },
            callback_url: CookieConfig {
                name: format!("{SECURE_PREFIX}next-auth.callback-url"),
                http_only: false,
                secure: true,
                ..base.clone()
            },
            // Browsers drop `__Host-` cookies that carry a Domain attribute
            csrf_token: CookieConfig {
                name: format!("{HOST_PREFIX}next-auth.csrf-token"),
                secure: true,
                domain: None,
                ..base.clone()
            },
            pkce_code_verifier: CookieConfig {
                name: format!("{prefix}next-auth.pkce.code_verifier"),
                ..base
            },
        }
    }
}
