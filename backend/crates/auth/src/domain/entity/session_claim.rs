//! Session Claim Entity
//!
//! Minimal identity handed to the session layer after a successful sign-in.

use serde::Serialize;

use crate::domain::entity::user::UserRecord;
use crate::domain::value_object::email::Email;

/// Identity of an authenticated user
///
/// Only the authenticator can build one, and only once every check passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaim {
    user_id: i64,
    username: Option<String>,
    email: Email,
    display_name: Option<String>,
}

impl SessionClaim {
    pub(crate) fn from_record(record: &UserRecord) -> Self {
        Self {
            user_id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            display_name: record.name.clone(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
