//! In-Memory Repository
//!
//! Fixed set of users keyed by email. Used by tests and local runs without
//! a database.

use std::collections::HashMap;

use crate::domain::entity::UserRecord;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::AuthResult;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<Email, UserRecord>,
}

impl InMemoryUserRepository {
    pub fn new(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.email.clone(), user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
        Ok(self.users.get(email).cloned())
    }
}
