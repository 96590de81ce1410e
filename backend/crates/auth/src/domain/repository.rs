//! Repository Traits
//!
//! Read access to stored users. Implementations live in the infra layer.

use crate::domain::entity::UserRecord;
use crate::domain::value_object::Email;
use crate::error::AuthResult;

/// User lookup used by sign-in
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>>;
}
