//! PostgreSQL Repository Implementation
//!
//! Reads the application's existing `users` table. Column names follow the
//! camelCase convention of that schema, hence the quoted identifiers.
//!
//! The `password` column must hold Argon2 PHC strings
//! (`$argon2id$v=19$...`). Rows hashed with another scheme (bcrypt
//! `$2a$`/`$2b$`) fail verification as `incorrect-password` and are logged
//! at `warn`; rehash them before pointing this repository at the table.

use sqlx::PgPool;

use crate::domain::entity::UserRecord;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::AuthResult;

/// PostgreSQL-backed user lookup
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                name,
                email,
                password,
                "twoFactorEnabled" AS two_factor_enabled,
                "twoFactorSecret" AS two_factor_secret
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_record))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: Option<String>,
    name: Option<String>,
    email: String,
    password: Option<String>,
    two_factor_enabled: bool,
    two_factor_secret: Option<String>,
}

impl UserRow {
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: i64::from(self.id),
            username: self.username,
            name: self.name,
            email: Email::from_db(self.email),
            password_hash: self.password,
            two_factor_enabled: self.two_factor_enabled,
            two_factor_secret: self.two_factor_secret,
        }
    }
}
