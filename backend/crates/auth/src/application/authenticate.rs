//! Credential Authentication Use Case
//!
//! Decides whether an email/password (+ optional one-time code) attempt
//! signs a user in. The procedure is linear and stops at the first failed
//! check:
//!
//! 1. look the user up by normalized email
//! 2. require a stored password hash, then verify the password
//! 3. without 2FA, accept
//! 4. with 2FA, require a code, decrypt the stored secret, check the code
//!
//! Every server-side anomaly on the 2FA path (no secret, no key, bad
//! ciphertext, wrong secret length) is logged here with its cause and
//! reported to the caller only as [`Reason::InternalError`].

use std::fmt;
use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{SessionClaim, UserRecord};
use crate::domain::outcome::{Outcome, Reason};
use crate::domain::repository::UserRepository;
use crate::domain::services::{
    AesCbcCipher, Argon2PasswordVerifier, OneTimeCodeValidator, PasswordVerifier, SecretCipher,
    TotpCodeValidator,
};
use crate::domain::value_object::{Email, TotpSecret, TotpSecretError};
use crate::error::AuthResult;

/// One sign-in attempt as submitted by the client
pub struct LoginAttempt {
    pub email: String,
    pub password: ClearTextPassword,
    pub one_time_code: Option<String>,
}

impl LoginAttempt {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        one_time_code: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: ClearTextPassword::new(password.into()),
            one_time_code,
        }
    }

    /// Submitted code; only an empty string counts as absent.
    ///
    /// Whitespace is a submitted (and therefore incorrect) code.
    pub fn one_time_code(&self) -> Option<&str> {
        self.one_time_code
            .as_deref()
            .filter(|code| !code.is_empty())
    }
}

impl fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field(
                "one_time_code",
                &self.one_time_code.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Credential authenticator
pub struct CredentialAuthenticator<
    U,
    P = Argon2PasswordVerifier,
    C = AesCbcCipher,
    V = TotpCodeValidator,
> where
    U: UserRepository,
    P: PasswordVerifier,
    C: SecretCipher,
    V: OneTimeCodeValidator,
{
    user_repo: Arc<U>,
    passwords: P,
    cipher: C,
    codes: V,
    config: Arc<AuthConfig>,
}

impl<U> CredentialAuthenticator<U>
where
    U: UserRepository + Send + Sync,
{
    /// Authenticator with the production collaborators
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self::with_services(
            user_repo,
            Argon2PasswordVerifier,
            AesCbcCipher,
            TotpCodeValidator,
            config,
        )
    }
}

impl<U, P, C, V> CredentialAuthenticator<U, P, C, V>
where
    U: UserRepository + Send + Sync,
    P: PasswordVerifier,
    C: SecretCipher,
    V: OneTimeCodeValidator,
{
    pub fn with_services(
        user_repo: Arc<U>,
        passwords: P,
        cipher: C,
        codes: V,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            passwords,
            cipher,
            codes,
            config,
        }
    }

    /// Run the decision procedure for one attempt
    ///
    /// ## Errors
    /// Only repository failures; every rejection is an `Ok(Outcome::Rejected)`.
    pub async fn authenticate(&self, attempt: &LoginAttempt) -> AuthResult<Outcome> {
        let email = Email::for_lookup(&attempt.email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Sign-in attempt for unknown email");
            return Ok(Reason::UserNotFound.into());
        };

        let outcome = self.decide(&user, attempt);
        match &outcome {
            Outcome::Accepted(_) => {
                tracing::info!(user_id = user.id, "User signed in with credentials");
            }
            Outcome::Rejected(Reason::SecondFactorRequired) => {
                tracing::debug!(user_id = user.id, "Second factor required");
            }
            Outcome::Rejected(reason) => {
                tracing::warn!(user_id = user.id, reason = %reason, "Sign-in rejected");
            }
        }

        Ok(outcome)
    }

    /// Checks after the user is known (steps 2 to 10)
    fn decide(&self, user: &UserRecord, attempt: &LoginAttempt) -> Outcome {
        let Some(password_hash) = user.password_hash.as_deref() else {
            return Reason::UserMissingPassword.into();
        };

        if !self.passwords.verify(&attempt.password, password_hash) {
            return Reason::IncorrectPassword.into();
        }

        if user.two_factor_enabled {
            let Some(code) = attempt.one_time_code() else {
                return Reason::SecondFactorRequired.into();
            };

            if let Err(reason) = self.check_second_factor(user, code) {
                return reason.into();
            }
        }

        Outcome::Accepted(SessionClaim::from_record(user))
    }

    fn check_second_factor(&self, user: &UserRecord, code: &str) -> Result<(), Reason> {
        let Some(encrypted) = user.two_factor_secret.as_deref() else {
            tracing::error!(
                user_id = user.id,
                "Two factor is enabled for user but no secret is stored"
            );
            return Err(Reason::InternalError);
        };

        let Some(key) = self.config.encryption_key() else {
            tracing::error!("Missing encryption key; cannot proceed with two factor login");
            return Err(Reason::InternalError);
        };

        let decrypted = self.cipher.decrypt(encrypted, key).map_err(|e| {
            tracing::error!(user_id = user.id, error = %e, "Failed to decrypt two factor secret");
            Reason::InternalError
        })?;

        let secret = TotpSecret::from_decrypted(decrypted).map_err(|e| {
            match e {
                TotpSecretError::Length { expected, actual } => tracing::error!(
                    user_id = user.id,
                    expected,
                    actual,
                    "Two factor secret decryption produced the wrong length"
                ),
                TotpSecretError::Encoding => tracing::error!(
                    user_id = user.id,
                    "Decrypted two factor secret is not base32 text"
                ),
            }
            Reason::InternalError
        })?;

        if !self.codes.check(code, &secret) {
            return Err(Reason::IncorrectTwoFactorCode);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use platform::crypto::{self, CipherError};

    use crate::error::AuthError;

    const PASSWORD: &str = "correct horse battery staple";

    #[derive(Default)]
    struct Counters {
        lookups: AtomicUsize,
        verifies: AtomicUsize,
        decrypts: AtomicUsize,
        checks: AtomicUsize,
    }

    impl Counters {
        fn get(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    struct FakeRepo {
        users: HashMap<String, UserRecord>,
        fail: bool,
        counters: Arc<Counters>,
    }

    impl UserRepository for FakeRepo {
        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
            self.counters.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AuthError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.users.get(email.as_str()).cloned())
        }
    }

    struct CountingVerifier(Arc<Counters>);

    impl PasswordVerifier for CountingVerifier {
        fn verify(&self, password: &ClearTextPassword, stored_hash: &str) -> bool {
            self.0.verifies.fetch_add(1, Ordering::SeqCst);
            Argon2PasswordVerifier.verify(password, stored_hash)
        }
    }

    struct CountingCipher(Arc<Counters>);

    impl SecretCipher for CountingCipher {
        fn decrypt(&self, ciphertext: &str, key: &str) -> Result<Vec<u8>, CipherError> {
            self.0.decrypts.fetch_add(1, Ordering::SeqCst);
            AesCbcCipher.decrypt(ciphertext, key)
        }
    }

    struct CountingValidator(Arc<Counters>);

    impl OneTimeCodeValidator for CountingValidator {
        fn check(&self, code: &str, secret: &TotpSecret) -> bool {
            self.0.checks.fetch_add(1, Ordering::SeqCst);
            TotpCodeValidator.check(code, secret)
        }
    }

    type TestAuthenticator =
        CredentialAuthenticator<FakeRepo, CountingVerifier, CountingCipher, CountingValidator>;

    fn password_hash() -> String {
        ClearTextPassword::new(PASSWORD.to_string())
            .hash()
            .unwrap()
            .as_phc_string()
            .to_string()
    }

    fn alice() -> UserRecord {
        UserRecord::new(1, Email::from_db("alice@example.com"), Some(password_hash()))
            .with_username("alice")
            .with_name("Alice")
    }

    fn config() -> AuthConfig {
        AuthConfig::development().unwrap()
    }

    fn authenticator_with(
        users: Vec<UserRecord>,
        config: AuthConfig,
    ) -> (TestAuthenticator, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let repo = FakeRepo {
            users: users
                .into_iter()
                .map(|user| (user.email.as_str().to_string(), user))
                .collect(),
            fail: false,
            counters: counters.clone(),
        };
        let authenticator = CredentialAuthenticator::with_services(
            Arc::new(repo),
            CountingVerifier(counters.clone()),
            CountingCipher(counters.clone()),
            CountingValidator(counters.clone()),
            Arc::new(config),
        );
        (authenticator, counters)
    }

    fn authenticator(users: Vec<UserRecord>) -> (TestAuthenticator, Arc<Counters>) {
        authenticator_with(users, config())
    }

    /// Alice with 2FA on and her encrypted secret stored
    fn alice_with_2fa() -> (UserRecord, TotpSecret) {
        let secret = TotpSecret::generate();
        let key = config().encryption_key().unwrap().to_string();
        let encrypted = crypto::symmetric_encrypt(secret.as_bytes(), &key).unwrap();
        (alice().with_two_factor(Some(encrypted)), secret)
    }

    #[tokio::test]
    async fn test_unknown_email_is_user_not_found_without_password_check() {
        let (auth, counters) = authenticator(vec![alice()]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("bob@example.com", PASSWORD, None))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::UserNotFound));
        assert_eq!(Counters::get(&counters.lookups), 1);
        assert_eq!(Counters::get(&counters.verifies), 0);
    }

    #[tokio::test]
    async fn test_any_email_string_is_looked_up() {
        let (auth, counters) = authenticator(vec![alice()]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("not-an-email", PASSWORD, None))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::UserNotFound));
        assert_eq!(Counters::get(&counters.lookups), 1);
        assert_eq!(Counters::get(&counters.verifies), 0);
    }

    #[tokio::test]
    async fn test_account_without_dotted_domain_signs_in() {
        let user = UserRecord::new(3, Email::from_db("admin@localhost"), Some(password_hash()));
        let (auth, _) = authenticator(vec![user]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("Admin@LocalHost", PASSWORD, None))
            .await
            .unwrap();

        assert_eq!(outcome.claim().map(SessionClaim::user_id), Some(3));
    }

    #[tokio::test]
    async fn test_email_is_normalized_before_lookup() {
        let (auth, _) = authenticator(vec![alice()]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("  ALICE@Example.com ", PASSWORD, None))
            .await
            .unwrap();
        assert!(outcome.is_accepted());
    }

    #[tokio::test]
    async fn test_missing_password_hash() {
        let user = UserRecord::new(2, Email::from_db("sso@example.com"), None);
        let (auth, counters) = authenticator(vec![user]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("sso@example.com", PASSWORD, None))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::UserMissingPassword));
        assert_eq!(Counters::get(&counters.verifies), 0);
    }

    #[tokio::test]
    async fn test_incorrect_password() {
        let (user, _) = alice_with_2fa();
        let (auth, counters) = authenticator(vec![user]);
        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                "wrong",
                Some("123456".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::IncorrectPassword));
        assert_eq!(Counters::get(&counters.decrypts), 0);
        assert_eq!(Counters::get(&counters.checks), 0);
    }

    #[tokio::test]
    async fn test_password_is_compared_byte_exact() {
        // Full-width Latin: NFKC would fold this to ASCII "password"
        let typed = "\u{ff50}\u{ff41}\u{ff53}\u{ff53}\u{ff57}\u{ff4f}\u{ff52}\u{ff44}";
        let hash = ClearTextPassword::new(typed.to_string()).hash().unwrap();
        let user = UserRecord::new(
            4,
            Email::from_db("wide@example.com"),
            Some(hash.as_phc_string().to_string()),
        );
        let (auth, _) = authenticator(vec![user]);

        let outcome = auth
            .authenticate(&LoginAttempt::new("wide@example.com", typed, None))
            .await
            .unwrap();
        assert_eq!(outcome.claim().map(SessionClaim::user_id), Some(4));

        let outcome = auth
            .authenticate(&LoginAttempt::new("wide@example.com", "password", None))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Rejected(Reason::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_correct_password_without_2fa_is_accepted() {
        let (auth, counters) = authenticator(vec![alice()]);
        let outcome = auth
            .authenticate(&LoginAttempt::new("alice@example.com", PASSWORD, None))
            .await
            .unwrap();

        let claim = outcome.claim().unwrap();
        assert_eq!(claim.user_id(), 1);
        assert_eq!(claim.username(), Some("alice"));
        assert_eq!(claim.email().as_str(), "alice@example.com");
        assert_eq!(claim.display_name(), Some("Alice"));
        assert_eq!(Counters::get(&counters.decrypts), 0);
    }

    #[tokio::test]
    async fn test_code_is_ignored_when_2fa_is_off() {
        let (auth, counters) = authenticator(vec![alice()]);
        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some("000000".to_string()),
            ))
            .await
            .unwrap();

        assert!(outcome.is_accepted());
        assert_eq!(Counters::get(&counters.checks), 0);
    }

    #[tokio::test]
    async fn test_2fa_without_code_requires_second_factor_without_decrypt() {
        let (user, _) = alice_with_2fa();
        let (auth, counters) = authenticator(vec![user]);

        for code in [None, Some(String::new())] {
            let outcome = auth
                .authenticate(&LoginAttempt::new("alice@example.com", PASSWORD, code))
                .await
                .unwrap();
            assert_eq!(outcome, Outcome::Rejected(Reason::SecondFactorRequired));
        }
        assert_eq!(Counters::get(&counters.decrypts), 0);
    }

    #[tokio::test]
    async fn test_whitespace_code_is_an_incorrect_code() {
        let (user, _) = alice_with_2fa();
        let (auth, counters) = authenticator(vec![user]);
        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some("   ".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::IncorrectTwoFactorCode));
        assert_eq!(Counters::get(&counters.checks), 1);
    }

    #[tokio::test]
    async fn test_2fa_with_correct_code_is_accepted() {
        let (user, secret) = alice_with_2fa();
        let (auth, counters) = authenticator(vec![user]);
        let code = secret.generate_current().unwrap();

        let outcome = auth
            .authenticate(&LoginAttempt::new("alice@example.com", PASSWORD, Some(code)))
            .await
            .unwrap();

        assert_eq!(outcome.claim().map(SessionClaim::user_id), Some(1));
        assert_eq!(Counters::get(&counters.decrypts), 1);
        assert_eq!(Counters::get(&counters.checks), 1);
    }

    #[tokio::test]
    async fn test_2fa_with_wrong_code() {
        let (user, secret) = alice_with_2fa();
        let (auth, _) = authenticator(vec![user]);
        let current = secret.generate_current().unwrap();
        let wrong = if current == "000000" { "111111" } else { "000000" };

        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some(wrong.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::IncorrectTwoFactorCode));
    }

    #[tokio::test]
    async fn test_2fa_without_stored_secret_is_internal_error() {
        let user = alice().with_two_factor(None);
        let (auth, counters) = authenticator(vec![user]);
        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some("123456".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::InternalError));
        assert_eq!(Counters::get(&counters.decrypts), 0);
    }

    #[tokio::test]
    async fn test_2fa_without_encryption_key_is_internal_error() {
        let (user, secret) = alice_with_2fa();
        let no_key = AuthConfig::new("http://localhost:3000", "jwt").unwrap();
        let (auth, counters) = authenticator_with(vec![user], no_key);

        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                secret.generate_current(),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::InternalError));
        assert_eq!(Counters::get(&counters.decrypts), 0);
    }

    #[tokio::test]
    async fn test_wrong_secret_length_is_internal_error_without_details() {
        let key = config().encryption_key().unwrap().to_string();
        let short = crypto::symmetric_encrypt(b"JBSWY3DPEHPK3PXP", &key).unwrap();
        let user = alice().with_two_factor(Some(short));
        let (auth, counters) = authenticator(vec![user]);

        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some("123456".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::InternalError));
        assert_eq!(Counters::get(&counters.checks), 0);

        let public = Reason::InternalError.to_app_error();
        assert!(!public.message().contains("16"));
        assert!(!public.message().contains("32"));
        assert_eq!(public.code(), Some("internal-server-error"));
    }

    #[tokio::test]
    async fn test_undecryptable_secret_is_internal_error() {
        let user = alice().with_two_factor(Some("zz:not-hex".to_string()));
        let (auth, _) = authenticator(vec![user]);

        let outcome = auth
            .authenticate(&LoginAttempt::new(
                "alice@example.com",
                PASSWORD,
                Some("123456".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Rejected(Reason::InternalError));
    }

    #[tokio::test]
    async fn test_repository_failure_is_an_error() {
        let counters = Arc::new(Counters::default());
        let repo = FakeRepo {
            users: HashMap::new(),
            fail: true,
            counters: counters.clone(),
        };
        let auth = CredentialAuthenticator::with_services(
            Arc::new(repo),
            CountingVerifier(counters.clone()),
            CountingCipher(counters.clone()),
            CountingValidator(counters.clone()),
            Arc::new(config()),
        );

        let result = auth
            .authenticate(&LoginAttempt::new("alice@example.com", PASSWORD, None))
            .await;
        assert!(matches!(result, Err(AuthError::Database(_))));
    }

    #[test]
    fn test_login_attempt_debug_is_redacted() {
        let attempt = LoginAttempt::new("a@example.com", "hunter2", Some("123456".into()));
        let debug = format!("{attempt:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("123456"));
    }
}
