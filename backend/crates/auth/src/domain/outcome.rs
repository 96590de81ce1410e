//! Sign-in Outcome
//!
//! Terminal states of the credential decision procedure.

use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::domain::entity::SessionClaim;

/// Why a sign-in attempt was rejected
///
/// `InternalError` covers every server-side anomaly (missing secret or key,
/// undecryptable secret, wrong secret length). The concrete cause is logged
/// where it is detected and never carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    #[display("user-not-found")]
    UserNotFound,
    #[display("missing-password")]
    #[serde(rename = "missing-password")]
    UserMissingPassword,
    #[display("incorrect-password")]
    IncorrectPassword,
    #[display("second-factor-required")]
    SecondFactorRequired,
    #[display("incorrect-two-factor-code")]
    IncorrectTwoFactorCode,
    #[display("internal-server-error")]
    #[serde(rename = "internal-server-error")]
    InternalError,
}

impl Reason {
    /// Machine-readable code shown to clients
    pub const fn code(&self) -> &'static str {
        use Reason::*;
        match self {
            UserNotFound => "user-not-found",
            UserMissingPassword => "missing-password",
            IncorrectPassword => "incorrect-password",
            SecondFactorRequired => "second-factor-required",
            IncorrectTwoFactorCode => "incorrect-two-factor-code",
            InternalError => "internal-server-error",
        }
    }

    pub const fn message(&self) -> &'static str {
        use Reason::*;
        match self {
            UserNotFound => "No user found for these credentials",
            UserMissingPassword => "This account has no password, sign in another way",
            IncorrectPassword => "Incorrect password",
            SecondFactorRequired => "A two-factor authentication code is required",
            IncorrectTwoFactorCode => "Incorrect two-factor authentication code",
            InternalError => "Something went wrong, please try again",
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        use Reason::*;
        match self {
            UserNotFound | UserMissingPassword | IncorrectPassword | IncorrectTwoFactorCode => {
                ErrorKind::Unauthorized
            }
            SecondFactorRequired => ErrorKind::PreconditionRequired,
            InternalError => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message()).with_code(self.code())
    }
}

/// Result of one sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(SessionClaim),
    Rejected(Reason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn claim(&self) -> Option<&SessionClaim> {
        match self {
            Outcome::Accepted(claim) => Some(claim),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn reason(&self) -> Option<Reason> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }
}

impl From<Reason> for Outcome {
    fn from(reason: Reason) -> Self {
        Outcome::Rejected(reason)
    }
}
