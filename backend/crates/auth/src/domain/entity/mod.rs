//! Entity Module

pub mod session_claim;
pub mod user;

pub use session_claim::SessionClaim;
pub use user::UserRecord;
