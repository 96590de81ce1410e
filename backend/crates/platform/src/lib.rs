//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Symmetric encryption for secrets at rest (AES-256-CBC)
//! - SHA-256 digests and constant-time comparison
//! - Password hashing (Argon2id)
//! - Cookie rendering and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
