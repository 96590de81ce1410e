//! Cryptographic Utilities
//!
//! - AES-256-CBC symmetric encryption for secrets stored at rest
//!   (two-factor secrets). Text format: `<iv hex>:<ciphertext hex>`.
//! - SHA-256 digests and constant-time comparison for token checks.
//! - OS-backed random bytes.

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes
pub const KEY_LENGTH: usize = 32;

/// CBC initialization vector length in bytes
pub const IV_LENGTH: usize = 16;

/// Symmetric encryption errors
///
/// Variants never carry key or plaintext material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Key contains characters outside the single-byte range
    #[error("Encryption key contains non latin-1 characters")]
    InvalidKeyEncoding,

    /// Key is not exactly [`KEY_LENGTH`] bytes
    #[error("Encryption key must be {expected} bytes (got {actual})")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Input is not `<iv hex>:<ciphertext hex>` or the IV has the wrong size
    #[error("Malformed ciphertext")]
    MalformedCiphertext,

    /// Padding check failed (wrong key or corrupted data)
    #[error("Decryption failed")]
    DecryptionFailed,
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// `len` random bytes as lowercase hex (`2 * len` characters)
pub fn random_hex(len: usize) -> String {
    hex::encode(random_bytes(len))
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Encrypt `plaintext` with a 32-character key.
///
/// A fresh random IV is generated per call, so encrypting the same
/// plaintext twice yields different output.
pub fn symmetric_encrypt(plaintext: &[u8], key: &str) -> Result<String, CipherError> {
    let key = key_bytes(key)?;
    let iv = random_bytes(IV_LENGTH);

    let encryptor = Aes256CbcEnc::new_from_slices(&key[..], &iv)
        .map_err(|_| CipherError::MalformedCiphertext)?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(format!("{}:{}", hex::encode(iv), hex::encode(ciphertext)))
}

/// Decrypt text produced by [`symmetric_encrypt`].
pub fn symmetric_decrypt(text: &str, key: &str) -> Result<Vec<u8>, CipherError> {
    let key = key_bytes(key)?;

    let (iv_hex, ciphertext_hex) = text
        .split_once(':')
        .ok_or(CipherError::MalformedCiphertext)?;
    let iv = hex::decode(iv_hex).map_err(|_| CipherError::MalformedCiphertext)?;
    let ciphertext = hex::decode(ciphertext_hex).map_err(|_| CipherError::MalformedCiphertext)?;

    let decryptor = Aes256CbcDec::new_from_slices(&key[..], &iv)
        .map_err(|_| CipherError::MalformedCiphertext)?;

    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CipherError::DecryptionFailed)
}

/// Interpret the key string as latin-1, one byte per character.
fn key_bytes(key: &str) -> Result<Zeroizing<[u8; KEY_LENGTH]>, CipherError> {
    let bytes = Zeroizing::new(
        key.chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| CipherError::InvalidKeyEncoding))
            .collect::<Result<Vec<u8>, _>>()?,
    );

    if bytes.len() != KEY_LENGTH {
        return Err(CipherError::InvalidKeyLength {
            expected: KEY_LENGTH,
            actual: bytes.len(),
        });
    }

    let mut out = Zeroizing::new([0u8; KEY_LENGTH]);
    out.copy_from_slice(&bytes);
    Ok(out)
}
