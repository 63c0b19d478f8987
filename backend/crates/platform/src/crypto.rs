//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Length in bytes of HMAC signing secrets
pub const SECRET_LENGTH: usize = 32;

/// Error decoding a configured secret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("secret is not valid base64")]
    InvalidBase64,

    #[error("secret must be {expected} bytes (got {actual})")]
    WrongLength { expected: usize, actual: usize },
}

/// Generate a fresh random signing secret
pub fn random_secret() -> [u8; SECRET_LENGTH] {
    let mut secret = [0u8; SECRET_LENGTH];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Decode a base64-encoded signing secret of exactly [`SECRET_LENGTH`] bytes
pub fn decode_secret(encoded: &str) -> Result<[u8; SECRET_LENGTH], SecretError> {
    let bytes = from_base64(encoded.trim()).map_err(|_| SecretError::InvalidBase64)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| SecretError::WrongLength {
            expected: SECRET_LENGTH,
            actual: bytes.len(),
        })
}
