use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password with a random salt at bcrypt's default cost.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash(password, DEFAULT_COST).map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Check `password` against a stored digest.
///
/// Never fails: a mismatch, a malformed digest and an internal bcrypt error
/// all come back as `false`.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match verify(password, digest) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Password verification error: {}", e);
            false
        }
    }
}
