//! Password hashing and session token generation.

use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

use crate::config;

/// Length of the random session token stored in the cookie
const SESSION_TOKEN_LEN: usize = 48;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("password verification failed: {0}")]
    Verify(String),
}

/// Hash a plaintext password with bcrypt, using the configured work factor.
/// The stored value is a salted hash, never the plaintext.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let cost = config::config().security.bcrypt_cost;
    bcrypt::hash(password, cost).map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CredentialError> {
    bcrypt::verify(password, hash).map_err(|e| CredentialError::Verify(e.to_string()))
}

/// Generate the opaque token that keys a server-side session row
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}
