//! Argon2id password hashing for the admin credential.

use crate::error::IntakeError;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use std::sync::LazyLock;
use tracing::warn;

/// Hash compared against when the username is unknown, so both login failures cost the same.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("intake-dummy-password").ok());

/// Hash `plaintext` into a PHC string with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, IntakeError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IntakeError::PasswordHash(e.to_string()))
}

/// Verify `plaintext` against a stored PHC string. A malformed hash never verifies.
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

/// Burn one verification so an unknown username is not faster than a wrong password.
pub fn verify_dummy(plaintext: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        std::hint::black_box(verify(plaintext, hash));
    }
}
