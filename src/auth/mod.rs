//! Admin authentication: one seeded credential and one live session token.

pub mod password;
pub mod session;

pub use session::SessionTokens;

use crate::db::IntakeStorage;
use crate::error::IntakeError;
use tracing::{info, warn};

/// Create the admin row at startup if it does not exist yet. Hashing only happens when needed.
pub async fn seed_admin(
    storage: &IntakeStorage,
    username: &str,
    plaintext: &str,
) -> Result<(), IntakeError> {
    if storage.find_admin(username).await?.is_some() {
        info!(username, "admin user already present");
        return Ok(());
    }

    let owned = plaintext.to_owned();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&owned)).await??;
    if storage.seed_admin_if_absent(username, &hash).await? {
        info!(username, "admin user inserted into users table");
    }
    Ok(())
}

/// Check `username`/`plaintext` against storage and, on success, issue a new session token.
///
/// Unknown users and wrong passwords both yield [`IntakeError::InvalidCredentials`].
pub async fn login(
    storage: &IntakeStorage,
    sessions: &SessionTokens,
    username: &str,
    plaintext: &str,
) -> Result<String, IntakeError> {
    let admin = storage.find_admin(username).await?;

    let plaintext = plaintext.to_owned();
    let verified = tokio::task::spawn_blocking(move || match admin {
        Some(admin) => password::verify(&plaintext, &admin.password_hash),
        None => {
            password::verify_dummy(&plaintext);
            false
        }
    })
    .await?;

    if !verified {
        warn!(username, "rejected admin login");
        return Err(IntakeError::InvalidCredentials);
    }

    info!(username, "admin login succeeded; previous session token revoked");
    Ok(sessions.issue())
}
