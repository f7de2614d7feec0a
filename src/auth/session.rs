use base64::Engine;
use rand::{RngCore, rngs::OsRng};
use std::sync::RwLock;
use subtle::ConstantTimeEq;

const TOKEN_BYTES: usize = 32;

/// Holds the single valid admin session token.
///
/// Issuing a token replaces the previous one, so the most recent login wins and every
/// earlier token stops working. Tokens are never cleared and do not survive a restart.
/// A login from any client therefore ends every other admin session.
#[derive(Debug, Default)]
pub struct SessionTokens {
    current: RwLock<Option<String>>,
}

impl SessionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh token and make it the only valid one.
    pub fn issue(&self) -> String {
        let mut raw = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut raw);
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);

        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.clone());
        token
    }

    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True iff a token has been issued and `candidate` equals it.
    pub fn check(&self, candidate: &str) -> bool {
        let slot = self.current.read().unwrap_or_else(|e| e.into_inner());
        match slot.as_deref() {
            Some(token) => bool::from(token.as_bytes().ct_eq(candidate.as_bytes())),
            None => false,
        }
    }
}
