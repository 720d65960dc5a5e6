//! Session-scoped passphrase material.
//!
//! The [`SessionKeyring`] is the one holder of the active passphrase for an
//! authenticated session: set on login, signup, or successful recovery, and
//! cleared the moment the authenticated identity goes away. It is an
//! explicit capability object — services that need the passphrase hold a
//! keyring handle and ask it per operation, so nothing reads ambient global
//! state.
//!
//! Passphrase material never leaves process memory through this crate: no
//! serialization, no Debug output, zeroized on drop.

use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// An operation required active passphrase material and none is set.
    #[error("passphrase unavailable (session locked)")]
    PassphraseUnavailable,
}

/// The user's passphrase, held only in memory and wiped on drop.
#[derive(Clone)]
pub struct Passphrase(Zeroizing<String>);

impl Passphrase {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

impl From<&str> for Passphrase {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

/// Process-wide holder of the active passphrase.
///
/// Cheap to clone; all clones share the same slot. Reads are concurrent,
/// and no lock is held while a crypto operation runs — callers take a clone
/// of the passphrase and release the slot immediately.
#[derive(Clone, Default)]
pub struct SessionKeyring {
    inner: Arc<RwLock<Option<Passphrase>>>,
}

impl SessionKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the passphrase for the session (login, signup, or recovery).
    pub fn unlock(&self, passphrase: Passphrase) {
        let mut slot = self.inner.write().unwrap();
        *slot = Some(passphrase);
        debug!("session keyring unlocked");
    }

    /// Clears the passphrase (logout, session expiry).
    pub fn lock(&self) {
        let mut slot = self.inner.write().unwrap();
        *slot = None;
        debug!("session keyring locked");
    }

    pub fn is_unlocked(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    /// Returns a clone of the active passphrase, or fails fast while locked.
    pub fn passphrase(&self) -> SessionResult<Passphrase> {
        self.inner
            .read()
            .unwrap()
            .clone()
            .ok_or(SessionError::PassphraseUnavailable)
    }
}
