//! Zero-knowledge passphrase recovery.
//!
//! At enrollment the user's passphrase is sealed under a fresh high-entropy
//! recovery key and the resulting envelope is persisted server-side. The
//! server holds only ciphertext: neither the passphrase nor the recovery
//! key ever reaches it, so it can satisfy a recovery request without being
//! able to read anything itself.
//!
//! The recovery key is shown to the caller exactly once, at enrollment.
//! Nothing in this crate logs, caches, or stores it.

mod error;
mod key;
mod service;

pub use error::{RecoveryError, RecoveryResult};
pub use key::{RecoveryKey, RECOVERY_KEY_LEN};
pub use service::{RecoveryRecord, RecoveryService};
