//! Recovery error types.

use thiserror::Error;

/// Result type for recovery operations.
pub type RecoveryResult<T> = Result<T, RecoveryError>;

#[derive(Debug, Error)]
pub enum RecoveryError {
    /// Supplied key failed static format checks. Raised before any store
    /// or crypto work happens.
    #[error("recovery key format invalid")]
    InvalidKeyFormat,

    /// No recovery record exists for this user.
    #[error("no recovery record for user")]
    NotFound,

    /// One generic outcome for a wrong (but well-formed) key and a
    /// corrupted stored envelope. The two are deliberately not
    /// distinguished.
    #[error("recovery failed")]
    DecryptionFailed,

    #[error("storage error: {0}")]
    Storage(#[from] solace_store::StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}
