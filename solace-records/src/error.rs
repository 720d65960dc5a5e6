//! Record layer error types.

use solace_session::SessionError;
use thiserror::Error;

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that escape the record layer.
///
/// Decrypt failures on individual fields do NOT appear here — they degrade
/// to the sentinel and are reported per field in
/// [`FieldReport`](crate::FieldReport).
#[derive(Debug, Error)]
pub enum RecordError {
    /// The write path required a passphrase and the session is locked.
    #[error("passphrase unavailable (session locked)")]
    PassphraseUnavailable,

    #[error("crypto error: {0}")]
    Crypto(#[from] solace_crypto::CryptoError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for RecordError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::PassphraseUnavailable => RecordError::PassphraseUnavailable,
        }
    }
}
