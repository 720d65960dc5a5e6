//! Crypto layer error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in the encryption layer.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD tag verification failed. A wrong key and tampered ciphertext
    /// are indistinguishable here.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Input could not be parsed as any supported envelope form.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Envelope carried a version tag this build does not understand.
    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(u8),
}
