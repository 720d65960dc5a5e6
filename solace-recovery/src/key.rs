//! High-entropy recovery credentials.

use crate::error::{RecoveryError, RecoveryResult};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// Length of the hex-encoded recovery key: 32 random bytes, 64 characters.
pub const RECOVERY_KEY_LEN: usize = 64;

/// A 256-bit recovery credential, hex-encoded.
///
/// Generated from the OS CSPRNG, shown to the user exactly once at
/// enrollment, and wiped from memory on drop. Its entropy — not a KDF work
/// factor — is what makes it brute-force infeasible.
#[derive(Clone)]
pub struct RecoveryKey(Zeroizing<String>);

impl RecoveryKey {
    /// Generates a fresh recovery key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self(Zeroizing::new(hex))
    }

    /// Validates the static shape of a user-supplied key.
    ///
    /// Exact length and hex charset only — no store access, no crypto. Case
    /// is normalized to lowercase so the derived key is stable regardless
    /// of how the user typed it back in.
    pub fn parse(supplied: &str) -> RecoveryResult<Self> {
        if supplied.len() != RECOVERY_KEY_LEN || !supplied.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RecoveryError::InvalidKeyFormat);
        }
        Ok(Self(Zeroizing::new(supplied.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecoveryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecoveryKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_is_64_lowercase_hex_chars() {
        let key = RecoveryKey::generate();
        assert_eq!(key.as_str().len(), RECOVERY_KEY_LEN);
        assert!(key
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn two_generated_keys_differ() {
        assert_ne!(
            RecoveryKey::generate().as_str(),
            RecoveryKey::generate().as_str()
        );
    }

    #[test]
    fn parse_accepts_generated_keys() {
        let key = RecoveryKey::generate();
        assert!(RecoveryKey::parse(key.as_str()).is_ok());
    }

    #[test]
    fn parse_normalizes_case() {
        let key = RecoveryKey::generate();
        let upper = key.as_str().to_ascii_uppercase();
        let parsed = RecoveryKey::parse(&upper).unwrap();
        assert_eq!(parsed.as_str(), key.as_str());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(matches!(
            RecoveryKey::parse("abc"),
            Err(RecoveryError::InvalidKeyFormat)
        ));
        let long = "a".repeat(RECOVERY_KEY_LEN + 1);
        assert!(RecoveryKey::parse(&long).is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        let bad = "g".repeat(RECOVERY_KEY_LEN);
        assert!(matches!(
            RecoveryKey::parse(&bad),
            Err(RecoveryError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = RecoveryKey::generate();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains(key.as_str()));
        assert_eq!(rendered, "RecoveryKey(<redacted>)");
    }
}
