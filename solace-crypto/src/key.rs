//! Key derivation with Argon2id.
//!
//! A derived key exists only for the duration of a single encrypt or
//! decrypt call. It is never stored and zeroized on drop.

use crate::error::{CryptoError, CryptoResult};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key size in bytes (ChaCha20-Poly1305).
pub const KEY_SIZE: usize = 32;

/// Salt size in bytes for Argon2id.
pub const SALT_SIZE: usize = 16;

/// Argon2id work parameters.
///
/// These are a fixed constant of the wire format: every envelope version in
/// [`SUPPORTED_VERSIONS`](crate::SUPPORTED_VERSIONS) derives with the same
/// parameters, so changing them breaks decryption of existing data. The
/// defaults follow the OWASP minimum for Argon2id (19 MiB, 2 passes, 1 lane).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Random salt for key derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh random salt from the OS CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Key material derived from a passphrase. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derives a symmetric key from a passphrase and salt.
///
/// Deterministic: identical inputs always yield the identical key, and any
/// change to passphrase, salt, or params yields an unrelated key.
pub fn derive_key(passphrase: &str, salt: &Salt, params: &KdfParams) -> CryptoResult<DerivedKey> {
    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut out = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt.as_bytes(), &mut out)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey(out))
}

/// Generates a random 256-bit key (not passphrase-derived).
pub fn generate_random_key() -> DerivedKey {
    let mut bytes = [0u8; KEY_SIZE];
    OsRng.fill_bytes(&mut bytes);
    DerivedKey(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let salt = Salt::random();
        let k1 = derive_key("hunter2hunter2", &salt, &KdfParams::default()).unwrap();
        let k2 = derive_key("hunter2hunter2", &salt, &KdfParams::default()).unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passphrase_changes_key() {
        let salt = Salt::random();
        let k1 = derive_key("passphrase-one", &salt, &KdfParams::default()).unwrap();
        let k2 = derive_key("passphrase-two", &salt, &KdfParams::default()).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_salt_changes_key() {
        let params = KdfParams::default();
        let k1 = derive_key("same-passphrase", &Salt::random(), &params).unwrap();
        let k2 = derive_key("same-passphrase", &Salt::random(), &params).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_params_change_key() {
        let salt = Salt::random();
        let k1 = derive_key("same-passphrase", &salt, &KdfParams::default()).unwrap();
        let cheaper = KdfParams {
            iterations: 1,
            ..KdfParams::default()
        };
        let k2 = derive_key("same-passphrase", &salt, &cheaper).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = generate_random_key();
        assert_eq!(format!("{key:?}"), "DerivedKey(<redacted>)");
    }
}
