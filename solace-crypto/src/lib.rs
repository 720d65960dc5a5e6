//! Encryption layer for Solace.
//!
//! Provides passphrase-derived encryption using:
//! - Argon2id for key derivation from passphrases
//! - ChaCha20-Poly1305 for authenticated encryption
//! - Self-describing envelopes with a versioned wire format
//!
//! # Architecture
//!
//! Every envelope is independent: sealing derives a one-shot key from the
//! passphrase and a fresh random salt, encrypts under a fresh random nonce,
//! and packs `{version, algorithm, salt, nonce, ciphertext}` into a single
//! transportable string. Opening reverses the process using the metadata
//! embedded in the envelope. No key material is ever cached or persisted
//! beyond the call that needed it.
//!
//! Two wire formats decode: the current single-blob form and a legacy JSON
//! form that carried salt and nonce as sibling fields. Only the current form
//! is ever produced, so legacy envelopes age out as records are rewritten.

pub mod cipher;
pub mod envelope;
mod error;
mod key;

pub use cipher::{
    decrypt, decrypt_string, encrypt, encrypt_string, EncryptedData, NONCE_SIZE, TAG_SIZE,
};
pub use envelope::{
    open, open_string, seal, seal_string, Envelope, ALGORITHM, CURRENT_VERSION,
    SUPPORTED_VERSIONS,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, generate_random_key, DerivedKey, KdfParams, Salt, KEY_SIZE, SALT_SIZE};
