//! Self-describing passphrase envelopes.
//!
//! An envelope bundles everything needed to decrypt with nothing but the
//! passphrase: version tag, algorithm name, Argon2id salt, nonce, and
//! ciphertext. Its transportable form is a single string, safe to store in
//! any text-capable field of the document store.
//!
//! Two formats decode:
//!
//! - **v2 (current)**: base64 of `[version:1B][salt:16B][nonce:12B][ciphertext+tag]`
//! - **v1 (legacy)**: a JSON object carrying `salt`, `nonce`, and
//!   `ciphertext` as sibling base64 fields
//!
//! Encoding always produces v2. There is deliberately no v1 encoder, so
//! legacy envelopes disappear as records are rewritten.

use crate::cipher::{self, EncryptedData, NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt, SALT_SIZE};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// AEAD algorithm identifier carried in every envelope.
pub const ALGORITHM: &str = "chacha20poly1305";

/// Version tag written by [`Envelope::encode`].
pub const CURRENT_VERSION: u8 = 2;

/// Version tags this build can decode.
pub const SUPPORTED_VERSIONS: &[u8] = &[1, 2];

/// A parsed envelope. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub version: u8,
    pub algorithm: String,
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Legacy v1 wire form: metadata as sibling JSON fields.
#[derive(Deserialize)]
struct LegacyEnvelopeV1 {
    version: u8,
    algorithm: String,
    salt: String,
    nonce: String,
    ciphertext: String,
}

/// Seals plaintext under a passphrase.
///
/// A fresh salt and nonce are drawn per call, so sealing identical input
/// twice yields two unrelated envelopes.
pub fn seal(plaintext: &[u8], passphrase: &str) -> CryptoResult<Envelope> {
    let salt = Salt::random();
    let key = derive_key(passphrase, &salt, &KdfParams::default())?;
    let data = cipher::encrypt(&key, plaintext)?;

    Ok(Envelope {
        version: CURRENT_VERSION,
        algorithm: ALGORITHM.to_string(),
        salt: *salt.as_bytes(),
        nonce: data.nonce,
        ciphertext: data.ciphertext,
    })
}

/// Opens an envelope with a passphrase.
///
/// Any tag mismatch surfaces as [`CryptoError::Decryption`]; there is no
/// partially successful open.
pub fn open(envelope: &Envelope, passphrase: &str) -> CryptoResult<Vec<u8>> {
    if !SUPPORTED_VERSIONS.contains(&envelope.version) {
        return Err(CryptoError::UnsupportedVersion(envelope.version));
    }
    if envelope.algorithm != ALGORITHM {
        return Err(CryptoError::MalformedEnvelope(format!(
            "unknown algorithm: {}",
            envelope.algorithm
        )));
    }

    let salt = Salt::from_bytes(envelope.salt);
    let key = derive_key(passphrase, &salt, &KdfParams::default())?;
    let data = EncryptedData {
        nonce: envelope.nonce,
        ciphertext: envelope.ciphertext.clone(),
    };
    cipher::decrypt(&key, &data)
}

/// Seals a UTF-8 string.
pub fn seal_string(plaintext: &str, passphrase: &str) -> CryptoResult<Envelope> {
    seal(plaintext.as_bytes(), passphrase)
}

/// Opens an envelope expected to contain UTF-8 text.
pub fn open_string(envelope: &Envelope, passphrase: &str) -> CryptoResult<String> {
    let bytes = open(envelope, passphrase)?;
    String::from_utf8(bytes)
        .map_err(|_| CryptoError::Decryption("decrypted bytes are not valid UTF-8".to_string()))
}

impl Envelope {
    /// Encodes to the current single-blob form.
    ///
    /// Always writes [`CURRENT_VERSION`], even for an envelope that was
    /// decoded from the legacy form.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(1 + SALT_SIZE + NONCE_SIZE + self.ciphertext.len());
        buf.push(CURRENT_VERSION);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);
        BASE64.encode(buf)
    }

    /// Decodes either supported wire form.
    pub fn decode(raw: &str) -> CryptoResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CryptoError::MalformedEnvelope("empty input".to_string()));
        }
        if trimmed.starts_with('{') {
            return Self::decode_legacy(trimmed);
        }
        Self::decode_blob(trimmed)
    }

    fn decode_blob(raw: &str) -> CryptoResult<Self> {
        let bytes = BASE64
            .decode(raw)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("base64: {e}")))?;

        let (&version, rest) = bytes
            .split_first()
            .ok_or_else(|| CryptoError::MalformedEnvelope("empty blob".to_string()))?;
        if version != CURRENT_VERSION {
            // v1 only ever existed in JSON form; any other tag is from the future
            return Err(CryptoError::UnsupportedVersion(version));
        }
        if rest.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::MalformedEnvelope(format!(
                "blob too short: {} bytes",
                bytes.len()
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&rest[..SALT_SIZE]);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&rest[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);
        let ciphertext = rest[SALT_SIZE + NONCE_SIZE..].to_vec();

        Ok(Self {
            version,
            algorithm: ALGORITHM.to_string(),
            salt,
            nonce,
            ciphertext,
        })
    }

    fn decode_legacy(raw: &str) -> CryptoResult<Self> {
        let legacy: LegacyEnvelopeV1 = serde_json::from_str(raw)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("legacy json: {e}")))?;
        if legacy.version != 1 {
            return Err(CryptoError::UnsupportedVersion(legacy.version));
        }

        let salt_bytes = BASE64
            .decode(&legacy.salt)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("legacy salt: {e}")))?;
        let nonce_bytes = BASE64
            .decode(&legacy.nonce)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("legacy nonce: {e}")))?;
        let ciphertext = BASE64
            .decode(&legacy.ciphertext)
            .map_err(|e| CryptoError::MalformedEnvelope(format!("legacy ciphertext: {e}")))?;

        let salt: [u8; SALT_SIZE] = salt_bytes
            .try_into()
            .map_err(|_| CryptoError::MalformedEnvelope("legacy salt length".to_string()))?;
        let nonce: [u8; NONCE_SIZE] = nonce_bytes
            .try_into()
            .map_err(|_| CryptoError::MalformedEnvelope("legacy nonce length".to_string()))?;

        Ok(Self {
            version: legacy.version,
            algorithm: legacy.algorithm,
            salt,
            nonce,
            ciphertext,
        })
    }
}

// An envelope serializes as its string encoding so it can embed as one
// opaque text value inside any record.
impl Serialize for Envelope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Envelope::decode(&raw).map_err(serde::de::Error::custom)
    }
}
