//! Explicit plaintext/ciphertext field state.
//!
//! A sensitive field is `Option<Sealed<T>>`: absent, plaintext, encrypted,
//! or encrypted-but-unreadable. The enum makes the "plaintext XOR
//! ciphertext" invariant a type-system fact instead of a naming convention.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use solace_crypto::Envelope;

/// Placeholder rendered for a field whose ciphertext failed to decrypt.
pub const CANNOT_DECRYPT: &str = "[Encrypted Data - Cannot Decrypt]";

/// State of one sensitive field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Sealed<T> {
    /// Decrypted (or never-encrypted) value.
    Plain(T),
    /// Ciphertext awaiting decryption.
    Encrypted(Envelope),
    /// Ciphertext that failed to decrypt. The envelope is retained — it may
    /// become decryptable later with the correct passphrase.
    Unreadable(Envelope),
}

impl<T> Sealed<T> {
    pub fn plain(value: T) -> Self {
        Sealed::Plain(value)
    }

    pub fn as_plain(&self) -> Option<&T> {
        match self {
            Sealed::Plain(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Sealed::Plain(_))
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Sealed::Encrypted(_))
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, Sealed::Unreadable(_))
    }

    /// The retained envelope, for either ciphertext state.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Sealed::Plain(_) => None,
            Sealed::Encrypted(envelope) | Sealed::Unreadable(envelope) => Some(envelope),
        }
    }
}

impl Sealed<String> {
    /// Text to show the user: the value when plaintext, the sentinel
    /// otherwise. Undecryptable data is never rendered blank or dropped.
    pub fn display_text(&self) -> &str {
        match self {
            Sealed::Plain(value) => value,
            Sealed::Encrypted(_) | Sealed::Unreadable(_) => CANNOT_DECRYPT,
        }
    }
}

impl<T> From<T> for Sealed<T> {
    fn from(value: T) -> Self {
        Sealed::Plain(value)
    }
}

/// Values that can live in a [`Sealed`] field.
///
/// `is_blank` guards the encryptor: blank values get no envelope at all.
pub trait FieldValue: Serialize + DeserializeOwned + Clone + Send {
    fn is_blank(&self) -> bool {
        false
    }
}

impl FieldValue for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl FieldValue for Vec<String> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for u8 {}
