//! Field-level record encryption for Solace.
//!
//! Applies the envelope codec selectively to the sensitive fields of the
//! five record kinds the app persists: profiles, guided sessions, chat
//! messages, journal entries, and feedback. Identifiers, timestamps, and
//! the analytics rating stay plaintext; everything in a record a human
//! wrote or that describes a human becomes a [`Sealed`] field.
//!
//! Failure behavior is uniform across kinds because every kind walks its
//! fields through the same two helpers: a field that cannot be decrypted
//! renders as the [`CANNOT_DECRYPT`] sentinel while its ciphertext is
//! retained for a later attempt with the correct passphrase.

mod batch;
mod encryptor;
mod error;
mod records;
mod sealed;

pub use batch::BatchOutcome;
pub use encryptor::{
    Decrypted, Encryptable, EncryptionPolicy, FallbackPolicy, FieldReport, RecordEncryptor,
};
pub use error::{RecordError, RecordResult};
pub use records::{ChatMessage, ChatRole, Feedback, GuidedSession, JournalEntry, Profile, RecordKind};
pub use sealed::{FieldValue, Sealed, CANNOT_DECRYPT};
