//! Field-level record encryption.
//!
//! Every record kind walks its sensitive fields through the same two
//! helpers, [`seal_field`] and [`open_field`], so failure behavior cannot
//! diverge between kinds: seal errors abort the whole record (nothing
//! partially encrypted is ever returned), open failures degrade to the
//! sentinel and are collected in a [`FieldReport`].

use serde::de::DeserializeOwned;
use solace_crypto::{envelope, CryptoError, CryptoResult, Envelope};
use solace_session::SessionKeyring;
use tokio::task;
use tracing::{debug, warn};

use crate::error::{RecordError, RecordResult};
use crate::records::RecordKind;
use crate::sealed::{FieldValue, Sealed};

/// Per-record decrypt outcome: which fields fell back to the sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub failed_fields: Vec<&'static str>,
}

impl FieldReport {
    pub fn is_clean(&self) -> bool {
        self.failed_fields.is_empty()
    }

    fn record_failure(&mut self, name: &'static str) {
        self.failed_fields.push(name);
    }
}

/// A decrypted record together with its per-field outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Decrypted<R> {
    pub record: R,
    pub report: FieldReport,
}

/// A record with a fixed set of sensitive fields.
///
/// Implementations call [`seal_field`] / [`open_field`] once per declared
/// field and touch nothing else.
pub trait Encryptable: Send + Sized + 'static {
    const KIND: RecordKind;

    /// Whether this kind may be persisted as plaintext when no passphrase
    /// is available. Policy-gated; only `Feedback` sets this.
    const PLAINTEXT_FALLBACK: bool = false;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()>;

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport;
}

/// Encrypts one field in place: `Plain` and non-blank becomes `Encrypted`.
///
/// Absent, blank, and already-encrypted fields are left untouched — no
/// envelope, no placeholder.
pub(crate) fn seal_field<T: FieldValue>(
    field: &mut Option<Sealed<T>>,
    passphrase: &str,
) -> RecordResult<()> {
    let Some(sealed) = field else {
        return Ok(());
    };
    let Sealed::Plain(value) = &*sealed else {
        return Ok(());
    };
    if value.is_blank() {
        return Ok(());
    }

    let bytes = serde_json::to_vec(value)?;
    let envelope = envelope::seal(&bytes, passphrase)?;
    *sealed = Sealed::Encrypted(envelope);
    Ok(())
}

/// Decrypts one field in place.
///
/// On success the field becomes `Plain`; on any failure — malformed
/// envelope, tag mismatch, or no passphrase at all — it becomes
/// `Unreadable` with the original ciphertext retained, and the field name
/// is added to the report. Plaintext fields are left untouched.
pub(crate) fn open_field<T: FieldValue>(
    field: &mut Option<Sealed<T>>,
    name: &'static str,
    passphrase: Option<&str>,
    report: &mut FieldReport,
) {
    let Some(sealed) = field else {
        return;
    };
    let envelope = match &*sealed {
        Sealed::Plain(_) => return,
        Sealed::Encrypted(envelope) | Sealed::Unreadable(envelope) => envelope.clone(),
    };

    match passphrase.map(|p| open_value::<T>(&envelope, p)) {
        Some(Ok(value)) => {
            *sealed = Sealed::Plain(value);
        }
        Some(Err(err)) => {
            warn!(field = name, error = %err, "field failed to decrypt; substituting sentinel");
            *sealed = Sealed::Unreadable(envelope);
            report.record_failure(name);
        }
        None => {
            debug!(field = name, "no passphrase in session; field left sealed");
            *sealed = Sealed::Unreadable(envelope);
            report.record_failure(name);
        }
    }
}

fn open_value<T: DeserializeOwned>(envelope: &Envelope, passphrase: &str) -> CryptoResult<T> {
    let bytes = envelope::open(envelope, passphrase)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CryptoError::MalformedEnvelope(format!("plaintext payload: {e}")))
}

/// Gates the Feedback availability-over-confidentiality exception.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Every kind requires a passphrase on the write path.
    Never,
    /// Feedback may be persisted as plaintext while the session is locked,
    /// so submission never blocks on encryption.
    #[default]
    FeedbackOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncryptionPolicy {
    pub plaintext_fallback: FallbackPolicy,
}

/// Applies the envelope codec to the sensitive fields of each record kind.
///
/// Holds a [`SessionKeyring`] handle; every operation takes its own clone
/// of the passphrase, so no lock is held while crypto runs. Key derivation
/// is CPU-bound, so each operation runs under `spawn_blocking`.
#[derive(Clone)]
pub struct RecordEncryptor {
    keyring: SessionKeyring,
    policy: EncryptionPolicy,
}

impl RecordEncryptor {
    pub fn new(keyring: SessionKeyring) -> Self {
        Self {
            keyring,
            policy: EncryptionPolicy::default(),
        }
    }

    pub fn with_policy(keyring: SessionKeyring, policy: EncryptionPolicy) -> Self {
        Self { keyring, policy }
    }

    pub fn policy(&self) -> EncryptionPolicy {
        self.policy
    }

    pub(crate) fn keyring(&self) -> &SessionKeyring {
        &self.keyring
    }

    /// Encrypts every applicable sensitive field of `record`.
    ///
    /// Fails fast with [`RecordError::PassphraseUnavailable`] while the
    /// session is locked — except for a kind whose plaintext fallback is
    /// enabled by policy, which is returned unchanged. On any error nothing
    /// is returned, so a partially encrypted record can never reach the
    /// store.
    pub async fn encrypt<R: Encryptable>(&self, record: R) -> RecordResult<R> {
        let passphrase = match self.keyring.passphrase() {
            Ok(passphrase) => passphrase,
            Err(err) => {
                if R::PLAINTEXT_FALLBACK
                    && self.policy.plaintext_fallback == FallbackPolicy::FeedbackOnly
                {
                    warn!(kind = ?R::KIND, "no passphrase in session; persisting record as plaintext");
                    return Ok(record);
                }
                return Err(err.into());
            }
        };

        task::spawn_blocking(move || {
            let mut record = record;
            record.seal_fields(passphrase.as_str())?;
            Ok(record)
        })
        .await
        .map_err(|e| RecordError::Internal(e.to_string()))?
    }

    /// Decrypts every encrypted sensitive field of `record`.
    ///
    /// Never fails on bad ciphertext: each failing field degrades to the
    /// sentinel (ciphertext retained) and is listed in the report. While
    /// the session is locked, every encrypted field takes that path.
    pub async fn decrypt<R: Encryptable>(&self, record: R) -> RecordResult<Decrypted<R>> {
        let passphrase = self.keyring.passphrase().ok();

        task::spawn_blocking(move || {
            let mut record = record;
            let report = record.open_fields(passphrase.as_ref().map(|p| p.as_str()));
            Decrypted { record, report }
        })
        .await
        .map_err(|e| RecordError::Internal(e.to_string()))
    }
}
