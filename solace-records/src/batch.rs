//! Ordered, failure-isolated batch operations.
//!
//! Items in a batch are mutually independent: each runs as its own blocking
//! unit, one item's failure never aborts its siblings, and results come
//! back in input order regardless of completion order.

use tokio::task;
use tracing::debug;

use crate::encryptor::{Decrypted, Encryptable, RecordEncryptor};
use crate::error::{RecordError, RecordResult};

/// Per-item outcome of an encrypt batch.
pub type BatchOutcome<R> = RecordResult<R>;

impl RecordEncryptor {
    /// Decrypts a batch of records concurrently.
    ///
    /// Every item gets a [`Decrypted`] outcome; failed fields are reported
    /// per item, never as a batch-level error.
    pub async fn decrypt_batch<R: Encryptable>(
        &self,
        records: Vec<R>,
    ) -> RecordResult<Vec<Decrypted<R>>> {
        let passphrase = self.keyring_passphrase();
        debug!(count = records.len(), "decrypting record batch");

        let handles: Vec<_> = records
            .into_iter()
            .map(|record| {
                let passphrase = passphrase.clone();
                task::spawn_blocking(move || {
                    let mut record = record;
                    let report = record.open_fields(passphrase.as_ref().map(|p| p.as_str()));
                    Decrypted { record, report }
                })
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(
                handle
                    .await
                    .map_err(|e| RecordError::Internal(e.to_string()))?,
            );
        }
        Ok(out)
    }

    /// Encrypts a batch of records concurrently, isolating per-item errors.
    pub async fn encrypt_batch<R: Encryptable>(&self, records: Vec<R>) -> Vec<BatchOutcome<R>> {
        debug!(count = records.len(), "encrypting record batch");

        let handles: Vec<_> = records
            .into_iter()
            .map(|record| {
                let this = self.clone();
                tokio::spawn(async move { this.encrypt(record).await })
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(RecordError::Internal(e.to_string())),
            });
        }
        out
    }

    fn keyring_passphrase(&self) -> Option<solace_session::Passphrase> {
        self.keyring().passphrase().ok()
    }
}
