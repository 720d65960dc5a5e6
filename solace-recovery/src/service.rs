//! Recovery enrollment and redemption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solace_crypto::{envelope, Envelope, ALGORITHM, CURRENT_VERSION};
use solace_session::Passphrase;
use solace_store::DocumentStore;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

use crate::error::{RecoveryError, RecoveryResult};
use crate::key::RecoveryKey;

/// Durable server-side artifact tying a user to a recovery path.
///
/// The envelope is the user's passphrase sealed under the recovery key.
/// Everything else is bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub user_id: String,
    pub envelope: Envelope,
    pub created_at: DateTime<Utc>,
    pub version: u8,
    pub algorithm: String,
}

fn record_path(user_id: &str) -> String {
    format!("recovery/{user_id}")
}

/// Enrolls users into recovery and redeems recovery keys.
pub struct RecoveryService {
    store: Arc<dyn DocumentStore>,
}

impl RecoveryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Enrolls a user: generates a recovery key, seals the passphrase under
    /// it, and persists the record. The returned key is the caller's one
    /// chance to show it to the user — it exists nowhere else.
    pub async fn enroll(
        &self,
        user_id: &str,
        passphrase: &Passphrase,
    ) -> RecoveryResult<RecoveryKey> {
        let key = RecoveryKey::generate();

        let sealing_key = key.clone();
        let secret = passphrase.clone();
        let envelope = task::spawn_blocking(move || {
            envelope::seal_string(secret.as_str(), sealing_key.as_str())
        })
        .await
        .map_err(|e| RecoveryError::Internal(e.to_string()))?
        .map_err(|e| RecoveryError::Internal(e.to_string()))?;

        let record = RecoveryRecord {
            user_id: user_id.to_string(),
            envelope,
            created_at: Utc::now(),
            version: CURRENT_VERSION,
            algorithm: ALGORITHM.to_string(),
        };
        let value =
            serde_json::to_value(&record).map_err(|e| RecoveryError::Internal(e.to_string()))?;
        self.store.put(&record_path(user_id), value)?;

        info!(user_id, "recovery enrollment complete");
        Ok(key)
    }

    /// Whether a recovery record exists for this user.
    pub fn is_enrolled(&self, user_id: &str) -> RecoveryResult<bool> {
        Ok(self.store.get(&record_path(user_id))?.is_some())
    }

    /// Replaces the stored record under a fresh recovery key.
    ///
    /// Used after a passphrase change so recovery keeps working; the
    /// previous key stops unlocking anything.
    pub async fn reenroll(
        &self,
        user_id: &str,
        passphrase: &Passphrase,
    ) -> RecoveryResult<RecoveryKey> {
        self.enroll(user_id, passphrase).await
    }

    /// Redeems a recovery key for the user's passphrase.
    ///
    /// A malformed key is rejected before any store access. A wrong
    /// well-formed key and a corrupted stored record both surface as the
    /// same generic [`RecoveryError::DecryptionFailed`].
    pub async fn recover(&self, user_id: &str, supplied: &str) -> RecoveryResult<Passphrase> {
        let key = RecoveryKey::parse(supplied)?;

        let value = self
            .store
            .get(&record_path(user_id))?
            .ok_or(RecoveryError::NotFound)?;
        let record: RecoveryRecord =
            serde_json::from_value(value).map_err(|_| RecoveryError::DecryptionFailed)?;

        let envelope = record.envelope;
        let secret = task::spawn_blocking(move || envelope::open_string(&envelope, key.as_str()))
            .await
            .map_err(|e| RecoveryError::Internal(e.to_string()))?
            .map_err(|_| RecoveryError::DecryptionFailed)?;

        debug!(user_id, "recovery redemption succeeded");
        Ok(Passphrase::new(secret))
    }
}
