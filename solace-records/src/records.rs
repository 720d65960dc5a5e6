//! Encryptable record kinds.
//!
//! Each kind declares its sensitive fields as `Option<Sealed<T>>` and walks
//! exactly those fields in its [`Encryptable`] impl. Everything else — ids,
//! timestamps, role markers, the analytics rating, the account email — is
//! never touched by the encryptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::encryptor::{open_field, seal_field, Encryptable, FieldReport};
use crate::error::RecordResult;
use crate::sealed::Sealed;

/// Record kinds understood by the encryptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Profile,
    GuidedSession,
    ChatMessage,
    JournalEntry,
    Feedback,
}

/// Account profile. `uid` and `email` stay plaintext — they key the account
/// itself and are needed before any decryption can happen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudonym: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_challenge: Option<Sealed<String>>,
}

impl Profile {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            created_at: Utc::now(),
            display_name: None,
            pseudonym: None,
            age_range: None,
            primary_challenge: None,
        }
    }
}

impl Encryptable for Profile {
    const KIND: RecordKind = RecordKind::Profile;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()> {
        seal_field(&mut self.display_name, passphrase)?;
        seal_field(&mut self.pseudonym, passphrase)?;
        seal_field(&mut self.age_range, passphrase)?;
        seal_field(&mut self.primary_challenge, passphrase)?;
        Ok(())
    }

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport {
        let mut report = FieldReport::default();
        open_field(&mut self.display_name, "display_name", passphrase, &mut report);
        open_field(&mut self.pseudonym, "pseudonym", passphrase, &mut report);
        open_field(&mut self.age_range, "age_range", passphrase, &mut report);
        open_field(
            &mut self.primary_challenge,
            "primary_challenge",
            passphrase,
            &mut report,
        );
        report
    }
}

/// One guided dialogue session. The numeric helpfulness rating stays
/// plaintext for analytics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidedSession {
    pub id: String,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circumstance: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_reflection: Option<Sealed<String>>,
}

impl GuidedSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            started_at: Utc::now(),
            completed_at: None,
            rating: None,
            circumstance: None,
            age_range: None,
            summary: None,
            user_reflection: None,
        }
    }
}

impl Encryptable for GuidedSession {
    const KIND: RecordKind = RecordKind::GuidedSession;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()> {
        seal_field(&mut self.circumstance, passphrase)?;
        seal_field(&mut self.age_range, passphrase)?;
        seal_field(&mut self.summary, passphrase)?;
        seal_field(&mut self.user_reflection, passphrase)?;
        Ok(())
    }

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport {
        let mut report = FieldReport::default();
        open_field(&mut self.circumstance, "circumstance", passphrase, &mut report);
        open_field(&mut self.age_range, "age_range", passphrase, &mut report);
        open_field(&mut self.summary, "summary", passphrase, &mut report);
        open_field(
            &mut self.user_reflection,
            "user_reflection",
            passphrase,
            &mut report,
        );
        report
    }
}

/// Who produced a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a guided session transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: ChatRole,
    pub sent_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Sealed<String>>,
}

impl ChatMessage {
    pub fn new(session_id: impl Into<String>, role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            sent_at: Utc::now(),
            text: Some(Sealed::plain(text.into())),
        }
    }
}

impl Encryptable for ChatMessage {
    const KIND: RecordKind = RecordKind::ChatMessage;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()> {
        seal_field(&mut self.text, passphrase)
    }

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport {
        let mut report = FieldReport::default();
        open_field(&mut self.text, "text", passphrase, &mut report);
        report
    }
}

/// A journal entry. Tags and goals are sensitive too — a tag list can say
/// as much as the entry body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Sealed<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Sealed<Vec<String>>>,
}

impl JournalEntry {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            title: Some(Sealed::plain(title.into())),
            content: Some(Sealed::plain(content.into())),
            summary: None,
            insights: None,
            tags: None,
            goals: None,
        }
    }
}

impl Encryptable for JournalEntry {
    const KIND: RecordKind = RecordKind::JournalEntry;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()> {
        seal_field(&mut self.title, passphrase)?;
        seal_field(&mut self.content, passphrase)?;
        seal_field(&mut self.summary, passphrase)?;
        seal_field(&mut self.insights, passphrase)?;
        seal_field(&mut self.tags, passphrase)?;
        seal_field(&mut self.goals, passphrase)?;
        Ok(())
    }

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport {
        let mut report = FieldReport::default();
        open_field(&mut self.title, "title", passphrase, &mut report);
        open_field(&mut self.content, "content", passphrase, &mut report);
        open_field(&mut self.summary, "summary", passphrase, &mut report);
        open_field(&mut self.insights, "insights", passphrase, &mut report);
        open_field(&mut self.tags, "tags", passphrase, &mut report);
        open_field(&mut self.goals, "goals", passphrase, &mut report);
        report
    }
}

/// User feedback. The one kind allowed (by policy) to persist as plaintext
/// when no passphrase is available — losing feedback over a locked session
/// was judged worse than storing it unencrypted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Sealed<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<Sealed<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_suggestion: Option<Sealed<String>>,
}

impl Feedback {
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            submitted_at: Utc::now(),
            content: Some(Sealed::plain(content.into())),
            rating: None,
            suggestions: None,
            additional_comments: None,
            improvement_suggestion: None,
        }
    }
}

impl Encryptable for Feedback {
    const KIND: RecordKind = RecordKind::Feedback;
    const PLAINTEXT_FALLBACK: bool = true;

    fn seal_fields(&mut self, passphrase: &str) -> RecordResult<()> {
        seal_field(&mut self.content, passphrase)?;
        seal_field(&mut self.rating, passphrase)?;
        seal_field(&mut self.suggestions, passphrase)?;
        seal_field(&mut self.additional_comments, passphrase)?;
        seal_field(&mut self.improvement_suggestion, passphrase)?;
        Ok(())
    }

    fn open_fields(&mut self, passphrase: Option<&str>) -> FieldReport {
        let mut report = FieldReport::default();
        open_field(&mut self.content, "content", passphrase, &mut report);
        open_field(&mut self.rating, "rating", passphrase, &mut report);
        open_field(&mut self.suggestions, "suggestions", passphrase, &mut report);
        open_field(
            &mut self.additional_comments,
            "additional_comments",
            passphrase,
            &mut report,
        );
        open_field(
            &mut self.improvement_suggestion,
            "improvement_suggestion",
            passphrase,
            &mut report,
        );
        report
    }
}
