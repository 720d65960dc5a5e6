//! Batch decryption: per-item failure isolation and input-order results.

use solace_records::{ChatMessage, ChatRole, GuidedSession, RecordEncryptor, Sealed};
use solace_session::{Passphrase, SessionKeyring};

fn encryptor_with(passphrase: &str) -> (SessionKeyring, RecordEncryptor) {
    let keyring = SessionKeyring::new();
    keyring.unlock(Passphrase::new(passphrase));
    (keyring.clone(), RecordEncryptor::new(keyring))
}

#[tokio::test]
async fn one_bad_item_does_not_abort_the_batch() {
    let (keyring, encryptor) = encryptor_with("session-passphrase");

    // Items 1, 2, 4, 5 under the session passphrase
    let mut messages = Vec::new();
    for i in [1, 2, 4, 5] {
        let message = ChatMessage::new("s1", ChatRole::User, format!("message {i}"));
        messages.push(encryptor.encrypt(message).await.unwrap());
    }

    // Item 3 was encrypted under a different passphrase
    keyring.unlock(Passphrase::new("someone-elses-passphrase"));
    let odd_one = encryptor
        .encrypt(ChatMessage::new("s1", ChatRole::User, "message 3"))
        .await
        .unwrap();
    keyring.unlock(Passphrase::new("session-passphrase"));

    messages.insert(2, odd_one);

    let results = encryptor.decrypt_batch(messages).await.unwrap();
    assert_eq!(results.len(), 5);

    let clean: Vec<bool> = results.iter().map(|r| r.report.is_clean()).collect();
    assert_eq!(clean, vec![true, true, false, true, true]);
    assert_eq!(results[2].report.failed_fields, vec!["text"]);

    // Successful siblings decrypted fully
    assert_eq!(
        results[0].record.text.as_ref().unwrap().as_plain().unwrap(),
        "message 1"
    );
    assert_eq!(
        results[4].record.text.as_ref().unwrap().as_plain().unwrap(),
        "message 5"
    );
}

#[tokio::test]
async fn results_come_back_in_input_order() {
    let (_, encryptor) = encryptor_with("ordering-pw");

    let mut messages = Vec::new();
    for i in 0..8 {
        // Vary payload size so completion order is unlikely to match input order
        let body = "x".repeat(1 + (7 - i) * 4000);
        let message = ChatMessage::new("s1", ChatRole::Assistant, format!("{i}:{body}"));
        messages.push(encryptor.encrypt(message).await.unwrap());
    }
    let ids: Vec<String> = messages.iter().map(|m| m.id.clone()).collect();

    let results = encryptor.decrypt_batch(messages).await.unwrap();
    let result_ids: Vec<String> = results.iter().map(|r| r.record.id.clone()).collect();
    assert_eq!(result_ids, ids);

    for (i, item) in results.iter().enumerate() {
        let text = item.record.text.as_ref().unwrap().as_plain().unwrap();
        assert!(text.starts_with(&format!("{i}:")));
    }
}

#[tokio::test]
async fn encrypt_batch_isolates_per_item_outcomes() {
    let (_, encryptor) = encryptor_with("batch-pw");

    let sessions: Vec<GuidedSession> = (0..3)
        .map(|i| {
            let mut session = GuidedSession::new("u1");
            session.summary = Some(Sealed::plain(format!("summary {i}")));
            session
        })
        .collect();

    let results = encryptor.encrypt_batch(sessions).await;
    assert_eq!(results.len(), 3);
    for result in results {
        let session = result.unwrap();
        assert!(session.summary.as_ref().unwrap().is_encrypted());
    }
}

#[tokio::test]
async fn empty_batch_is_fine() {
    let (_, encryptor) = encryptor_with("pw");
    let results = encryptor.decrypt_batch(Vec::<ChatMessage>::new()).await.unwrap();
    assert!(results.is_empty());
}
