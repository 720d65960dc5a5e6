//! Adversarial tests for ChaCha20-Poly1305 encryption/decryption.
//!
//! Tests wrong-key decryption, ciphertext tampering, nonce corruption,
//! truncation attacks, and boundary conditions. These validate the
//! guarantees the envelope codec and record encryptor rely on.

use solace_crypto::{
    decrypt, decrypt_string, encrypt, encrypt_string, generate_random_key, CryptoError,
};

// ── Wrong Key ──

#[test]
fn decrypt_with_wrong_key_returns_error() {
    let key_a = generate_random_key();
    let key_b = generate_random_key();
    let plaintext = b"sensitive field data that must not leak";

    let encrypted = encrypt(&key_a, plaintext).unwrap();
    let err = decrypt(&key_b, &encrypted).unwrap_err();

    match err {
        CryptoError::Decryption(msg) => {
            assert!(
                msg.contains("wrong key") || msg.contains("tampered"),
                "should indicate wrong key, got: {msg}"
            );
        }
        other => panic!("expected CryptoError::Decryption, got: {other:?}"),
    }
}

#[test]
fn decrypt_string_with_wrong_key_returns_error() {
    let key_a = generate_random_key();
    let key_b = generate_random_key();

    let encrypted = encrypt_string(&key_a, "secret text").unwrap();
    assert!(decrypt_string(&key_b, &encrypted).is_err());
}

// ── Ciphertext Tampering ──

#[test]
fn single_bit_flip_in_ciphertext_detected() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"integrity-protected data").unwrap();

    let mut tampered = encrypted.clone();
    if let Some(byte) = tampered.ciphertext.last_mut() {
        *byte ^= 0x01;
    }

    assert!(
        decrypt(&key, &tampered).is_err(),
        "single bit flip must be detected by Poly1305 tag"
    );
}

#[test]
fn every_byte_position_tampering_detected() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"test data for position tampering").unwrap();

    for i in 0..encrypted.ciphertext.len() {
        let mut tampered = encrypted.clone();
        tampered.ciphertext[i] ^= 0xFF;
        assert!(
            decrypt(&key, &tampered).is_err(),
            "tampering at byte {i} should be detected"
        );
    }
}

#[test]
fn appended_bytes_detected() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"original data").unwrap();
    encrypted.ciphertext.push(0xFF);

    assert!(decrypt(&key, &encrypted).is_err());
}

// ── Nonce Tampering ──

#[test]
fn wrong_nonce_decryption_fails() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"nonce-critical data").unwrap();
    encrypted.nonce[0] ^= 0xFF;

    assert!(decrypt(&key, &encrypted).is_err());
}

// ── Truncation ──

#[test]
fn truncated_ciphertext_fails() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"data that will be truncated").unwrap();
    encrypted.ciphertext.truncate(5);

    assert!(decrypt(&key, &encrypted).is_err());
}

#[test]
fn empty_ciphertext_fails() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"will be emptied").unwrap();
    encrypted.ciphertext.clear();

    assert!(decrypt(&key, &encrypted).is_err());
}

// ── Boundary Conditions ──

#[test]
fn encrypt_decrypt_empty_plaintext() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"").unwrap();
    let decrypted = decrypt(&key, &encrypted).unwrap();
    assert!(decrypted.is_empty());
}

#[test]
fn encrypt_decrypt_large_plaintext() {
    let key = generate_random_key();
    let large = vec![0xAB; 1024 * 1024];
    let encrypted = encrypt(&key, &large).unwrap();
    let decrypted = decrypt(&key, &encrypted).unwrap();
    assert_eq!(decrypted, large);
}

// Property-based tests (cheap: random key, no KDF per case)
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn encrypt_decrypt_always_roundtrips(
            plaintext in proptest::collection::vec(any::<u8>(), 0..1024),
        ) {
            let key = generate_random_key();
            let encrypted = encrypt(&key, &plaintext).unwrap();
            let decrypted = decrypt(&key, &encrypted).unwrap();
            prop_assert_eq!(decrypted, plaintext);
        }
    }
}
