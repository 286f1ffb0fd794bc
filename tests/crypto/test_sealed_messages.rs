// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Sealed message behavior through the public crypto API

use e2e_relay_node::crypto::{decrypt, encrypt, generate_keypair, CryptoError, PublicKey};

#[test]
fn test_recipient_key_survives_wire_encoding() {
    let (bob_private, bob_public) = generate_keypair();

    // What the directory stores and hands back
    let published = bob_public.to_bytes();
    assert_eq!(published.len(), 33);
    let fetched = PublicKey::from_bytes(&published).unwrap();

    let sealed = encrypt(b"over the wire", &fetched).unwrap();
    assert_eq!(decrypt(&sealed, &bob_private).unwrap(), b"over the wire");
}

#[test]
fn test_same_plaintext_seals_differently() {
    let (_, bob_public) = generate_keypair();

    let first = encrypt(b"hello", &bob_public).unwrap();
    let second = encrypt(b"hello", &bob_public).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_only_recipient_can_open() {
    let (_, bob_public) = generate_keypair();
    let (eve_private, _) = generate_keypair();

    let sealed = encrypt(b"for bob", &bob_public).unwrap();
    assert!(matches!(
        decrypt(&sealed, &eve_private),
        Err(CryptoError::DecryptionFailed { .. })
    ));
}

#[test]
fn test_tampered_ciphertext_rejected() {
    let (bob_private, bob_public) = generate_keypair();

    let mut sealed = encrypt(b"integrity", &bob_public).unwrap();
    let last = sealed.len() - 1;
    sealed[last] ^= 0x01;
    assert!(decrypt(&sealed, &bob_private).is_err());
}

#[test]
fn test_garbage_is_rejected_not_panicking() {
    let (bob_private, _) = generate_keypair();

    assert!(decrypt(&[], &bob_private).is_err());
    assert!(decrypt(&[0u8; 200], &bob_private).is_err());
    assert!(PublicKey::from_bytes(&[0u8; 33]).is_err());
}
