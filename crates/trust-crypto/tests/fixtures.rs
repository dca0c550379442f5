//! Integration tests against OpenSSL-generated keys and signatures
//!
//! Fixtures live in `tests/fixtures/`: one RSA-2048 key (SPKI and PKCS#1,
//! PEM and DER), one P-384 key with a self-signed certificate, and one
//! Ed25519 key. Each signs `message.txt`.

use pretty_assertions::assert_eq;
use trust_crypto::{
    create_public_key, digest, verify, CryptoError, EcCurve, KeyFormat, KeyType, PublicKey,
};

const MESSAGE: &[u8] = include_bytes!("fixtures/message.txt");

const RSA_SPKI_PEM: &str = include_str!("fixtures/rsa_spki.pem");
const RSA_SPKI_DER: &[u8] = include_bytes!("fixtures/rsa_spki.der");
const RSA_PKCS1_PEM: &str = include_str!("fixtures/rsa_pkcs1.pem");
const RSA_PKCS1_DER: &[u8] = include_bytes!("fixtures/rsa_pkcs1.der");
const RSA_SHA256_SIG: &[u8] = include_bytes!("fixtures/rsa_sha256.sig");
const RSA_SHA512_SIG: &[u8] = include_bytes!("fixtures/rsa_sha512.sig");

const P384_SPKI_PEM: &str = include_str!("fixtures/p384_spki.pem");
const P384_CERT_PEM: &str = include_str!("fixtures/p384_cert.pem");
const P384_SHA384_SIG: &[u8] = include_bytes!("fixtures/p384_sha384.sig");

const ED25519_SPKI_PEM: &str = include_str!("fixtures/ed25519_spki.pem");
const ED25519_SIG: &[u8] = include_bytes!("fixtures/ed25519.sig");

// ============================================================
// Key construction
// ============================================================

#[test]
fn rsa_key_forms_agree() {
    let from_spki_pem = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();
    let from_spki_der = create_public_key(RSA_SPKI_DER, KeyFormat::Spki).unwrap();
    let from_pkcs1_pem = create_public_key(RSA_PKCS1_PEM, KeyFormat::Spki).unwrap();
    let from_pkcs1_der = create_public_key(RSA_PKCS1_DER, KeyFormat::Pkcs1).unwrap();

    assert_eq!(from_spki_pem.key_type(), KeyType::Rsa);
    assert_eq!(from_spki_pem, from_spki_der);
    assert_eq!(from_spki_pem, from_pkcs1_pem);
    assert_eq!(from_spki_pem, from_pkcs1_der);
}

#[test]
fn spki_der_reencodes_identically() {
    let key = create_public_key(RSA_SPKI_DER, KeyFormat::Spki).unwrap();
    assert_eq!(key.to_spki_der().unwrap(), RSA_SPKI_DER.to_vec());

    let from_pkcs1 = create_public_key(RSA_PKCS1_DER, KeyFormat::Pkcs1).unwrap();
    assert_eq!(from_pkcs1.to_spki_der().unwrap(), RSA_SPKI_DER.to_vec());
}

#[test]
fn pem_reencodes_to_equivalent_key() {
    for pem in [RSA_SPKI_PEM, P384_SPKI_PEM, ED25519_SPKI_PEM] {
        let key = PublicKey::from_pem(pem).unwrap();
        let reparsed = PublicKey::from_pem(&key.to_pem().unwrap()).unwrap();
        assert_eq!(reparsed, key);
    }
}

#[test]
fn certificate_yields_subject_key() {
    let from_cert = create_public_key(P384_CERT_PEM, KeyFormat::Spki).unwrap();
    let from_spki = create_public_key(P384_SPKI_PEM, KeyFormat::Spki).unwrap();

    assert_eq!(from_cert, from_spki);
    assert_eq!(from_cert.key_type(), KeyType::Ec);
    assert_eq!(from_cert.curve(), Some(EcCurve::P384));
}

#[test]
fn wrong_der_format_is_invalid_key_material() {
    let err = create_public_key(RSA_SPKI_DER, KeyFormat::Pkcs1).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyMaterial(_)));

    let err = create_public_key(RSA_PKCS1_DER, KeyFormat::Spki).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyMaterial(_)));
}

#[test]
fn truncated_pem_is_invalid_key_material() {
    let truncated = &RSA_SPKI_PEM[..RSA_SPKI_PEM.len() / 2];
    let err = create_public_key(truncated, KeyFormat::Spki).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyMaterial(_)));
}

// ============================================================
// Verification
// ============================================================

#[test]
fn rsa_signature_verifies_with_default_and_named_digest() {
    let key = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();

    assert!(verify(MESSAGE, &key, RSA_SHA256_SIG, None));
    assert!(verify(MESSAGE, &key, RSA_SHA256_SIG, Some("sha256")));
    assert!(verify(MESSAGE, &key, RSA_SHA512_SIG, Some("SHA512")));

    assert!(!verify(MESSAGE, &key, RSA_SHA512_SIG, None));
    assert!(!verify(MESSAGE, &key, RSA_SHA256_SIG, Some("sha384")));
}

#[test]
fn rsa_mutated_signature_fails() {
    let key = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();
    let mut mutated = RSA_SHA256_SIG.to_vec();
    mutated[17] ^= 0x40;

    assert!(!verify(MESSAGE, &key, &mutated, None));
    assert!(!verify(b"the quick brown cat", &key, RSA_SHA256_SIG, None));
}

#[test]
fn rsa_accepts_key_material_directly() {
    assert!(verify(MESSAGE, RSA_SPKI_PEM, RSA_SHA256_SIG, None));
    assert!(verify(MESSAGE, RSA_PKCS1_PEM, RSA_SHA256_SIG, None));
    assert!(verify(MESSAGE, RSA_SPKI_DER, RSA_SHA256_SIG, None));
}

#[test]
fn p384_signature_verifies() {
    let key = create_public_key(P384_SPKI_PEM, KeyFormat::Spki).unwrap();

    assert!(verify(MESSAGE, &key, P384_SHA384_SIG, None));
    assert!(verify(MESSAGE, &key, P384_SHA384_SIG, Some("sha-384")));
    assert!(!verify(MESSAGE, &key, P384_SHA384_SIG, Some("sha256")));

    let mut mutated = P384_SHA384_SIG.to_vec();
    let last = mutated.len() - 1;
    mutated[last] ^= 0x01;
    assert!(!verify(MESSAGE, &key, &mutated, None));
}

#[test]
fn ed25519_signature_verifies() {
    let key = create_public_key(ED25519_SPKI_PEM, KeyFormat::Spki).unwrap();
    assert_eq!(key.key_type(), KeyType::Ed25519);

    assert!(verify(MESSAGE, &key, ED25519_SIG, None));
    assert!(!verify(MESSAGE, &key, ED25519_SIG, Some("sha512")));

    let mut mutated = ED25519_SIG.to_vec();
    mutated[0] ^= 0x01;
    assert!(!verify(MESSAGE, &key, &mutated, None));
}

#[test]
fn signatures_do_not_cross_key_families() {
    let rsa = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();
    let p384 = create_public_key(P384_SPKI_PEM, KeyFormat::Spki).unwrap();
    let ed25519 = create_public_key(ED25519_SPKI_PEM, KeyFormat::Spki).unwrap();

    assert!(!verify(MESSAGE, &rsa, P384_SHA384_SIG, None));
    assert!(!verify(MESSAGE, &rsa, ED25519_SIG, None));
    assert!(!verify(MESSAGE, &p384, RSA_SHA256_SIG, None));
    assert!(!verify(MESSAGE, &p384, ED25519_SIG, None));
    assert!(!verify(MESSAGE, &ed25519, RSA_SHA256_SIG, None));
    assert!(!verify(MESSAGE, &ed25519, P384_SHA384_SIG, None));
}

#[test]
fn empty_inputs_are_false() {
    let key = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();
    assert!(!verify(b"", &key, RSA_SHA256_SIG, None));
    assert!(!verify(MESSAGE, &key, b"", None));
    assert!(!verify(MESSAGE, "", RSA_SHA256_SIG, None));
}

// ============================================================
// Digest
// ============================================================

#[test]
fn digest_of_message_fixture() {
    let chunked = digest("sha256", [&MESSAGE[..4], &MESSAGE[4..]]).unwrap();
    let whole = digest("sha256", [MESSAGE]).unwrap();
    assert_eq!(chunked, whole);
    assert_eq!(
        hex::encode(whole),
        "9ecb36561341d18eb65484e833efea61edc74b84cf5e6ae1b81c63533e25fc8f"
    );
}

// ============================================================
// Concurrency
// ============================================================

#[test]
fn shared_key_verifies_across_threads() {
    let key = create_public_key(RSA_SPKI_PEM, KeyFormat::Spki).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|skip| {
                let key = &key;
                scope.spawn(move || {
                    let valid = verify(MESSAGE, key, RSA_SHA256_SIG, None);
                    let truncated = verify(&MESSAGE[skip..], key, RSA_SHA256_SIG, None);
                    (valid, truncated)
                })
            })
            .collect();

        for handle in handles {
            let (valid, truncated) = handle.join().unwrap();
            assert!(valid);
            assert!(!truncated);
        }
    });
}
