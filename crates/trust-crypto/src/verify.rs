//! Signature verification
//!
//! [`verify`] never returns an error. Malformed keys, malformed signatures,
//! unknown algorithms and genuine mismatches all come back as `false`, so
//! trust decisions stay a plain boolean check.

use std::borrow::Cow;

use ed25519_dalek::Verifier;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use rsa::Pkcs1v15Sign;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::error::{CryptoError, Result};
use crate::hash::HashAlgorithm;
use crate::keys::{KeyFormat, PublicKey};

/// Anything that can stand in for a verification key
#[derive(Debug, Clone, Copy)]
pub enum KeyLike<'a> {
    Key(&'a PublicKey),
    Pem(&'a str),
    /// DER SubjectPublicKeyInfo
    Der(&'a [u8]),
}

impl<'a> From<&'a PublicKey> for KeyLike<'a> {
    fn from(key: &'a PublicKey) -> Self {
        KeyLike::Key(key)
    }
}

impl<'a> From<&'a str> for KeyLike<'a> {
    fn from(pem: &'a str) -> Self {
        KeyLike::Pem(pem)
    }
}

impl<'a> From<&'a String> for KeyLike<'a> {
    fn from(pem: &'a String) -> Self {
        KeyLike::Pem(pem)
    }
}

impl<'a> From<&'a [u8]> for KeyLike<'a> {
    fn from(der: &'a [u8]) -> Self {
        KeyLike::Der(der)
    }
}

impl<'a> From<&'a Vec<u8>> for KeyLike<'a> {
    fn from(der: &'a Vec<u8>) -> Self {
        KeyLike::Der(der)
    }
}

impl<'a> KeyLike<'a> {
    fn resolve(self) -> Result<Cow<'a, PublicKey>> {
        match self {
            KeyLike::Key(key) => Ok(Cow::Borrowed(key)),
            KeyLike::Pem(pem) => PublicKey::from_pem(pem).map(Cow::Owned),
            KeyLike::Der(der) => PublicKey::from_der(der, KeyFormat::Spki).map(Cow::Owned),
        }
    }
}

impl PublicKey {
    /// Default digest when the caller names none; `None` means pure EdDSA
    pub fn default_hash(&self) -> Option<HashAlgorithm> {
        match self {
            PublicKey::Rsa(_) | PublicKey::P256(_) => Some(HashAlgorithm::Sha256),
            PublicKey::P384(_) => Some(HashAlgorithm::Sha384),
            PublicKey::Ed25519(_) => None,
        }
    }

    /// Verify `signature` over `data`, reporting why a signature was rejected
    ///
    /// RSA signatures use PKCS#1 v1.5 padding. ECDSA signatures are DER
    /// encoded. Ed25519 accepts no digest algorithm.
    pub fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        algorithm: Option<HashAlgorithm>,
    ) -> Result<()> {
        match self {
            PublicKey::Rsa(key) => {
                let algorithm = algorithm.unwrap_or(HashAlgorithm::Sha256);
                let hashed = algorithm.digest([data]);
                key.verify(pkcs1v15_scheme(algorithm), &hashed, signature)
                    .map_err(rejected)
            }
            PublicKey::P256(key) => {
                let algorithm = algorithm.unwrap_or(HashAlgorithm::Sha256);
                let signature = p256::ecdsa::Signature::from_der(signature).map_err(rejected)?;
                key.verify_prehash(&algorithm.digest([data]), &signature)
                    .map_err(rejected)
            }
            PublicKey::P384(key) => {
                let algorithm = algorithm.unwrap_or(HashAlgorithm::Sha384);
                let signature = p384::ecdsa::Signature::from_der(signature).map_err(rejected)?;
                key.verify_prehash(&algorithm.digest([data]), &signature)
                    .map_err(rejected)
            }
            PublicKey::Ed25519(key) => {
                if let Some(algorithm) = algorithm {
                    return Err(CryptoError::UnsupportedAlgorithm(format!(
                        "{} cannot be used with ed25519 keys",
                        algorithm
                    )));
                }
                let signature = ed25519_dalek::Signature::from_slice(signature).map_err(rejected)?;
                key.verify(data, &signature).map_err(rejected)
            }
        }
    }
}

/// Check `signature` over `data` under `key`
///
/// # Arguments
/// * `data` - The signed bytes
/// * `key` - A [`PublicKey`], PEM text, or DER SPKI bytes
/// * `signature` - The signature to check
/// * `algorithm` - Digest name; `None` uses the key type's default
///
/// # Returns
/// `true` only for a valid signature. Every failure is `false`.
pub fn verify<'a>(
    data: &[u8],
    key: impl Into<KeyLike<'a>>,
    signature: &[u8],
    algorithm: Option<&str>,
) -> bool {
    let outcome = key.into().resolve().and_then(|key| {
        let algorithm = algorithm.map(str::parse::<HashAlgorithm>).transpose()?;
        key.verify_signature(data, signature, algorithm)
    });

    match outcome {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "signature verification failed");
            false
        }
    }
}

fn pkcs1v15_scheme(algorithm: HashAlgorithm) -> Pkcs1v15Sign {
    match algorithm {
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        HashAlgorithm::Sha512_224 => Pkcs1v15Sign::new::<Sha512_224>(),
        HashAlgorithm::Sha512_256 => Pkcs1v15Sign::new::<Sha512_256>(),
    }
}

fn rejected(err: impl std::fmt::Display) -> CryptoError {
    CryptoError::InvalidSignature(err.to_string())
}
