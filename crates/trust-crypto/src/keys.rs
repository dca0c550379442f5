//! Public key construction
//!
//! Supported formats:
//! - PEM `PUBLIC KEY` (SubjectPublicKeyInfo)
//! - PEM `RSA PUBLIC KEY` (PKCS#1)
//! - PEM `CERTIFICATE` (the certificate's subjectPublicKeyInfo)
//! - DER bytes tagged as SPKI or PKCS#1

use std::fmt;
use std::str::FromStr;

use pem_rfc7468::LineEnding;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use spki::der::{Decode, Encode};
use spki::{DecodePublicKey, EncodePublicKey, ObjectIdentifier, SubjectPublicKeyInfoRef};
use x509_cert::Certificate;

use crate::error::{CryptoError, Result};

/// rsaEncryption: 1.2.840.113549.1.1.1
const OID_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-ecPublicKey: 1.2.840.10045.2.1
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// secp256r1: 1.2.840.10045.3.1.7
const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// secp384r1: 1.3.132.0.34
const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// id-Ed25519: 1.3.101.112
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

const SPKI_PEM_LABEL: &str = "PUBLIC KEY";
const PKCS1_PEM_LABEL: &str = "RSA PUBLIC KEY";
const CERTIFICATE_PEM_LABEL: &str = "CERTIFICATE";

/// Binary encoding of DER key bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    #[default]
    Spki,
    Pkcs1,
}

impl KeyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Spki => "spki",
            KeyFormat::Pkcs1 => "pkcs1",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "spki" => Ok(KeyFormat::Spki),
            "pkcs1" => Ok(KeyFormat::Pkcs1),
            _ => Err(CryptoError::InvalidKeyMaterial(format!(
                "unknown key format: {}",
                name
            ))),
        }
    }
}

/// Key input: PEM text or raw DER bytes
#[derive(Debug, Clone, Copy)]
pub enum KeyMaterial<'a> {
    Pem(&'a str),
    Der(&'a [u8]),
}

impl<'a> From<&'a str> for KeyMaterial<'a> {
    fn from(pem: &'a str) -> Self {
        KeyMaterial::Pem(pem)
    }
}

impl<'a> From<&'a String> for KeyMaterial<'a> {
    fn from(pem: &'a String) -> Self {
        KeyMaterial::Pem(pem)
    }
}

impl<'a> From<&'a [u8]> for KeyMaterial<'a> {
    fn from(der: &'a [u8]) -> Self {
        KeyMaterial::Der(der)
    }
}

impl<'a> From<&'a Vec<u8>> for KeyMaterial<'a> {
    fn from(der: &'a Vec<u8>) -> Self {
        KeyMaterial::Der(der)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for KeyMaterial<'a> {
    fn from(der: &'a [u8; N]) -> Self {
        KeyMaterial::Der(der)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Ec,
    Ed25519,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "rsa",
            KeyType::Ec => "ec",
            KeyType::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
}

/// Verification-only public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// Parse a PEM-encoded key; the PEM label selects the decoding
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.trim().as_bytes())
            .map_err(|e| invalid(format!("malformed PEM: {}", e)))?;

        match label {
            SPKI_PEM_LABEL => Self::from_spki_der(&der),
            PKCS1_PEM_LABEL => Self::from_pkcs1_der(&der),
            CERTIFICATE_PEM_LABEL => Self::from_certificate_der(&der),
            other => Err(invalid(format!("unsupported PEM label: {}", other))),
        }
    }

    /// Parse DER key bytes in the given format
    pub fn from_der(der: &[u8], format: KeyFormat) -> Result<Self> {
        match format {
            KeyFormat::Spki => Self::from_spki_der(der),
            KeyFormat::Pkcs1 => Self::from_pkcs1_der(der),
        }
    }

    /// Parse a DER SubjectPublicKeyInfo
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let info = SubjectPublicKeyInfoRef::from_der(der)
            .map_err(|e| invalid(format!("malformed SubjectPublicKeyInfo: {}", e)))?;
        let oid = info.algorithm.oid;

        let key = if oid == OID_RSA_ENCRYPTION {
            RsaPublicKey::from_public_key_der(der)
                .map(PublicKey::Rsa)
                .map_err(|e| invalid(format!("invalid RSA key: {}", e)))?
        } else if oid == OID_EC_PUBLIC_KEY {
            let curve = info
                .algorithm
                .parameters_oid()
                .map_err(|e| invalid(format!("missing EC curve parameter: {}", e)))?;

            if curve == OID_SECP256R1 {
                p256::ecdsa::VerifyingKey::from_public_key_der(der)
                    .map(PublicKey::P256)
                    .map_err(|e| invalid(format!("invalid P-256 key: {}", e)))?
            } else if curve == OID_SECP384R1 {
                p384::ecdsa::VerifyingKey::from_public_key_der(der)
                    .map(PublicKey::P384)
                    .map_err(|e| invalid(format!("invalid P-384 key: {}", e)))?
            } else {
                return Err(invalid(format!("unsupported EC curve: {}", curve)));
            }
        } else if oid == OID_ED25519 {
            ed25519_dalek::VerifyingKey::from_public_key_der(der)
                .map(PublicKey::Ed25519)
                .map_err(|e| invalid(format!("invalid Ed25519 key: {}", e)))?
        } else {
            return Err(invalid(format!("unsupported key algorithm: {}", oid)));
        };

        tracing::trace!(key_type = %key.key_type(), "decoded SPKI public key");
        Ok(key)
    }

    /// Parse a DER PKCS#1 RSAPublicKey
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_pkcs1_der(der)
            .map_err(|e| invalid(format!("invalid PKCS#1 RSA key: {}", e)))?;
        tracing::trace!("decoded PKCS#1 public key");
        Ok(PublicKey::Rsa(key))
    }

    /// Extract the subject public key from a DER X.509 certificate
    pub fn from_certificate_der(der: &[u8]) -> Result<Self> {
        let cert = Certificate::from_der(der)
            .map_err(|e| invalid(format!("malformed certificate: {}", e)))?;
        let spki = cert
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| invalid(format!("malformed certificate key: {}", e)))?;
        Self::from_spki_der(&spki)
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Rsa(_) => KeyType::Rsa,
            PublicKey::P256(_) | PublicKey::P384(_) => KeyType::Ec,
            PublicKey::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Named curve for EC keys
    pub fn curve(&self) -> Option<EcCurve> {
        match self {
            PublicKey::P256(_) => Some(EcCurve::P256),
            PublicKey::P384(_) => Some(EcCurve::P384),
            _ => None,
        }
    }

    /// Re-encode as DER SubjectPublicKeyInfo
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PublicKey::Rsa(key) => key.to_public_key_der(),
            PublicKey::P256(key) => key.to_public_key_der(),
            PublicKey::P384(key) => key.to_public_key_der(),
            PublicKey::Ed25519(key) => key.to_public_key_der(),
        }
        .map_err(|e| CryptoError::Encoding(e.to_string()))?;

        Ok(document.as_bytes().to_vec())
    }

    /// Re-encode as a PEM `PUBLIC KEY` block
    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_spki_der()?;
        pem_rfc7468::encode_string(SPKI_PEM_LABEL, LineEnding::LF, &der)
            .map_err(|e| CryptoError::Encoding(e.to_string()))
    }
}

/// Build a public key from PEM text or DER bytes
///
/// # Arguments
/// * `key` - PEM text (format taken from the PEM label) or DER bytes
/// * `format` - Encoding of DER bytes; ignored for PEM input
///
/// # Returns
/// The public key, or `InvalidKeyMaterial` if it cannot be decoded
pub fn create_public_key<'a>(key: impl Into<KeyMaterial<'a>>, format: KeyFormat) -> Result<PublicKey> {
    match key.into() {
        KeyMaterial::Pem(pem) => PublicKey::from_pem(pem),
        KeyMaterial::Der(der) => PublicKey::from_der(der, format),
    }
}

fn invalid(reason: String) -> CryptoError {
    CryptoError::InvalidKeyMaterial(reason)
}
