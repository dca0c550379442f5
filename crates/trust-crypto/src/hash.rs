//! Digests by algorithm name
//!
//! Algorithm names follow the OpenSSL/Node spelling (`sha256`, `sha512-256`).
//! Parsing is case-insensitive and tolerates a hyphen after `sha`
//! (`SHA-384`), so names copied out of certificates and bundle metadata
//! resolve without extra normalization by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::error::{CryptoError, Result};

/// Hash algorithms understood by [`digest`] and signature verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "sha1")]
    Sha1,
    #[serde(rename = "sha224")]
    Sha224,
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha384")]
    Sha384,
    #[serde(rename = "sha512")]
    Sha512,
    #[serde(rename = "sha512-224")]
    Sha512_224,
    #[serde(rename = "sha512-256")]
    Sha512_256,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 7] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha512_224 => "sha512-224",
            HashAlgorithm::Sha512_256 => "sha512-256",
        }
    }

    /// Digest size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha512_224 => 28,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha512_256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Hash the chunks in order, as if they were one concatenated buffer
    pub fn digest<I>(self, data: I) -> Vec<u8>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut hasher = Hasher::new(self);
        for chunk in data {
            hasher.update(chunk.as_ref());
        }
        hasher.finalize()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let normalized = match lowered.strip_prefix("sha-") {
            Some(rest) => format!("sha{}", rest),
            None => lowered,
        };

        match normalized.as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha224" => Ok(HashAlgorithm::Sha224),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "sha512-224" | "sha512/224" => Ok(HashAlgorithm::Sha512_224),
            "sha512-256" | "sha512/256" => Ok(HashAlgorithm::Sha512_256),
            _ => Err(CryptoError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

/// Incremental hash context for a runtime-selected algorithm
#[derive(Clone)]
pub struct Hasher {
    state: HasherState,
}

#[derive(Clone)]
enum HasherState {
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Sha512_224(Sha512_224),
    Sha512_256(Sha512_256),
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha1 => HasherState::Sha1(Sha1::new()),
            HashAlgorithm::Sha224 => HasherState::Sha224(Sha224::new()),
            HashAlgorithm::Sha256 => HasherState::Sha256(Sha256::new()),
            HashAlgorithm::Sha384 => HasherState::Sha384(Sha384::new()),
            HashAlgorithm::Sha512 => HasherState::Sha512(Sha512::new()),
            HashAlgorithm::Sha512_224 => HasherState::Sha512_224(Sha512_224::new()),
            HashAlgorithm::Sha512_256 => HasherState::Sha512_256(Sha512_256::new()),
        };
        Self { state }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            HasherState::Sha1(_) => HashAlgorithm::Sha1,
            HasherState::Sha224(_) => HashAlgorithm::Sha224,
            HasherState::Sha256(_) => HashAlgorithm::Sha256,
            HasherState::Sha384(_) => HashAlgorithm::Sha384,
            HasherState::Sha512(_) => HashAlgorithm::Sha512,
            HasherState::Sha512_224(_) => HashAlgorithm::Sha512_224,
            HasherState::Sha512_256(_) => HashAlgorithm::Sha512_256,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Sha1(h) => h.update(data),
            HasherState::Sha224(h) => h.update(data),
            HasherState::Sha256(h) => h.update(data),
            HasherState::Sha384(h) => h.update(data),
            HasherState::Sha512(h) => h.update(data),
            HasherState::Sha512_224(h) => h.update(data),
            HasherState::Sha512_256(h) => h.update(data),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        match self.state {
            HasherState::Sha1(h) => h.finalize().to_vec(),
            HasherState::Sha224(h) => h.finalize().to_vec(),
            HasherState::Sha256(h) => h.finalize().to_vec(),
            HasherState::Sha384(h) => h.finalize().to_vec(),
            HasherState::Sha512(h) => h.finalize().to_vec(),
            HasherState::Sha512_224(h) => h.finalize().to_vec(),
            HasherState::Sha512_256(h) => h.finalize().to_vec(),
        }
    }
}

/// Hash `data` chunks in order with the named algorithm
///
/// # Arguments
/// * `algorithm` - Algorithm name, e.g. `"sha256"` or `"sha512"`
/// * `data` - Zero or more chunks, hashed as their concatenation
///
/// # Returns
/// The digest bytes, or `UnsupportedAlgorithm` for an unknown name
pub fn digest<I>(algorithm: &str, data: I) -> Result<Vec<u8>>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let algorithm: HashAlgorithm = algorithm.parse()?;
    Ok(algorithm.digest(data))
}

/// SHA-256 over `data` chunks
///
/// Kept for older call sites; prefer [`digest`] with an explicit algorithm.
pub fn hash<I>(data: I) -> Vec<u8>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    HashAlgorithm::Sha256.digest(data)
}
