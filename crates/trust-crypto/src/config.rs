//! Configurable defaults
//!
//! The free functions in this crate use SPKI for DER keys and SHA-256 for
//! digests. Hosts that need algorithm agility can load a [`CryptoDefaults`]
//! from their own configuration and call through it instead.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::HashAlgorithm;
use crate::keys::{KeyFormat, KeyMaterial, PublicKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoDefaults {
    /// Encoding assumed for DER key bytes
    pub key_format: KeyFormat,
    /// Digest used when no algorithm is named
    pub digest: HashAlgorithm,
}

impl CryptoDefaults {
    pub fn create_public_key<'a>(&self, key: impl Into<KeyMaterial<'a>>) -> Result<PublicKey> {
        crate::keys::create_public_key(key, self.key_format)
    }

    pub fn digest<I>(&self, data: I) -> Vec<u8>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.digest.digest(data)
    }
}
