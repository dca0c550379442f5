//! Cryptographic primitives for trust verification
//!
//! This crate is a thin adapter over the RustCrypto stack. It provides:
//! 1. Public key construction from PEM text or DER bytes (SPKI / PKCS#1)
//! 2. Digests by algorithm name
//! 3. Signature verification that reports failure as `false`
//! 4. Constant-time byte comparison
//!
//! Every function is a pure function of its inputs; there is no global state.

pub mod compare;
pub mod config;
pub mod error;
pub mod hash;
pub mod keys;
pub mod verify;

pub use compare::buffer_equal;
pub use config::CryptoDefaults;
pub use error::{CryptoError, Result};
pub use hash::{digest, hash, HashAlgorithm, Hasher};
pub use keys::{create_public_key, EcCurve, KeyFormat, KeyMaterial, KeyType, PublicKey};
pub use verify::{verify, KeyLike};
