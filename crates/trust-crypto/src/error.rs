use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signature rejected: {0}")]
    InvalidSignature(String),

    #[error("Key encoding failed: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
