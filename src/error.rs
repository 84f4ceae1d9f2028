//! Error types for wallet operations
//!
//! Every failure the core can report is one of these variants; nothing is
//! silently recovered except where an operation documents it.

use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    Mnemonic(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
}

/// Failures of the password-based encryption scheme.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Empty password against an encrypted vault, a password supplied to an
    /// unencrypted one, or a MAC mismatch on decrypt.
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    /// Ciphertext is not base64 or too short to hold salt and MAC.
    #[error("Invalid cipher")]
    InvalidCipher,

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("Key derivation failed: {0}")]
    Kdf(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<ParamsError> for WalletError {
    fn from(err: ParamsError) -> Self {
        WalletError::Crypto(CryptoError::Params(err))
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Storage(StorageError::Json(err))
    }
}

impl WalletError {
    /// True when the error is a failed password check.
    pub fn is_invalid_password(&self) -> bool {
        matches!(self, WalletError::Crypto(CryptoError::InvalidPassword))
    }
}
