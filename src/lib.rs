//! Pactus Wallet: non-custodial key management for Pactus
//!
//! This crate holds the core of a Pactus wallet: a BIP39 mnemonic sealed in a
//! password-encrypted vault, a ledger of SLIP-0010 Ed25519 account addresses,
//! and a manager for several wallets sharing one key-value store.
//!
//! # Architecture
//!
//! - **Encrypter**: Argon2id + AES-256-CTR + truncated SHA-256 MAC, the MAC
//!   doubling as the password check
//! - **Wallet**: info / vault / ledger records persisted under fixed storage keys
//! - **WalletManager**: persisted list of wallet IDs
//! - **Collaborators**: storage, HD-key derivation and the node account query
//!   are traits bundled in a [`WalletContext`]
//!
//! # Example
//!
//! ```ignore
//! use pactus_wallet::{WalletConfig, WalletContext, WalletManager, MnemonicStrength, NetworkType};
//!
//! let ctx = WalletContext::from_config(&WalletConfig::from_env());
//! let manager = WalletManager::new(ctx)?;
//!
//! let wallet = manager
//!     .create_wallet("secret", MnemonicStrength::Normal, NetworkType::Mainnet, "Main")
//!     .await?;
//! let address = wallet.create_address("Savings", "secret").await?;
//! let balance = wallet.get_address_balance(&address.address).await?;
//! println!("{} holds {}", address.address, balance);
//! ```

// Public modules
pub mod config;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod network;
pub mod storage;
pub mod wallet;

// Re-exports for convenience
pub use config::WalletConfig;
pub use crypto::{Encrypter, Params};
pub use error::{CryptoError, ParamsError, StorageError, WalletError, WalletResult};
pub use keys::{KeyDeriver, MnemonicStrength, PrivateKey, Slip10Deriver};
pub use network::{AccountInfo, AccountProvider, Amount, NetworkType, RpcClient};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageOp};
pub use wallet::{
    AddressInfo, Ledger, Vault, Wallet, WalletContext, WalletId, WalletInfo, WalletManager,
};
