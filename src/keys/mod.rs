//! Key material and HD derivation
//!
//! - `mnemonic.rs` - BIP39 generation and validation
//! - `ed25519.rs` - SLIP-0010 Ed25519 derivation, the default [`KeyDeriver`]
//! - `address.rs` - typed Bech32m encoding of addresses and public keys
//!
//! The wallet only builds derivation paths and consumes the derived key and
//! address; how they are computed sits behind [`KeyDeriver`].

pub mod address;
pub mod ed25519;
pub mod mnemonic;

pub use ed25519::Slip10Deriver;
pub use mnemonic::{KeyManager, MnemonicStrength};

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use crate::error::WalletResult;
use crate::network::NetworkType;

/// HD-key collaborator: private key at a path, and the chain address for it.
pub trait KeyDeriver: Send + Sync {
    fn derive_private_key(&self, mnemonic: &str, path: &str) -> WalletResult<PrivateKey>;

    fn derive_address(&self, key: &PrivateKey, network: NetworkType) -> WalletResult<String>;
}

/// Ed25519 private key, wiped on drop.
pub struct PrivateKey {
    secret: Zeroizing<[u8; 32]>,
}

impl PrivateKey {
    pub fn from_bytes(secret: [u8; 32]) -> Self {
        Self {
            secret: Zeroizing::new(secret),
        }
    }

    pub fn public_key(&self) -> [u8; 32] {
        SigningKey::from_bytes(&self.secret)
            .verifying_key()
            .to_bytes()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
