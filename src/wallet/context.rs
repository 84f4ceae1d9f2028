use std::sync::Arc;

use crate::config::WalletConfig;
use crate::crypto::Encrypter;
use crate::keys::{KeyDeriver, Slip10Deriver};
use crate::network::{AccountProvider, RpcClient};
use crate::storage::{FileStorage, Storage};

/// Collaborators shared by [`Wallet`](super::Wallet) and
/// [`WalletManager`](super::WalletManager).
///
/// Built explicitly by the caller and cloned into every wallet; there is no
/// global instance.
#[derive(Clone)]
pub struct WalletContext {
    pub storage: Arc<dyn Storage>,
    pub deriver: Arc<dyn KeyDeriver>,
    pub accounts: Arc<dyn AccountProvider>,
    /// Template for password-protected vaults
    pub encrypter: Encrypter,
}

impl WalletContext {
    /// Context with the SLIP-0010 deriver and default Argon2id cost.
    pub fn new(storage: Arc<dyn Storage>, accounts: Arc<dyn AccountProvider>) -> Self {
        Self {
            storage,
            deriver: Arc::new(Slip10Deriver::new()),
            accounts,
            encrypter: Encrypter::default_encrypter(),
        }
    }

    pub fn with_deriver(mut self, deriver: Arc<dyn KeyDeriver>) -> Self {
        self.deriver = deriver;
        self
    }

    pub fn with_encrypter(mut self, encrypter: Encrypter) -> Self {
        self.encrypter = encrypter;
        self
    }

    /// File storage, JSON-RPC balances and KDF cost taken from `config`.
    pub fn from_config(config: &WalletConfig) -> Self {
        let storage = FileStorage::new_with_base_dir(config.storage_dir.clone());
        let accounts = RpcClient::new(config.rpc_url.clone());
        Self::new(Arc::new(storage), Arc::new(accounts)).with_encrypter(config.encrypter())
    }
}

impl std::fmt::Debug for WalletContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletContext")
            .field("encrypter", &self.encrypter)
            .finish_non_exhaustive()
    }
}
