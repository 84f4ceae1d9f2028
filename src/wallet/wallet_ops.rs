/// Wallet lifecycle operations
///
/// Creation, restoration and loading of a single wallet, plus the accessors
/// and mutations of its metadata and vault.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use zeroize::Zeroizing;

use super::context::WalletContext;
use super::info::{WalletId, WalletInfo};
use super::ledger::Ledger;
use super::vault::{KeyStore, Vault};
use crate::crypto::Encrypter;
use crate::error::WalletResult;
use crate::keys::{KeyManager, MnemonicStrength};
use crate::network::NetworkType;
use crate::storage::{self, keys, StorageOp};

/// One HD wallet: metadata, encrypted vault and address ledger.
///
/// The decrypted mnemonic is never kept; every secret-touching call takes the
/// password.
pub struct Wallet {
    pub(super) ctx: WalletContext,
    info: RwLock<WalletInfo>,
    vault: RwLock<Vault>,
    ledger: RwLock<Ledger>,
    /// Serializes operations that decrypt the vault and then write back
    pub(super) secret_queue: Mutex<()>,
}

impl Wallet {
    fn from_parts(ctx: &WalletContext, info: WalletInfo, vault: Vault, ledger: Ledger) -> Self {
        Self {
            ctx: ctx.clone(),
            info: RwLock::new(info),
            vault: RwLock::new(vault),
            ledger: RwLock::new(ledger),
            secret_queue: Mutex::new(()),
        }
    }

    /// Generate a fresh mnemonic and build a wallet from it.
    pub async fn create(
        ctx: &WalletContext,
        password: &str,
        strength: MnemonicStrength,
        network: NetworkType,
        name: &str,
    ) -> WalletResult<Self> {
        let mnemonic = KeyManager::generate(strength)?;
        Self::restore(ctx, &mnemonic, password, network, name).await
    }

    /// Build a wallet from an existing mnemonic and persist its three records.
    ///
    /// An empty password stores the key store unencrypted. Nothing is written
    /// if the mnemonic is invalid.
    pub async fn restore(
        ctx: &WalletContext,
        mnemonic: &str,
        password: &str,
        network: NetworkType,
        name: &str,
    ) -> WalletResult<Self> {
        let mnemonic = KeyManager::validate(mnemonic)?;

        let info = WalletInfo::new(name, network);
        let encrypter = if password.is_empty() {
            Encrypter::no_encrypter()
        } else {
            ctx.encrypter.clone()
        };
        let vault = Vault::seal(encrypter, &KeyStore::new(&mnemonic), password).await?;
        let ledger = Ledger::new(network);

        let id = info.uuid;
        ctx.storage.apply(vec![
            StorageOp::set(keys::wallet_info(&id), info.serialize()?),
            StorageOp::set(keys::wallet_vault(&id), vault.serialize()?),
            StorageOp::set(keys::wallet_ledger(&id), ledger.serialize()?),
        ])?;

        log::info!(
            "Wallet {} ({}) stored on {:?}, encrypted: {}",
            id,
            info.name,
            network,
            vault.is_encrypted()
        );
        Ok(Self::from_parts(ctx, info, vault, ledger))
    }

    /// Rebuild a wallet from its stored records.
    pub fn load(ctx: &WalletContext, id: &WalletId) -> WalletResult<Self> {
        let store = ctx.storage.as_ref();
        let info = WalletInfo::deserialize(&storage::get_required(store, &keys::wallet_info(id))?)?;
        let vault = Vault::deserialize(&storage::get_required(store, &keys::wallet_vault(id))?)?;
        let ledger = Ledger::deserialize(&storage::get_required(store, &keys::wallet_ledger(id))?)?;

        log::debug!("Loaded wallet {} with {} addresses", id, ledger.addresses.len());
        Ok(Self::from_parts(ctx, info, vault, ledger))
    }

    pub fn id(&self) -> WalletId {
        self.info().uuid
    }

    pub fn name(&self) -> String {
        self.info().name.clone()
    }

    pub fn network_type(&self) -> NetworkType {
        self.info().network
    }

    pub fn is_testnet(&self) -> bool {
        self.network_type().is_testnet()
    }

    pub fn is_encrypted(&self) -> bool {
        self.read_vault().is_encrypted()
    }

    pub fn wallet_info(&self) -> WalletInfo {
        self.info().clone()
    }

    /// Rename the wallet. The record is persisted before memory changes.
    pub fn update_name(&self, name: &str) -> WalletResult<()> {
        let mut info = self.info.write().unwrap_or_else(PoisonError::into_inner);
        let mut renamed = info.clone();
        renamed.name = name.to_string();

        self.ctx
            .storage
            .set(&keys::wallet_info(&renamed.uuid), &renamed.serialize()?)?;
        *info = renamed;
        Ok(())
    }

    /// Decrypt and return the mnemonic phrase.
    pub async fn get_mnemonic(&self, password: &str) -> WalletResult<Zeroizing<String>> {
        let vault = self.read_vault().clone();
        let key_store = vault.open(password).await?;
        Ok(Zeroizing::new(key_store.mnemonic().to_string()))
    }

    /// Re-encrypt the key store under a new password.
    ///
    /// An empty `new_password` removes encryption. Only the vault record
    /// changes.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> WalletResult<()> {
        let _queue = self.secret_queue.lock().await;

        let current = self.read_vault().clone();
        let key_store = current.open(old_password).await?;

        let encrypter = if new_password.is_empty() {
            Encrypter::no_encrypter()
        } else {
            self.ctx.encrypter.clone()
        };
        let vault = Vault::seal(encrypter, &key_store, new_password).await?;

        let id = self.id();
        self.ctx
            .storage
            .set(&keys::wallet_vault(&id), &vault.serialize()?)?;
        *self.vault.write().unwrap_or_else(PoisonError::into_inner) = vault;

        log::info!("Password changed for wallet {}", id);
        Ok(())
    }

    /// Persist `ledger` as this wallet's ledger record.
    pub(super) fn store_ledger(&self, ledger: &Ledger) -> WalletResult<()> {
        self.ctx
            .storage
            .set(&keys::wallet_ledger(&self.id()), &ledger.serialize()?)?;
        Ok(())
    }

    fn info(&self) -> RwLockReadGuard<'_, WalletInfo> {
        self.info.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_vault(&self) -> RwLockReadGuard<'_, Vault> {
        self.vault.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn read_ledger(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write_ledger(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("info", &*self.info())
            .finish_non_exhaustive()
    }
}
