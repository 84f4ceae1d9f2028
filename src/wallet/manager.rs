use std::sync::{PoisonError, RwLock};

use super::context::WalletContext;
use super::info::WalletId;
use super::wallet_ops::Wallet;
use crate::error::{WalletError, WalletResult};
use crate::keys::MnemonicStrength;
use crate::network::NetworkType;
use crate::storage::{keys, StorageOp};

/// Keeps the persisted list of wallet IDs and builds wallets on demand.
///
/// Wallets are not cached: every [`load_wallet`](Self::load_wallet) reads
/// the records again.
pub struct WalletManager {
    ctx: WalletContext,
    wallet_ids: RwLock<Vec<WalletId>>,
}

impl WalletManager {
    /// Load the wallet list; an absent list is empty.
    pub fn new(ctx: WalletContext) -> WalletResult<Self> {
        let wallet_ids = read_list(&ctx)?;
        log::debug!("Wallet manager started with {} wallets", wallet_ids.len());
        Ok(Self {
            ctx,
            wallet_ids: RwLock::new(wallet_ids),
        })
    }

    pub async fn create_wallet(
        &self,
        password: &str,
        strength: MnemonicStrength,
        network: NetworkType,
        name: &str,
    ) -> WalletResult<Wallet> {
        let wallet = Wallet::create(&self.ctx, password, strength, network, name).await?;
        self.update_list(&wallet)?;
        Ok(wallet)
    }

    pub async fn restore_wallet(
        &self,
        mnemonic: &str,
        password: &str,
        network: NetworkType,
        name: &str,
    ) -> WalletResult<Wallet> {
        let wallet = Wallet::restore(&self.ctx, mnemonic, password, network, name).await?;
        self.update_list(&wallet)?;
        Ok(wallet)
    }

    pub fn load_wallet(&self, id: &WalletId) -> WalletResult<Wallet> {
        Wallet::load(&self.ctx, id)
    }

    /// Load the first listed wallet.
    pub fn load_first_wallet(&self) -> WalletResult<Wallet> {
        let first = self.ids().first().copied();
        match first {
            Some(id) => self.load_wallet(&id),
            None => Err(WalletError::WalletNotFound("no wallets stored".to_string())),
        }
    }

    /// Add the wallet to the persisted list unless it is already there.
    pub fn update_list(&self, wallet: &Wallet) -> WalletResult<()> {
        let id = wallet.id();
        let mut ids = self.wallet_ids.write().unwrap_or_else(PoisonError::into_inner);
        if ids.contains(&id) {
            return Ok(());
        }

        let mut updated = ids.clone();
        updated.push(id);
        self.ctx
            .storage
            .set(keys::WALLET_LIST, &serde_json::to_string(&updated)?)?;
        *ids = updated;
        Ok(())
    }

    /// Remove a wallet from the list and delete its records.
    ///
    /// Returns whether the wallet was listed. Records of an unlisted ID are
    /// still removed, so a delete interrupted by a storage failure can be
    /// finished by calling this again.
    pub fn delete_wallet(&self, id: &WalletId) -> WalletResult<bool> {
        let mut ids = self.wallet_ids.write().unwrap_or_else(PoisonError::into_inner);
        let listed = ids.contains(id);
        let records = keys::wallet_records(id);

        let mut ops = Vec::with_capacity(records.len() + 1);
        let remaining: Vec<WalletId> = ids.iter().filter(|w| *w != id).copied().collect();
        if listed {
            ops.push(StorageOp::set(keys::WALLET_LIST, serde_json::to_string(&remaining)?));
        } else {
            let mut leftover = false;
            for key in &records {
                leftover |= self.ctx.storage.has(key)?;
            }
            if !leftover {
                return Ok(false);
            }
            log::warn!("Removing leftover records of unlisted wallet {}", id);
        }
        ops.extend(records.into_iter().map(StorageOp::delete));

        if let Err(e) = self.ctx.storage.apply(ops) {
            // The batch may have been applied partially; follow the stored list.
            match read_list(&self.ctx) {
                Ok(stored) => *ids = stored,
                Err(reload) => log::warn!("Could not reload wallet list: {}", reload),
            }
            return Err(e.into());
        }

        if listed {
            *ids = remaining;
            log::info!("Deleted wallet {}", id);
        }
        Ok(listed)
    }

    pub fn has_wallet(&self, id: &WalletId) -> bool {
        self.ids().contains(id)
    }

    pub fn get_wallet_ids(&self) -> Vec<WalletId> {
        self.ids().clone()
    }

    pub fn empty(&self) -> bool {
        self.ids().is_empty()
    }

    fn ids(&self) -> std::sync::RwLockReadGuard<'_, Vec<WalletId>> {
        self.wallet_ids.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_list(ctx: &WalletContext) -> WalletResult<Vec<WalletId>> {
    match ctx.storage.get(keys::WALLET_LIST)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
