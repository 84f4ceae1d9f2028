/// Address management operations
///
/// Handles address derivation and queries.

use std::sync::Arc;

use zeroize::Zeroizing;

use super::ledger::AddressInfo;
use super::wallet_ops::Wallet;
use crate::error::{WalletError, WalletResult};
use crate::keys::address::public_key_string;
use crate::network::NetworkType;

impl Wallet {
    /// Derive the next Ed25519 account address and record it in the ledger.
    ///
    /// Concurrent calls on one wallet are queued, so each one gets its own
    /// index. If the ledger cannot be persisted the in-memory ledger is left
    /// as it was and the storage error is returned.
    pub async fn create_address(&self, label: &str, password: &str) -> WalletResult<AddressInfo> {
        let _queue = self.secret_queue.lock().await;

        let (index, path) = {
            let ledger = self.read_ledger();
            (ledger.next_index(), ledger.next_path())
        };
        let network = self.network_type();

        let mnemonic = self.get_mnemonic(password).await?;
        let (address, public_key) = self.derive_account(mnemonic, path.clone(), network).await?;

        let info = AddressInfo {
            address: address.clone(),
            public_key,
            label: label.to_string(),
            path,
        };

        let mut ledger = self.write_ledger();
        if ledger.addresses.contains_key(&address) {
            return Err(WalletError::KeyDerivation(format!(
                "Address {} already recorded at another index",
                address
            )));
        }
        ledger.addresses.insert(address.clone(), info.clone());
        ledger.purposes.purpose_bip44.next_ed25519_index = index + 1;

        if let Err(e) = self.store_ledger(&ledger) {
            ledger.addresses.remove(&address);
            ledger.purposes.purpose_bip44.next_ed25519_index = index;
            log::warn!("Failed to persist ledger, address {} discarded: {}", address, e);
            return Err(e);
        }

        log::info!("Created address {} at {}", address, info.path);
        Ok(info)
    }

    /// Seed stretching and SLIP-0010 run on the blocking pool.
    async fn derive_account(
        &self,
        mnemonic: Zeroizing<String>,
        path: String,
        network: NetworkType,
    ) -> WalletResult<(String, String)> {
        let deriver = Arc::clone(&self.ctx.deriver);
        tokio::task::spawn_blocking(move || {
            let key = deriver.derive_private_key(&mnemonic, &path)?;
            let address = deriver.derive_address(&key, network)?;
            let public_key = public_key_string(&key.public_key(), network)?;
            Ok::<_, WalletError>((address, public_key))
        })
        .await
        .map_err(|e| WalletError::KeyDerivation(format!("Derivation task failed: {}", e)))?
    }

    /// All addresses, ordered by derivation index.
    pub fn get_addresses(&self) -> Vec<AddressInfo> {
        self.read_ledger().sorted_addresses()
    }

    pub fn get_address_info(&self, address: &str) -> Option<AddressInfo> {
        self.read_ledger().addresses.get(address).cloned()
    }

    /// Set a new label on a recorded address. Returns `false` if the wallet
    /// does not own `address`.
    pub fn set_address_label(&self, address: &str, label: &str) -> WalletResult<bool> {
        let mut ledger = self.write_ledger();
        let Some(entry) = ledger.addresses.get_mut(address) else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut entry.label, label.to_string());

        if let Err(e) = self.store_ledger(&ledger) {
            if let Some(entry) = ledger.addresses.get_mut(address) {
                entry.label = previous;
            }
            return Err(e);
        }
        Ok(true)
    }
}
