/// Balance queries
///
/// Fetches account balances through the context's account provider.

use super::wallet_ops::Wallet;
use crate::error::{WalletError, WalletResult};
use crate::network::Amount;

impl Wallet {
    /// Balance of `address`, or the network error that prevented fetching it.
    pub async fn get_address_balance(&self, address: &str) -> WalletResult<Amount> {
        let account = self.ctx.accounts.get_account(address).await?;
        account.balance.parse::<Amount>().map_err(|e| {
            WalletError::Network(format!("Invalid balance '{}': {}", account.balance, e))
        })
    }

    /// Balance of `address`, zero when it cannot be fetched.
    pub async fn get_address_balance_or_zero(&self, address: &str) -> Amount {
        match self.get_address_balance(address).await {
            Ok(amount) => amount,
            Err(e) => {
                log::warn!("Balance fetch failed for {}: {}", address, e);
                Amount::zero()
            }
        }
    }
}
