//! Chain network parameters and the account query seam
//!
//! - `amount.rs` - NanoPAC amounts
//! - `rpc.rs` - JSON-RPC client implementing [`AccountProvider`]

pub mod amount;
pub mod rpc;

pub use amount::Amount;
pub use rpc::RpcClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NetworkType {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkType {
    /// BIP44 coin type registered for the network
    pub fn coin_type(self) -> u32 {
        match self {
            NetworkType::Mainnet => 21888,
            NetworkType::Testnet => 21777,
        }
    }

    pub fn address_hrp(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "pc",
            NetworkType::Testnet => "tpc",
        }
    }

    pub fn public_key_hrp(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "public",
            NetworkType::Testnet => "tpublic",
        }
    }

    pub fn is_testnet(self) -> bool {
        self == NetworkType::Testnet
    }
}

/// Account state as reported by a node; `balance` is an integer string in NanoPAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub balance: String,
}

/// Network collaborator used for balance queries.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn get_account(&self, address: &str) -> WalletResult<AccountInfo>;
}
