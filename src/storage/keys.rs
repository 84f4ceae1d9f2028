//! Storage key naming scheme
//!
//! These strings are shared with wallets persisted by earlier releases and
//! must not change.

use uuid::Uuid;

pub const WALLET_LIST: &str = "pactus.wallet.list:v1";

pub fn wallet_info(id: &Uuid) -> String {
    format!("pactus.wallet.{}.info:v1", id)
}

pub fn wallet_vault(id: &Uuid) -> String {
    format!("pactus.wallet.{}.vault:v1", id)
}

pub fn wallet_ledger(id: &Uuid) -> String {
    format!("pactus.wallet.{}.ledger:v1", id)
}

/// All per-wallet record keys, in info / vault / ledger order.
pub fn wallet_records(id: &Uuid) -> [String; 3] {
    [wallet_info(id), wallet_vault(id), wallet_ledger(id)]
}
