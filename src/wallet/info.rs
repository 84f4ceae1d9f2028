use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;
use crate::network::NetworkType;

pub type WalletId = Uuid;

/// Wallet type tag for HD wallets built from a mnemonic.
pub const WALLET_TYPE_HD: u8 = 1;

/// Per-wallet metadata. Always persisted whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    #[serde(rename = "type")]
    pub wallet_type: u8,
    pub name: String,
    pub uuid: WalletId,
    /// Unix milliseconds on the wire
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_time: DateTime<Utc>,
    pub network: NetworkType,
}

impl WalletInfo {
    pub fn new(name: &str, network: NetworkType) -> Self {
        Self {
            wallet_type: WALLET_TYPE_HD,
            name: name.to_string(),
            uuid: Uuid::new_v4(),
            creation_time: Utc::now().trunc_subsecs(3),
            network,
        }
    }

    pub fn serialize(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn deserialize(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let info = WalletInfo::new("Main", NetworkType::Testnet);
        let value: serde_json::Value = serde_json::from_str(&info.serialize().unwrap()).unwrap();

        assert_eq!(value["type"], 1);
        assert_eq!(value["name"], "Main");
        assert_eq!(value["uuid"], info.uuid.to_string());
        assert_eq!(value["creationTime"], info.creation_time.timestamp_millis());
        assert_eq!(value["network"], "Testnet");
    }

    #[test]
    fn test_round_trip() {
        let info = WalletInfo::new("Savings", NetworkType::Mainnet);
        let restored = WalletInfo::deserialize(&info.serialize().unwrap()).unwrap();
        assert_eq!(restored, info);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = WalletInfo::new("a", NetworkType::Mainnet);
        let b = WalletInfo::new("b", NetworkType::Mainnet);
        assert_ne!(a.uuid, b.uuid);
    }
}
