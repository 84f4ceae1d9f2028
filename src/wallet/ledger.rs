use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::network::NetworkType;

/// BIP44 purpose used for every derived address.
pub const PURPOSE_BIP44: u32 = 44;

/// Build the derivation path for an Ed25519 account address.
pub fn ed25519_path(coin_type: u32, index: u32) -> String {
    format!(
        "m/{}'/{}'/{}'/{}'",
        PURPOSE_BIP44,
        coin_type,
        crate::keys::address::ADDRESS_TYPE_ED25519_ACCOUNT,
        index
    )
}

/// Trailing index of a path built by [`ed25519_path`].
pub fn path_index(path: &str) -> Option<u32> {
    path.rsplit('/')
        .next()?
        .trim_end_matches(['\'', 'h'])
        .parse()
        .ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub address: String,
    pub public_key: String,
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurposeBip44 {
    pub next_ed25519_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purposes {
    #[serde(rename = "purposeBIP44")]
    pub purpose_bip44: PurposeBip44,
}

/// Per-wallet record of derived addresses and the next free index.
///
/// Plain data: the owning wallet mutates fields directly and persists the
/// whole record after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub coin_type: u32,
    pub purposes: Purposes,
    pub addresses: BTreeMap<String, AddressInfo>,
}

impl Ledger {
    pub fn new(network: NetworkType) -> Self {
        Self {
            coin_type: network.coin_type(),
            purposes: Purposes::default(),
            addresses: BTreeMap::new(),
        }
    }

    pub fn next_index(&self) -> u32 {
        self.purposes.purpose_bip44.next_ed25519_index
    }

    /// Path the next created address will use.
    pub fn next_path(&self) -> String {
        ed25519_path(self.coin_type, self.next_index())
    }

    /// Addresses ordered by derivation index.
    pub fn sorted_addresses(&self) -> Vec<AddressInfo> {
        let mut list: Vec<AddressInfo> = self.addresses.values().cloned().collect();
        list.sort_by(|a, b| compare_paths(&a.path, &b.path));
        list
    }

    pub fn serialize(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn deserialize(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn compare_paths(a: &str, b: &str) -> Ordering {
    match (path_index(a), path_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: u32) -> AddressInfo {
        AddressInfo {
            address: format!("pc1r{}", index),
            public_key: format!("public1r{}", index),
            label: format!("Address {}", index),
            path: ed25519_path(21888, index),
        }
    }

    #[test]
    fn test_new_ledger() {
        let ledger = Ledger::new(NetworkType::Testnet);
        assert_eq!(ledger.coin_type, 21777);
        assert_eq!(ledger.next_index(), 0);
        assert_eq!(ledger.next_path(), "m/44'/21777'/3'/0'");
        assert!(ledger.addresses.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let mut ledger = Ledger::new(NetworkType::Mainnet);
        let info = entry(0);
        ledger.addresses.insert(info.address.clone(), info);
        ledger.purposes.purpose_bip44.next_ed25519_index = 1;

        let value: serde_json::Value = serde_json::from_str(&ledger.serialize().unwrap()).unwrap();
        assert_eq!(value["coinType"], 21888);
        assert_eq!(value["purposes"]["purposeBIP44"]["nextEd25519Index"], 1);

        let stored = &value["addresses"]["pc1r0"];
        assert_eq!(stored["address"], "pc1r0");
        assert_eq!(stored["publicKey"], "public1r0");
        assert_eq!(stored["label"], "Address 0");
        assert_eq!(stored["path"], "m/44'/21888'/3'/0'");

        assert_eq!(Ledger::deserialize(&ledger.serialize().unwrap()).unwrap(), ledger);
    }

    #[test]
    fn test_sorted_by_numeric_index() {
        let mut ledger = Ledger::new(NetworkType::Mainnet);
        for index in [10, 2, 9, 0, 1] {
            let info = entry(index);
            ledger.addresses.insert(info.address.clone(), info);
        }

        let paths: Vec<String> = ledger.sorted_addresses().into_iter().map(|a| a.path).collect();
        assert_eq!(
            paths,
            vec![
                "m/44'/21888'/3'/0'",
                "m/44'/21888'/3'/1'",
                "m/44'/21888'/3'/2'",
                "m/44'/21888'/3'/9'",
                "m/44'/21888'/3'/10'",
            ]
        );
    }

    #[test]
    fn test_path_index() {
        assert_eq!(path_index("m/44'/21888'/3'/17'"), Some(17));
        assert_eq!(path_index("m/44h/21888h/3h/4h"), Some(4));
        assert_eq!(path_index("garbage"), None);
    }
}
