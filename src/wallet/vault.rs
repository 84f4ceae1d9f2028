use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::Encrypter;
use crate::error::{StorageError, WalletError, WalletResult};

#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct MasterNode {
    /// BIP39 mnemonic phrase
    pub seed: String,
}

/// Plaintext secret record stored (encrypted) inside a [`Vault`].
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyStore {
    pub master_node: MasterNode,
    pub imported_keys: Vec<String>,
}

impl KeyStore {
    pub fn new(mnemonic: &str) -> Self {
        Self {
            master_node: MasterNode {
                seed: mnemonic.to_string(),
            },
            imported_keys: Vec::new(),
        }
    }

    pub fn mnemonic(&self) -> &str {
        &self.master_node.seed
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("imported_keys", &self.imported_keys.len())
            .finish_non_exhaustive()
    }
}

/// Encrypter configuration plus the opaque key-store blob.
///
/// `key_store` is base64 ciphertext, or raw JSON when the encrypter is the
/// pass-through one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub encrypter: Encrypter,
    pub key_store: String,
}

impl Vault {
    /// Encrypt a key store under `password`.
    pub async fn seal(
        encrypter: Encrypter,
        key_store: &KeyStore,
        password: &str,
    ) -> WalletResult<Self> {
        let plain = zeroize::Zeroizing::new(serde_json::to_string(key_store)?);
        let key_store = encrypter.encrypt(&plain, password).await?;
        Ok(Self {
            encrypter,
            key_store,
        })
    }

    /// Decrypt the key store. The result must not outlive the calling operation.
    pub async fn open(&self, password: &str) -> WalletResult<KeyStore> {
        let plain = self.encrypter.decrypt(&self.key_store, password).await?;
        serde_json::from_str(&plain)
            .map_err(|e| WalletError::Storage(StorageError::Json(e)))
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypter.is_encrypted()
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

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_key_store_json_shape() {
        let json = serde_json::to_value(KeyStore::new(PHRASE)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "master_node": { "seed": PHRASE }, "imported_keys": [] })
        );
    }

    #[test]
    fn test_key_store_debug_hides_seed() {
        let printed = format!("{:?}", KeyStore::new(PHRASE));
        assert!(printed.starts_with("KeyStore"));
        assert!(!printed.contains("abandon"));
    }

    #[tokio::test]
    async fn test_unencrypted_vault_holds_raw_json() {
        let vault = Vault::seal(Encrypter::no_encrypter(), &KeyStore::new(PHRASE), "")
            .await
            .unwrap();
        assert!(!vault.is_encrypted());
        assert!(vault.key_store.contains(PHRASE));
        assert_eq!(vault.open("").await.unwrap().mnemonic(), PHRASE);
    }

    #[tokio::test]
    async fn test_encrypted_vault() {
        let vault = Vault::seal(Encrypter::argon2id(1, 64, 1), &KeyStore::new(PHRASE), "pw")
            .await
            .unwrap();
        assert!(vault.is_encrypted());
        assert!(!vault.key_store.contains("abandon"));
        assert_eq!(vault.open("pw").await.unwrap().mnemonic(), PHRASE);
        assert!(vault.open("nope").await.unwrap_err().is_invalid_password());
    }

    #[tokio::test]
    async fn test_serialize_round_trip() {
        let vault = Vault::seal(Encrypter::argon2id(1, 64, 1), &KeyStore::new(PHRASE), "pw")
            .await
            .unwrap();
        let json = vault.serialize().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["encrypter"]["method"], "ARGON2ID-AES_256_CTR-MACV1");
        assert_eq!(value["encrypter"]["params"]["iterations"], "1");
        assert_eq!(value["keyStore"], vault.key_store.as_str());

        assert_eq!(Vault::deserialize(&json).unwrap(), vault);
    }
}
