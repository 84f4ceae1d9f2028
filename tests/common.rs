//! Common test utilities for wallet integration tests
//!
//! This module provides shared test infrastructure including:
//! - Logger initialisation
//! - A context builder with a low-cost encrypter
//! - A scripted account provider
//! - A storage wrapper that fails on demand

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pactus_wallet::{
    AccountInfo, AccountProvider, Encrypter, MemoryStorage, Storage, StorageError, WalletContext,
    WalletError, WalletResult,
};

pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon cactus";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Argon2id with minimal cost so tests stay fast.
pub fn cheap_encrypter() -> Encrypter {
    Encrypter::argon2id(1, 64, 1)
}

pub fn test_context(storage: Arc<dyn Storage>) -> WalletContext {
    init_logger();
    WalletContext::new(storage, Arc::new(MockAccounts::default())).with_encrypter(cheap_encrypter())
}

pub fn memory_context() -> (Arc<MemoryStorage>, WalletContext) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = test_context(storage.clone());
    (storage, ctx)
}

/// Account provider answering from a fixed table.
#[derive(Debug, Default)]
pub struct MockAccounts {
    pub balances: HashMap<String, String>,
    pub offline: bool,
}

impl MockAccounts {
    pub fn with_balance(address: &str, balance: &str) -> Self {
        let mut balances = HashMap::new();
        balances.insert(address.to_string(), balance.to_string());
        Self {
            balances,
            offline: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            balances: HashMap::new(),
            offline: true,
        }
    }
}

#[async_trait]
impl AccountProvider for MockAccounts {
    async fn get_account(&self, address: &str) -> WalletResult<AccountInfo> {
        if self.offline {
            return Err(WalletError::Network("node unreachable".to_string()));
        }
        match self.balances.get(address) {
            Some(balance) => Ok(AccountInfo {
                balance: balance.clone(),
            }),
            None => Err(WalletError::Network(format!("account not found: {}", address))),
        }
    }
}

/// Memory storage that can be told to fail ledger writes or vault deletes.
///
/// Batches go through the default sequential `apply`, so a failure can
/// leave a batch half applied.
#[derive(Debug, Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    pub fail_ledger_writes: AtomicBool,
    pub fail_vault_deletes: AtomicBool,
}

impl FlakyStorage {
    pub fn set_fail_ledger_writes(&self, fail: bool) {
        self.fail_ledger_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_vault_deletes(&self, fail: bool) {
        self.fail_vault_deletes.store(fail, Ordering::SeqCst);
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key.ends_with(".ledger:v1") && self.fail_ledger_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<Option<String>, StorageError> {
        if key.ends_with(".vault:v1") && self.fail_vault_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("device busy".to_string()));
        }
        self.inner.delete(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear()
    }
}
