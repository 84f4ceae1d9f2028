/// Wallet configuration from environment variables
///
/// Controls the Pactus network, the node RPC endpoint, where wallet records
/// live on disk, and the Argon2id cost of new vaults.

use std::env;
use std::path::PathBuf;

use crate::crypto::encrypter::{DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM};
use crate::crypto::Encrypter;
use crate::network::NetworkType;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_WALLET_DIR: &str = "./wallets";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConfig {
    /// Network new wallets are created on
    pub network: NetworkType,
    /// Pactus node JSON-RPC endpoint
    pub rpc_url: String,
    /// Directory holding the wallet records
    pub storage_dir: PathBuf,
    pub kdf_iterations: u32,
    /// KiB
    pub kdf_memory: u32,
    pub kdf_parallelism: u32,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `PACTUS_NETWORK`: "mainnet" (default) or "testnet"
    /// - `PACTUS_RPC_URL`: node JSON-RPC endpoint
    /// - `PACTUS_WALLET_DIR`: record directory (default `./wallets`)
    /// - `PACTUS_KDF_ITERATIONS`, `PACTUS_KDF_MEMORY`, `PACTUS_KDF_PARALLELISM`:
    ///   Argon2id tunables for newly encrypted vaults
    ///
    /// # Examples
    ///
    /// ```bash
    /// PACTUS_NETWORK=testnet PACTUS_RPC_URL=http://localhost:8545 my-app
    /// ```
    pub fn from_env() -> Self {
        let network = match env::var("PACTUS_NETWORK")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "testnet" => {
                log::info!("Using TESTNET network");
                NetworkType::Testnet
            }
            "mainnet" | "" => {
                log::info!("Using MAINNET network");
                NetworkType::Mainnet
            }
            other => {
                log::warn!("Unknown network '{}', defaulting to Mainnet", other);
                NetworkType::Mainnet
            }
        };

        let rpc_url = env::var("PACTUS_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        log::info!("Node RPC URL: {}", rpc_url);

        let storage_dir = env::var("PACTUS_WALLET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_WALLET_DIR));
        log::info!("Wallet directory: {:?}", storage_dir);

        let config = Self {
            network,
            rpc_url,
            storage_dir,
            kdf_iterations: number_var("PACTUS_KDF_ITERATIONS", DEFAULT_ITERATIONS),
            kdf_memory: number_var("PACTUS_KDF_MEMORY", DEFAULT_MEMORY_KIB),
            kdf_parallelism: number_var("PACTUS_KDF_PARALLELISM", DEFAULT_PARALLELISM),
        };
        log::debug!(
            "KDF parameters: iterations={} memory={}KiB parallelism={}",
            config.kdf_iterations,
            config.kdf_memory,
            config.kdf_parallelism
        );
        config
    }

    /// Encrypter template for password-protected vaults.
    pub fn encrypter(&self) -> Encrypter {
        Encrypter::argon2id(self.kdf_iterations, self.kdf_memory, self.kdf_parallelism)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_WALLET_DIR),
            kdf_iterations: DEFAULT_ITERATIONS,
            kdf_memory: DEFAULT_MEMORY_KIB,
            kdf_parallelism: DEFAULT_PARALLELISM,
        }
    }
}

fn number_var(name: &str, default: u32) -> u32 {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => {
                log::warn!("Invalid {} '{}', using {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
