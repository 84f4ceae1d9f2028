/// Wallet Core Module
///
/// - `info.rs` - wallet metadata record
/// - `vault.rs` - encrypted key store record
/// - `ledger.rs` - derived address record
/// - `context.rs` - injected collaborators
/// - `wallet_ops.rs` - wallet lifecycle operations
/// - `address_ops.rs` - address management
/// - `balance_ops.rs` - balance queries
/// - `manager.rs` - multi-wallet list

// Records
pub mod info;
pub mod ledger;
pub mod vault;

pub mod context;

// Operation modules
pub mod address_ops;
pub mod balance_ops;
pub mod wallet_ops;

// Wallet list
pub mod manager;

pub use context::WalletContext;
pub use info::{WalletId, WalletInfo};
pub use ledger::{AddressInfo, Ledger};
pub use manager::WalletManager;
pub use vault::{KeyStore, Vault};
pub use wallet_ops::Wallet;
