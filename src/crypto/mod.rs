//! Vault encryption
//!
//! - `params.rs` - typed string map for algorithm tunables
//! - `encrypter.rs` - Argon2id / AES-256-CTR / MACv1 password encryption

pub mod encrypter;
pub mod params;

pub use encrypter::{Encrypter, METHOD_DEFAULT};
pub use params::Params;
