//! Ed25519 key derivation (SLIP-0010)
//!
//! Master: `I = HMAC-SHA512("ed25519 seed", seed)`.
//! Child:  `I = HMAC-SHA512(chain_code, 0x00 || key || ser32(index | 2^31))`.
//! Only hardened children exist for Ed25519, so every path segment must end
//! with `'` (or `h`).

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use super::address::account_address;
use super::{KeyDeriver, PrivateKey};
use crate::error::{WalletError, WalletResult};
use crate::network::NetworkType;

type HmacSha512 = Hmac<Sha512>;

const MASTER_SECRET: &[u8] = b"ed25519 seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Default HD-key collaborator: BIP39 seed (empty passphrase) + SLIP-0010.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slip10Deriver;

impl Slip10Deriver {
    pub fn new() -> Self {
        Self
    }
}

impl KeyDeriver for Slip10Deriver {
    fn derive_private_key(&self, mnemonic: &str, path: &str) -> WalletResult<PrivateKey> {
        let mnemonic =
            Mnemonic::parse(mnemonic).map_err(|e| WalletError::Mnemonic(e.to_string()))?;
        let seed = Zeroizing::new(mnemonic.to_seed(""));
        let secret = derive(&seed[..], path)?;
        Ok(PrivateKey::from_bytes(*secret))
    }

    fn derive_address(&self, key: &PrivateKey, network: NetworkType) -> WalletResult<String> {
        account_address(&key.public_key(), network)
    }
}

/// Derive the 32-byte Ed25519 secret at `path` from a BIP39 seed.
pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
    let indices = parse_path(path)?;

    let (mut key, mut chain_code) = split(hmac_sha512(MASTER_SECRET, &[seed])?);

    for index in indices {
        let data_index = (index | HARDENED_OFFSET).to_be_bytes();
        let (child_key, child_chain) =
            split(hmac_sha512(&chain_code, &[&[0x00u8][..], &key[..], &data_index[..]])?);
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    chain_code.zeroize();
    Ok(Zeroizing::new(key))
}

/// Parse `m/44'/21888'/3'/0'` into unhardened indices `[44, 21888, 3, 0]`.
pub fn parse_path(path: &str) -> WalletResult<Vec<u32>> {
    let invalid = |reason: String| WalletError::KeyDerivation(reason);

    let segments = path
        .trim()
        .strip_prefix("m/")
        .ok_or_else(|| invalid(format!("Path must start with 'm/': {}", path)))?;

    segments
        .split('/')
        .map(|segment| {
            let number = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    invalid(format!(
                        "Ed25519 derivation requires hardened segments: '{}'",
                        segment
                    ))
                })?;
            let index: u32 = number
                .parse()
                .map_err(|e| invalid(format!("Invalid index '{}': {}", number, e)))?;
            if index >= HARDENED_OFFSET {
                return Err(invalid(format!("Index out of range: {}", index)));
            }
            Ok(index)
        })
        .collect()
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::KeyDerivation(format!("HMAC init failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split(buf: Zeroizing<[u8; 64]>) -> ([u8; 32], [u8; 32]) {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&buf[..32]);
    chain_code.copy_from_slice(&buf[32..]);
    (key, chain_code)
}
