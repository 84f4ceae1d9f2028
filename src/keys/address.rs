//! Typed Bech32m encoding
//!
//! Pactus strings carry a leading 5-bit "type" word before the base32 data:
//! `bech32m(hrp, [type] ++ to_words(bytes))`.
//!
//! - account address: type 3, bytes = RIPEMD160(BLAKE2b-256(public_key))
//! - public key: type 3 (Ed25519), bytes = raw 32-byte public key

use bech32::{u5, FromBase32, ToBase32, Variant};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ripemd::Ripemd160;

use crate::error::{WalletError, WalletResult};
use crate::network::NetworkType;

pub const ADDRESS_TYPE_ED25519_ACCOUNT: u8 = 3;
pub const SIGNATURE_TYPE_ED25519: u8 = 3;

pub fn encode_typed(hrp: &str, kind: u8, data: &[u8]) -> WalletResult<String> {
    let mut words = vec![u5::try_from_u8(kind)
        .map_err(|e| WalletError::KeyDerivation(format!("Invalid type word {}: {}", kind, e)))?];
    words.extend(data.to_base32());
    bech32::encode(hrp, words, Variant::Bech32m)
        .map_err(|e| WalletError::KeyDerivation(format!("Bech32m encoding failed: {}", e)))
}

/// Decode a typed Bech32m string into `(hrp, type, bytes)`.
pub fn decode_typed(encoded: &str) -> WalletResult<(String, u8, Vec<u8>)> {
    let invalid = |reason: String| WalletError::KeyDerivation(reason);

    let (hrp, words, variant) =
        bech32::decode(encoded).map_err(|e| invalid(format!("Invalid bech32 string: {}", e)))?;
    if variant != Variant::Bech32m {
        return Err(invalid(format!("Not a bech32m string: {}", encoded)));
    }
    let (kind, rest) = words
        .split_first()
        .ok_or_else(|| invalid(format!("Missing type word: {}", encoded)))?;
    let data = Vec::<u8>::from_base32(rest)
        .map_err(|e| invalid(format!("Invalid data words: {}", e)))?;

    Ok((hrp, kind.to_u8(), data))
}

/// Pactus Ed25519 account address for a public key.
pub fn account_address(public_key: &[u8; 32], network: NetworkType) -> WalletResult<String> {
    let hash256 = Blake2b::<U32>::digest(public_key);
    let hash160 = Ripemd160::digest(hash256);
    encode_typed(
        network.address_hrp(),
        ADDRESS_TYPE_ED25519_ACCOUNT,
        &hash160,
    )
}

/// Human-readable Ed25519 public key (`public1r...` / `tpublic1r...`).
pub fn public_key_string(public_key: &[u8; 32], network: NetworkType) -> WalletResult<String> {
    encode_typed(network.public_key_hrp(), SIGNATURE_TYPE_ED25519, public_key)
}
