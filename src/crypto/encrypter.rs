//! Password-based authenticated encryption
//!
//! A non-empty method is a `<KDF>-<CIPHER>-<MAC>` triple. The only supported
//! triple is `ARGON2ID-AES_256_CTR-MACV1`, producing
//! `base64(salt[16] || ciphertext || mac[4])` where
//! `mac = SHA256(cipher_key[16..32] || ciphertext)[..4]`.
//!
//! The MAC doubles as the password check: a wrong password yields a different
//! cipher key and therefore a MAC mismatch. There is no stored password hash.

use aes::Aes256;
use argon2::{Algorithm, Argon2, Version};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ctr::cipher::{KeyIvInit, StreamCipher};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::params::Params;
use crate::error::{CryptoError, ParamsError};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

pub const METHOD_DEFAULT: &str = "ARGON2ID-AES_256_CTR-MACV1";

pub const PARAM_ITERATIONS: &str = "iterations";
pub const PARAM_MEMORY: &str = "memory";
pub const PARAM_PARALLELISM: &str = "parallelism";
pub const PARAM_KEY_LEN: &str = "keylen";

pub const DEFAULT_ITERATIONS: u32 = 3;
pub const DEFAULT_MEMORY_KIB: u32 = 65536;
pub const DEFAULT_PARALLELISM: u32 = 4;
pub const DEFAULT_KEY_LEN: u32 = 48;

const SALT_LEN: usize = 16;
const MAC_LEN: usize = 4;
const CIPHER_KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kdf {
    Argon2id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cipher {
    Aes256Ctr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mac {
    V1,
}

/// The three algorithm components of a method string.
#[derive(Debug, Clone, Copy)]
struct Suite {
    kdf: Kdf,
    cipher: Cipher,
    mac: Mac,
}

impl Suite {
    fn parse(method: &str) -> Result<Self, CryptoError> {
        let unsupported = || CryptoError::MethodNotSupported(method.to_string());

        let parts: Vec<&str> = method.split('-').collect();
        let [kdf, cipher, mac] = parts.as_slice() else {
            return Err(unsupported());
        };

        let kdf = match *kdf {
            "ARGON2ID" => Kdf::Argon2id,
            _ => return Err(unsupported()),
        };
        let cipher = match *cipher {
            "AES_256_CTR" => Cipher::Aes256Ctr,
            _ => return Err(unsupported()),
        };
        let mac = match *mac {
            "MACV1" => Mac::V1,
            _ => return Err(unsupported()),
        };

        Ok(Self { kdf, cipher, mac })
    }
}

/// KDF tunables resolved from [`Params`], defaults filled in for absent keys.
#[derive(Debug, Clone, Copy)]
struct KdfSettings {
    iterations: u32,
    memory: u32,
    parallelism: u32,
    key_len: u32,
}

impl KdfSettings {
    fn from_params(params: &Params) -> Result<Self, ParamsError> {
        Ok(Self {
            iterations: number_or(params, PARAM_ITERATIONS, DEFAULT_ITERATIONS)?,
            memory: number_or(params, PARAM_MEMORY, DEFAULT_MEMORY_KIB)?,
            parallelism: number_or(params, PARAM_PARALLELISM, DEFAULT_PARALLELISM)?,
            key_len: number_or(params, PARAM_KEY_LEN, DEFAULT_KEY_LEN)?,
        })
    }
}

fn number_or(params: &Params, key: &str, default: u32) -> Result<u32, ParamsError> {
    match params.get_number(key) {
        Err(ParamsError::KeyNotFound(_)) => Ok(default),
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encrypter {
    method: String,
    params: Params,
}

impl Encrypter {
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Pass-through encrypter: only the empty password is accepted.
    pub fn no_encrypter() -> Self {
        Self::new("", Params::new())
    }

    pub fn default_encrypter() -> Self {
        Self::argon2id(DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM)
    }

    /// Default method with custom Argon2id cost (`memory` in KiB).
    pub fn argon2id(iterations: u32, memory: u32, parallelism: u32) -> Self {
        let mut params = Params::new();
        params.set_number(PARAM_ITERATIONS, iterations);
        params.set_number(PARAM_MEMORY, memory);
        params.set_number(PARAM_PARALLELISM, parallelism);
        params.set_number(PARAM_KEY_LEN, DEFAULT_KEY_LEN);
        Self::new(METHOD_DEFAULT, params)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn is_encrypted(&self) -> bool {
        !self.method.is_empty()
    }

    pub async fn encrypt(&self, message: &str, password: &str) -> Result<String, CryptoError> {
        if !self.is_encrypted() {
            return if password.is_empty() {
                Ok(message.to_string())
            } else {
                Err(CryptoError::InvalidPassword)
            };
        }
        if password.is_empty() {
            return Err(CryptoError::InvalidPassword);
        }

        let suite = Suite::parse(&self.method)?;
        let settings = KdfSettings::from_params(&self.params)?;
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let message = Zeroizing::new(message.as_bytes().to_vec());

        log::debug!(
            "Encrypting with {} (t={}, m={} KiB, p={})",
            self.method,
            settings.iterations,
            settings.memory,
            settings.parallelism
        );

        tokio::task::spawn_blocking(move || seal(suite, settings, &password, &message))
            .await
            .map_err(|e| CryptoError::Kdf(e.to_string()))?
    }

    pub async fn decrypt(
        &self,
        ciphertext: &str,
        password: &str,
    ) -> Result<Zeroizing<String>, CryptoError> {
        if !self.is_encrypted() {
            return if password.is_empty() {
                Ok(Zeroizing::new(ciphertext.to_string()))
            } else {
                Err(CryptoError::InvalidPassword)
            };
        }
        if password.is_empty() {
            return Err(CryptoError::InvalidPassword);
        }

        let suite = Suite::parse(&self.method)?;
        let settings = KdfSettings::from_params(&self.params)?;
        let data = STANDARD
            .decode(ciphertext)
            .map_err(|_| CryptoError::InvalidCipher)?;
        if data.len() < SALT_LEN + MAC_LEN {
            return Err(CryptoError::InvalidCipher);
        }
        let password = Zeroizing::new(password.as_bytes().to_vec());

        tokio::task::spawn_blocking(move || open(suite, settings, &password, &data))
            .await
            .map_err(|e| CryptoError::Kdf(e.to_string()))?
    }
}

fn seal(
    suite: Suite,
    settings: KdfSettings,
    password: &[u8],
    message: &[u8],
) -> Result<String, CryptoError> {
    let salt = rand::random::<[u8; SALT_LEN]>();
    let derived = derive_key(suite.kdf, settings, password, &salt)?;
    let (cipher_key, iv) = derived.split_at(CIPHER_KEY_LEN);

    let mut ciphertext = message.to_vec();
    apply_cipher(suite.cipher, cipher_key, iv, &mut ciphertext)?;
    let mac = compute_mac(suite.mac, cipher_key, &ciphertext);

    let mut out = Vec::with_capacity(SALT_LEN + ciphertext.len() + MAC_LEN);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&ciphertext);
    out.extend_from_slice(&mac);
    Ok(STANDARD.encode(out))
}

fn open(
    suite: Suite,
    settings: KdfSettings,
    password: &[u8],
    data: &[u8],
) -> Result<Zeroizing<String>, CryptoError> {
    let (salt, rest) = data.split_at(SALT_LEN);
    let (ciphertext, mac) = rest.split_at(rest.len() - MAC_LEN);

    let derived = derive_key(suite.kdf, settings, password, salt)?;
    let (cipher_key, iv) = derived.split_at(CIPHER_KEY_LEN);

    if compute_mac(suite.mac, cipher_key, ciphertext) != mac {
        return Err(CryptoError::InvalidPassword);
    }

    let mut plain = Zeroizing::new(ciphertext.to_vec());
    apply_cipher(suite.cipher, cipher_key, iv, &mut plain)?;
    let text = std::str::from_utf8(&plain).map_err(|_| CryptoError::InvalidCipher)?;
    Ok(Zeroizing::new(text.to_string()))
}

fn derive_key(
    kdf: Kdf,
    settings: KdfSettings,
    password: &[u8],
    salt: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if settings.key_len as usize != CIPHER_KEY_LEN + IV_LEN {
        return Err(CryptoError::Params(ParamsError::InvalidValue {
            key: PARAM_KEY_LEN.to_string(),
            reason: format!("expected {}", CIPHER_KEY_LEN + IV_LEN),
        }));
    }

    match kdf {
        Kdf::Argon2id => {
            let params = argon2::Params::new(
                settings.memory,
                settings.iterations,
                settings.parallelism,
                Some(settings.key_len as usize),
            )
            .map_err(|e| CryptoError::Kdf(e.to_string()))?;

            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            let mut out = Zeroizing::new(vec![0u8; settings.key_len as usize]);
            argon2
                .hash_password_into(password, salt, &mut out)
                .map_err(|e| CryptoError::Kdf(e.to_string()))?;
            Ok(out)
        }
    }
}

fn apply_cipher(cipher: Cipher, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), CryptoError> {
    match cipher {
        Cipher::Aes256Ctr => {
            let mut ctr = Aes256Ctr::new_from_slices(key, iv)
                .map_err(|e| CryptoError::Kdf(e.to_string()))?;
            ctr.apply_keystream(buf);
            Ok(())
        }
    }
}

fn compute_mac(mac: Mac, cipher_key: &[u8], ciphertext: &[u8]) -> [u8; MAC_LEN] {
    match mac {
        Mac::V1 => {
            let mut hasher = Sha256::new();
            hasher.update(&cipher_key[16..32]);
            hasher.update(ciphertext);
            let digest = hasher.finalize();

            let mut out = [0u8; MAC_LEN];
            out.copy_from_slice(&digest[..MAC_LEN]);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Encrypter {
        Encrypter::argon2id(1, 64, 1)
    }

    #[tokio::test]
    async fn test_round_trip() {
        let enc = cheap();
        let cipher = enc.encrypt("foo", "secret").await.unwrap();
        assert_ne!(cipher, "foo");
        assert_eq!(*enc.decrypt(&cipher, "secret").await.unwrap(), "foo");
    }

    #[tokio::test]
    async fn test_round_trip_empty_message() {
        let enc = cheap();
        let cipher = enc.encrypt("", "secret").await.unwrap();
        assert_eq!(STANDARD.decode(&cipher).unwrap().len(), SALT_LEN + MAC_LEN);
        assert_eq!(*enc.decrypt(&cipher, "secret").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let enc = cheap();
        let cipher = enc.encrypt("foo", "secret").await.unwrap();
        assert!(matches!(
            enc.decrypt(&cipher, "other").await,
            Err(CryptoError::InvalidPassword)
        ));
    }

    #[tokio::test]
    async fn test_salt_is_random() {
        let enc = cheap();
        let a = enc.encrypt("foo", "secret").await.unwrap();
        let b = enc.encrypt("foo", "secret").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_no_encrypter_passes_through() {
        let enc = Encrypter::no_encrypter();
        assert!(!enc.is_encrypted());
        assert_eq!(enc.encrypt("foo", "").await.unwrap(), "foo");
        assert_eq!(*enc.decrypt("foo", "").await.unwrap(), "foo");
    }

    #[tokio::test]
    async fn test_no_encrypter_rejects_password() {
        let enc = Encrypter::no_encrypter();
        assert!(matches!(
            enc.encrypt("foo", "secret").await,
            Err(CryptoError::InvalidPassword)
        ));
        assert!(matches!(
            enc.decrypt("foo", "secret").await,
            Err(CryptoError::InvalidPassword)
        ));
    }

    #[tokio::test]
    async fn test_empty_password_rejected_when_encrypted() {
        let enc = cheap();
        assert!(matches!(enc.encrypt("foo", "").await, Err(CryptoError::InvalidPassword)));
        assert!(matches!(enc.decrypt("Zm9v", "").await, Err(CryptoError::InvalidPassword)));
    }

    #[tokio::test]
    async fn test_unsupported_methods() {
        for method in [
            "ARGON2ID",
            "ARGON2ID-AES_256_CTR",
            "ARGON2ID-AES_256_CTR-MACV1-EXTRA",
            "SCRYPT-AES_256_CTR-MACV1",
            "ARGON2ID-AES_128_CBC-MACV1",
            "ARGON2ID-AES_256_CTR-MACV2",
        ] {
            let enc = Encrypter::new(method, cheap().params().clone());
            assert!(
                matches!(enc.encrypt("foo", "pw").await, Err(CryptoError::MethodNotSupported(_))),
                "encrypt accepted {method}"
            );
            assert!(
                matches!(enc.decrypt("Zm9v", "pw").await, Err(CryptoError::MethodNotSupported(_))),
                "decrypt accepted {method}"
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_cipher() {
        let enc = cheap();
        assert!(matches!(enc.decrypt("", "pw").await, Err(CryptoError::InvalidCipher)));
        assert!(matches!(
            enc.decrypt("not-base64!!", "pw").await,
            Err(CryptoError::InvalidCipher)
        ));
        // 19 bytes: one short of salt + mac
        let short = STANDARD.encode([0u8; SALT_LEN + MAC_LEN - 1]);
        assert!(matches!(enc.decrypt(&short, "pw").await, Err(CryptoError::InvalidCipher)));
    }

    #[tokio::test]
    async fn test_tampered_ciphertext_fails_mac() {
        let enc = cheap();
        let cipher = enc.encrypt("hello world", "secret").await.unwrap();
        let mut raw = STANDARD.decode(&cipher).unwrap();
        raw[SALT_LEN] ^= 0x01;
        let tampered = STANDARD.encode(raw);
        assert!(matches!(
            enc.decrypt(&tampered, "secret").await,
            Err(CryptoError::InvalidPassword)
        ));
    }

    #[tokio::test]
    async fn test_wire_layout() {
        let enc = cheap();
        let message = "layout check";
        let cipher = enc.encrypt(message, "secret").await.unwrap();
        let raw = STANDARD.decode(&cipher).unwrap();
        assert_eq!(raw.len(), SALT_LEN + message.len() + MAC_LEN);

        // Recompute every stage independently from the embedded salt.
        let (salt, rest) = raw.split_at(SALT_LEN);
        let (body, mac) = rest.split_at(rest.len() - MAC_LEN);

        let params = argon2::Params::new(64, 1, 1, Some(48)).unwrap();
        let mut derived = [0u8; 48];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(b"secret", salt, &mut derived)
            .unwrap();

        let digest = Sha256::new()
            .chain_update(&derived[16..32])
            .chain_update(body)
            .finalize();
        assert_eq!(mac, &digest[..4]);

        let mut plain = body.to_vec();
        Aes256Ctr::new_from_slices(&derived[..32], &derived[32..])
            .unwrap()
            .apply_keystream(&mut plain);
        assert_eq!(plain, message.as_bytes());
    }

    #[tokio::test]
    async fn test_bad_key_len_rejected() {
        let mut params = cheap().params().clone();
        params.set_number(PARAM_KEY_LEN, 32);
        let enc = Encrypter::new(METHOD_DEFAULT, params);
        assert!(matches!(
            enc.encrypt("foo", "pw").await,
            Err(CryptoError::Params(ParamsError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_default_encrypter_params() {
        let enc = Encrypter::default_encrypter();
        assert_eq!(enc.method(), "ARGON2ID-AES_256_CTR-MACV1");
        assert_eq!(enc.params().get_number(PARAM_ITERATIONS).unwrap(), 3);
        assert_eq!(enc.params().get_number(PARAM_MEMORY).unwrap(), 65536);
        assert_eq!(enc.params().get_number(PARAM_PARALLELISM).unwrap(), 4);
        assert_eq!(enc.params().get_number(PARAM_KEY_LEN).unwrap(), 48);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Encrypter::no_encrypter()).unwrap();
        assert_eq!(json, serde_json::json!({ "method": "", "params": {} }));

        let enc = Encrypter::default_encrypter();
        let restored: Encrypter =
            serde_json::from_str(&serde_json::to_string(&enc).unwrap()).unwrap();
        assert_eq!(restored, enc);
    }
}
