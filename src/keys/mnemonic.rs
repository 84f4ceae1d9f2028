use bip39::Mnemonic;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::WalletError;

/// Entropy strength of a generated mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MnemonicStrength {
    /// 128 bits, 12 words
    #[default]
    Normal,
    /// 256 bits, 24 words
    High,
}

impl MnemonicStrength {
    pub fn entropy_bytes(self) -> usize {
        match self {
            MnemonicStrength::Normal => 16,
            MnemonicStrength::High => 32,
        }
    }

    pub fn word_count(self) -> usize {
        match self {
            MnemonicStrength::Normal => 12,
            MnemonicStrength::High => 24,
        }
    }
}

pub struct KeyManager;

impl KeyManager {
    /// Generate a new random mnemonic phrase
    pub fn generate(strength: MnemonicStrength) -> Result<Zeroizing<String>, WalletError> {
        let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
        rand::thread_rng().fill_bytes(&mut entropy);

        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| WalletError::Mnemonic(e.to_string()))?;

        Ok(Zeroizing::new(mnemonic.to_string()))
    }

    /// Validate a phrase against the BIP39 word list and checksum, returning its
    /// normalized form. Only 12- and 24-word phrases are accepted.
    pub fn validate(words: &str) -> Result<Zeroizing<String>, WalletError> {
        let mnemonic =
            Mnemonic::parse(words).map_err(|e| WalletError::Mnemonic(e.to_string()))?;

        let count = mnemonic.word_count();
        if count != MnemonicStrength::Normal.word_count()
            && count != MnemonicStrength::High.word_count()
        {
            return Err(WalletError::Mnemonic(format!(
                "Invalid word count: {}. Expected 12 or 24 words",
                count
            )));
        }

        Ok(Zeroizing::new(mnemonic.to_string()))
    }
}
