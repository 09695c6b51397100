//! # Mnemonic Key Derivation
//!
//! Recovery phrase → seed → Ed25519 keypair → address.
//!
//! ```text
//! 128-bit entropy ──BIP-39──▶ 12 words ──PBKDF2-HMAC-SHA512("mnemonic")──▶ 64-byte seed
//!                                                                 │
//!                                                   first 32 bytes ▼
//!                                                       Ed25519 signing seed
//! ```
//!
//! No passphrase and no extra salt: the same phrase always lands on the same
//! key, on every device and in every reimplementation. That's the whole
//! point of writing twelve words on paper.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{MNEMONIC_ENTROPY_LENGTH, SIGNING_KEY_LENGTH};
use crate::crypto::keys::WalletKeypair;

/// Errors from phrase parsing and generation.
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// Unknown word, wrong word count or bad checksum. The inner string
    /// comes from the bip39 parser and never echoes the phrase.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("entropy rejected by the word-list encoder: {0}")]
    EntropyRejected(String),
}

/// A freshly generated phrase together with the keypair it derives.
pub struct GeneratedIdentity {
    /// Space-separated English words. Wiped on drop.
    pub phrase: Zeroizing<String>,
    pub keypair: WalletKeypair,
}

impl std::fmt::Debug for GeneratedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedIdentity")
            .field("phrase", &"<redacted>")
            .field("keypair", &self.keypair)
            .finish()
    }
}

/// Generate a new 12-word phrase from OS randomness and derive its keypair.
pub fn generate() -> Result<GeneratedIdentity, MnemonicError> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_LENGTH]);
    rand::rngs::OsRng.fill_bytes(entropy.as_mut_slice());

    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy.as_slice())
        .map_err(|e| MnemonicError::EntropyRejected(e.to_string()))?;
    let keypair = keypair_from_mnemonic(&mnemonic);

    Ok(GeneratedIdentity {
        phrase: Zeroizing::new(mnemonic.to_string()),
        keypair,
    })
}

/// Derive the keypair for an existing phrase.
///
/// Leading/trailing whitespace, repeated spaces between words and upper
/// case are tolerated; anything the BIP-39 checksum rejects is not.
pub fn derive(phrase: &str) -> Result<WalletKeypair, MnemonicError> {
    let mnemonic = parse(phrase)?;
    Ok(keypair_from_mnemonic(&mnemonic))
}

/// Canonical form of a phrase: single spaces, lower-case words. This is
/// what gets sealed into the wallet record.
pub fn normalize(phrase: &str) -> Result<Zeroizing<String>, MnemonicError> {
    Ok(Zeroizing::new(parse(phrase)?.to_string()))
}

/// Cheap validity check for UI forms.
pub fn is_valid(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

fn parse(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    // The English word list is all lower case.
    let lowered = Zeroizing::new(phrase.trim().to_lowercase());
    Mnemonic::parse_in_normalized(Language::English, &lowered)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))
}

fn keypair_from_mnemonic(mnemonic: &Mnemonic) -> WalletKeypair {
    let seed = Zeroizing::new(mnemonic.to_seed(""));
    let mut signing_seed = Zeroizing::new([0u8; SIGNING_KEY_LENGTH]);
    signing_seed.copy_from_slice(&seed[..SIGNING_KEY_LENGTH]);
    WalletKeypair::from_seed(&signing_seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_yields_twelve_valid_words() {
        let identity = generate().unwrap();
        assert_eq!(identity.phrase.split_whitespace().count(), 12);
        assert!(is_valid(&identity.phrase));
    }

    #[test]
    fn test_generated_phrase_rederives_same_key() {
        let identity = generate().unwrap();
        let again = derive(&identity.phrase).unwrap();
        assert_eq!(identity.keypair.address(), again.address());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let a = derive(ABANDON).unwrap();
        let b = derive(ABANDON).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(*a.secret_key_hex(), *b.secret_key_hex());
    }

    #[test]
    fn test_known_vector() {
        // BIP-39 seed for the all-"abandon" phrase with an empty passphrase is
        // 5eb00bbd...; its first 32 bytes are the Ed25519 seed.
        let kp = derive(ABANDON).unwrap();
        assert_eq!(
            kp.secret_key_hex().as_str(),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        );
        assert_eq!(
            kp.address(),
            "c5785e1865b708938aff8161d573006496663b1aa10834e396dc566869a2c66a"
        );
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let messy = format!("  {}  ", ABANDON.replace(' ', "   "));
        assert_eq!(derive(&messy).unwrap().address(), derive(ABANDON).unwrap().address());
        assert_eq!(normalize(&messy).unwrap().as_str(), ABANDON);
    }

    #[test]
    fn test_upper_case_is_tolerated() {
        let shouting = ABANDON.replacen("abandon", "ABANDON", 1).replace("about", "About");
        assert_eq!(derive(&shouting).unwrap().address(), derive(ABANDON).unwrap().address());
        assert_eq!(normalize(&shouting).unwrap().as_str(), ABANDON);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let bad = ABANDON.replace("about", "abandon");
        assert!(matches!(derive(&bad), Err(MnemonicError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_unknown_word_rejected() {
        let bad = ABANDON.replace("about", "bitcoinz");
        assert!(!is_valid(&bad));
    }

    #[test]
    fn test_wrong_word_count_rejected() {
        assert!(!is_valid("abandon abandon abandon"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_debug_redacts_phrase() {
        let identity = generate().unwrap();
        let debug = format!("{:?}", identity);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(identity.phrase.as_str()));
    }
}
