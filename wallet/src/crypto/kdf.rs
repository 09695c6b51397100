//! # Password Key Derivation
//!
//! Argon2id turns the user's password plus a random salt into the AES-256
//! key that seals the wallet secrets. The cost parameters travel with each
//! sealed value so a record written on a laptop still opens on a phone
//! configured with cheaper defaults.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{
    AES_KEY_LENGTH, KDF_SALT_LENGTH, MAX_KDF_M_COST, MAX_KDF_P_COST, MAX_KDF_T_COST,
};

/// Errors raised while deriving a key.
#[derive(Debug, Error)]
pub enum KdfError {
    #[error("invalid argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("salt must be {KDF_SALT_LENGTH} bytes, got {0}")]
    InvalidSalt(usize),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// Argon2id cost parameters.
///
/// | Field    | Meaning                       |
/// |----------|-------------------------------|
/// | `m_cost` | memory in KiB                 |
/// | `t_cost` | passes over memory            |
/// | `p_cost` | lanes                         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdfParams {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for KdfParams {
    /// 19 MiB, 2 passes, 1 lane.
    fn default() -> Self {
        Self {
            m_cost: 19 * 1024,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

impl KdfParams {
    /// The cheapest parameters argon2 accepts. Only for tests and benches:
    /// a record sealed with these is trivially brute-forced.
    pub fn light() -> Self {
        Self {
            m_cost: 8,
            t_cost: 1,
            p_cost: 1,
        }
    }

    /// Rejects costs above the configured ceilings. Parameters come from
    /// the stored record, so they are untrusted input.
    pub fn check_bounds(&self) -> Result<(), KdfError> {
        if self.m_cost > MAX_KDF_M_COST {
            return Err(KdfError::InvalidParams(format!(
                "memory cost {} KiB exceeds {MAX_KDF_M_COST}",
                self.m_cost
            )));
        }
        if self.t_cost > MAX_KDF_T_COST {
            return Err(KdfError::InvalidParams(format!(
                "time cost {} exceeds {MAX_KDF_T_COST}",
                self.t_cost
            )));
        }
        if self.p_cost > MAX_KDF_P_COST {
            return Err(KdfError::InvalidParams(format!(
                "parallelism {} exceeds {MAX_KDF_P_COST}",
                self.p_cost
            )));
        }
        Ok(())
    }
}

/// Derive an AES-256 key from `password` and `salt`.
pub fn derive_key(
    password: &str,
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; AES_KEY_LENGTH]>, KdfError> {
    if salt.len() != KDF_SALT_LENGTH {
        return Err(KdfError::InvalidSalt(salt.len()));
    }
    params.check_bounds()?;

    let argon2_params = Params::new(
        params.m_cost,
        params.t_cost,
        params.p_cost,
        Some(AES_KEY_LENGTH),
    )
    .map_err(|e| KdfError::InvalidParams(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|e| KdfError::DerivationFailed(e.to_string()))?;
    Ok(key)
}
