//! # Hashing
//!
//! SHA-256 is the only hash the wallet needs: the node recomputes the
//! transaction digest with it, so we match.

use sha2::{Digest, Sha256};

use crate::config::DIGEST_LENGTH;

/// SHA-256 of `data` as a fixed-size array.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    Sha256::digest(data).into()
}
