//! # Password Policy
//!
//! Scores a password 0–4 to gate wallet creation. One point each for
//! length, mixed case, a digit and a symbol; a predictable prefix costs two.
//!
//! This is UI advice, not cryptography. The vault seals under any password;
//! only [`WalletFacade::create_wallet`](crate::facade::WalletFacade::create_wallet)
//! refuses weak ones.

use serde::{Deserialize, Serialize};

use crate::config::{
    COMMON_PASSWORD_PREFIXES, PASSWORD_MAX_SCORE, PASSWORD_MIN_LENGTH, PASSWORD_PATTERN_PENALTY,
};

/// Result of scoring a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordScore {
    /// 0 (hopeless) through 4 (strong).
    pub score: u8,
    /// Human-readable hints, one per unmet rule.
    pub feedback: Vec<String>,
    /// `score >= 4`.
    pub is_strong: bool,
}

/// Score `password`.
pub fn score(password: &str) -> PasswordScore {
    let mut points: u8 = 0;
    let mut feedback = Vec::new();

    if password.chars().count() >= PASSWORD_MIN_LENGTH {
        points += 1;
    } else {
        feedback.push(format!("Use at least {PASSWORD_MIN_LENGTH} characters"));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        points += 1;
    } else {
        feedback.push("Mix uppercase and lowercase letters".to_string());
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        points += 1;
    } else {
        feedback.push("Add at least one number".to_string());
    }

    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        points += 1;
    } else {
        feedback.push("Add at least one symbol".to_string());
    }

    points = points.min(PASSWORD_MAX_SCORE);

    if starts_with_common_pattern(password) {
        points = points.saturating_sub(PASSWORD_PATTERN_PENALTY);
        feedback.push("Avoid common patterns like \"123\" or \"password\"".to_string());
    }

    PasswordScore {
        score: points,
        feedback,
        is_strong: points >= PASSWORD_MAX_SCORE,
    }
}

fn starts_with_common_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORD_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}
