use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RugcheckError;

/// Raydium authority address; shown by name instead of the raw address.
pub const RAYDIUM_AUTHORITY: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1";
pub const RAYDIUM_ALIAS: &str = "Raydium";

/// Token contract address as typed by the user. Only checked for emptiness;
/// the Rugcheck API is the judge of whether it names a real mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdentifier(String);

impl TokenIdentifier {
    pub fn parse(raw: &str) -> Result<Self, RugcheckError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RugcheckError::InvalidToken(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,    // Owner address, or an alias for known pools
    pub percentage: f64,    // Share of supply, rounded to 2 decimals
}

impl Holder {
    pub fn new(owner: &str, pct: f64) -> Self {
        let address = if owner == RAYDIUM_AUTHORITY {
            RAYDIUM_ALIAS.to_string()
        } else {
            owner.to_string()
        };

        Self {
            address,
            percentage: round_percentage(pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRisk {
    pub name: String,
    pub description: String,
    pub score: f64,
    pub level: String, // "info", "warn", "danger", ...
}

/// Fixed subset of a Rugcheck report, built all-or-nothing from the API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub mint: String,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub update_authority: Option<String>,
    pub supply: f64,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub mutable: bool,
    pub holders: Vec<Holder>,          // Always the first 5 top holders, in API order
    pub primary_risk: PrimaryRisk,     // First entry of `risks`
    pub image_url: Option<String>,
    pub rugged: bool,
    pub primary_market_type: String,   // First entry of `markets`
    pub lp_locked_percentage: f64,
}

pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_identifier_trims_and_rejects_blank() {
        let token = TokenIdentifier::parse("  ABC123 ").unwrap();
        assert_eq!(token.as_str(), "ABC123");
        assert_eq!(token.to_string(), "ABC123");

        assert!(matches!(
            TokenIdentifier::parse("   "),
            Err(RugcheckError::InvalidToken(_))
        ));
        assert!(TokenIdentifier::parse("").is_err());
    }

    #[test]
    fn test_holder_relabels_raydium() {
        let pool = Holder::new(RAYDIUM_AUTHORITY, 21.456);
        assert_eq!(pool.address, "Raydium");
        assert_eq!(pool.percentage, 21.46);

        let wallet = Holder::new("WalletAbc", 3.0);
        assert_eq!(wallet.address, "WalletAbc");
    }

    #[test]
    fn test_round_percentage_is_idempotent() {
        for value in [0.0, 1.005, 12.3456, 99.999, 42.42] {
            let once = round_percentage(value);
            assert_eq!(round_percentage(once), once);
        }
    }
}
