use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::app::log_error;

// Curated background data shipped with the binary; a file of the same shape
// in the config dir takes precedence so entries can be extended without a
// rebuild.
const BUNDLED: &str = include_str!("../assets/coin-info.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    #[serde(default)]
    pub founder: String,
    #[serde(default)]
    pub date_found: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub major_price_events: Vec<String>,
    #[serde(default)]
    pub mining_energy_cost: String,
    #[serde(default)]
    pub mining_cost_per_coin: String,
    #[serde(default)]
    pub mining_method: String,
    #[serde(default)]
    pub transaction_method: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub risk_explanation: String,
}

pub type CoinInfoMap = HashMap<String, CoinInfo>;

pub fn load() -> CoinInfoMap {
    let path = override_path();
    if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => return map,
                Err(e) => log_error(&format!("Coin info override: {}", e)),
            },
            Err(e) => log_error(&format!("Coin info override: {}", e)),
        }
    }
    serde_json::from_str(BUNDLED).unwrap_or_default()
}

fn override_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lizard");
    path.push("coin-info.json");
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBucket {
    Low,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
}

impl RiskBucket {
    pub fn label(self) -> &'static str {
        match self {
            RiskBucket::Low => "Low",
            RiskBucket::Medium => "Medium",
            RiskBucket::MediumHigh => "Medium-High",
            RiskBucket::High => "High",
            RiskBucket::VeryHigh => "Very High",
        }
    }
}

// "Very High" / "medium-high" / arbitrary casing all land in a bucket;
// anything unrecognized counts as medium.
pub fn risk_bucket(level: &str) -> RiskBucket {
    let normalized = level
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    match normalized.as_str() {
        "low" => RiskBucket::Low,
        "medium" => RiskBucket::Medium,
        "medium-high" => RiskBucket::MediumHigh,
        "high" => RiskBucket::High,
        "very-high" => RiskBucket::VeryHigh,
        _ => RiskBucket::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_data_parses() {
        let map: CoinInfoMap = serde_json::from_str(BUNDLED).unwrap();
        assert!(map.len() >= 5);
        let btc = map.get("bitcoin").unwrap();
        assert_eq!(btc.founder, "Satoshi Nakamoto");
        assert!(!btc.major_price_events.is_empty());
        assert!(!btc.risk_explanation.is_empty());
    }

    #[test]
    fn unknown_id_has_no_entry() {
        let map: CoinInfoMap = serde_json::from_str(BUNDLED).unwrap();
        assert!(map.get("not-a-real-coin").is_none());
    }

    #[test]
    fn risk_levels_normalize() {
        assert_eq!(risk_bucket("Low"), RiskBucket::Low);
        assert_eq!(risk_bucket("very high"), RiskBucket::VeryHigh);
        assert_eq!(risk_bucket("Very  High"), RiskBucket::VeryHigh);
        assert_eq!(risk_bucket("Medium-High"), RiskBucket::MediumHigh);
        assert_eq!(risk_bucket("HIGH"), RiskBucket::High);
        assert_eq!(risk_bucket(""), RiskBucket::Medium);
        assert_eq!(risk_bucket("speculative"), RiskBucket::Medium);
    }
}
