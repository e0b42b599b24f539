use serde_json::{json, Value};
use std::time::Duration;

use crate::api::throttle::Throttle;

pub fn fast_throttle() -> Throttle {
    Throttle::new(Duration::from_millis(1)).unwrap()
}

/// Rugcheck report body with `holders` top holders named `Holder0..`.
pub fn sample_report(mint: &str, symbol: &str, holders: usize) -> Value {
    let top_holders: Vec<Value> = (0..holders)
        .map(|i| json!({ "owner": format!("Holder{}", i), "pct": 10.0 - i as f64 * 1.25 }))
        .collect();

    json!({
        "mint": mint,
        "token": {
            "mintAuthority": null,
            "supply": 999_999_998_000_000u64,
            "decimals": 6,
            "freezeAuthority": null
        },
        "tokenMeta": {
            "name": format!("{} Token", symbol),
            "symbol": symbol,
            "mutable": false,
            "updateAuthority": "UpdAuth111"
        },
        "topHolders": top_holders,
        "risks": [
            { "name": "Low Liquidity", "description": "Low amount of LP Providers", "score": 10, "level": "warn" }
        ],
        "fileMeta": { "image": format!("https://img.example/{}.png", mint) },
        "rugged": false,
        "markets": [
            { "marketType": "amm", "lp": { "lpLockedPct": 95.5 } }
        ]
    })
}
