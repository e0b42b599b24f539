use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::throttle::Throttle;
use crate::error::RugcheckError;
use crate::models::{Holder, NormalizedReport, PrimaryRisk, TokenIdentifier};

pub const RUGCHECK_BASE_URL: &str = "https://api.rugcheck.xyz/v1";

const TOP_HOLDER_COUNT: usize = 5;

#[derive(Clone)]
pub struct RugcheckClient {
    client: Client,
    base_url: Url,
    throttle: Throttle,
}

// --- Response Structs ---

// Only the fields the normalized report keeps; everything else in the report is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    pub mint: String,
    pub token: RawToken,
    pub token_meta: RawTokenMeta,
    pub top_holders: Option<Vec<RawHolder>>,
    pub risks: Option<Vec<RawRisk>>,
    pub file_meta: Option<RawFileMeta>,
    pub rugged: bool,
    pub markets: Option<Vec<RawMarket>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToken {
    pub mint_authority: Option<String>,
    pub supply: f64,
    pub decimals: u8,
    pub freeze_authority: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenMeta {
    pub name: String,
    pub symbol: String,
    pub mutable: bool,
    pub update_authority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawHolder {
    pub owner: String,
    pub pct: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawRisk {
    pub name: String,
    pub description: String,
    pub score: f64,
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct RawFileMeta {
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarket {
    pub market_type: String,
    pub lp: RawLiquidityPool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLiquidityPool {
    pub lp_locked_pct: f64,
}

impl RawReport {
    /// Extracts the fixed field set. Fails without producing anything if a list is too short.
    pub fn normalize(self) -> Result<NormalizedReport, RugcheckError> {
        let holders = take_required(self.top_holders, TOP_HOLDER_COUNT, "topHolders")?
            .into_iter()
            .map(|h| Holder::new(&h.owner, h.pct))
            .collect();
        let risk = first_required(self.risks, "risks")?;
        let market = first_required(self.markets, "markets")?;

        Ok(NormalizedReport {
            mint: self.mint,
            mint_authority: self.token.mint_authority,
            freeze_authority: self.token.freeze_authority,
            update_authority: self.token_meta.update_authority,
            supply: self.token.supply,
            decimals: self.token.decimals,
            name: self.token_meta.name,
            symbol: self.token_meta.symbol,
            mutable: self.token_meta.mutable,
            holders,
            primary_risk: PrimaryRisk {
                name: risk.name,
                description: risk.description,
                score: risk.score,
                level: risk.level,
            },
            image_url: self.file_meta.and_then(|meta| meta.image),
            rugged: self.rugged,
            primary_market_type: market.market_type,
            lp_locked_percentage: market.lp.lp_locked_pct,
        })
    }
}

fn take_required<T>(
    items: Option<Vec<T>>,
    required: usize,
    field: &'static str,
) -> Result<Vec<T>, RugcheckError> {
    let mut items = items.unwrap_or_default();
    if items.len() < required {
        return Err(RugcheckError::InsufficientData {
            field,
            required,
            found: items.len(),
        });
    }
    items.truncate(required);
    Ok(items)
}

fn first_required<T>(items: Option<Vec<T>>, field: &'static str) -> Result<T, RugcheckError> {
    take_required(items, 1, field)?
        .into_iter()
        .next()
        .ok_or(RugcheckError::InsufficientData {
            field,
            required: 1,
            found: 0,
        })
}

// --- Rugcheck Client Implementation ---

impl RugcheckClient {
    pub fn new(base_url: &str, throttle: Throttle) -> Result<Self, RugcheckError> {
        let base_url =
            Url::parse(base_url).map_err(|_| RugcheckError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RugcheckError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            throttle,
        })
    }

    /// `{base}/tokens/{ca}/report`, with the address encoded as a single path segment.
    pub fn report_url(&self, token: &TokenIdentifier) -> Result<Url, RugcheckError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RugcheckError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["tokens", token.as_str(), "report"]);
        Ok(url)
    }

    /// Fetches and normalizes the report for one token. Exactly one GET, no retries.
    pub async fn fetch_report(
        &self,
        token: &TokenIdentifier,
    ) -> Result<NormalizedReport, RugcheckError> {
        let url = self.report_url(token)?;
        info!("Fetching Rugcheck report: {}", url);

        match self.request_report(url).await {
            Ok(report) => {
                info!("Success! Rugcheck report for {} ({})", token, report.symbol);
                Ok(report)
            }
            Err(e) => {
                warn!("Rugcheck report for {} failed [{}]: {}", token, e.kind(), e);
                Err(e)
            }
        }
    }

    async fn request_report(&self, url: Url) -> Result<NormalizedReport, RugcheckError> {
        self.throttle.acquire().await;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            debug!("Rugcheck API error body: {}", error_text);
            return Err(RugcheckError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let raw: RawReport = serde_json::from_str(&body)?;
        raw.normalize()
    }
}
