use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::models::{NormalizedReport, TokenIdentifier};

pub const EMBED_COLOR: u32 = 0x0099ff;
pub const EMBED_FOOTER: &str = "Stay Safe. WAGMI";
const EXPLORER_TOKEN_URL: &str = "https://solscan.io/token";

/// Render-ready summary card. Discord's per-field length limit is not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    pub color: u32,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub footer: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl EmbedField {
    fn new(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Percentages are always shown with exactly two decimals.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}", value)
}

// Revoked authorities come back as JSON null and are shown that way.
fn authority(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

pub fn format_report(report: &NormalizedReport, token: &TokenIdentifier) -> DisplayPayload {
    let token_info = format!(
        "**Name**: {}\n\
        **Symbol**: {}\n\
        **Mint Authority**: {}\n\
        **Freeze Authority**: {}\n\
        **Mutable**: {}\n\
        **Update Authority**: {}",
        report.name,
        report.symbol,
        authority(&report.mint_authority),
        authority(&report.freeze_authority),
        report.mutable,
        authority(&report.update_authority),
    );

    let top_holders = report
        .holders
        .iter()
        .map(|h| format!("{} - {}%", h.address, format_percentage(h.percentage)))
        .collect::<Vec<_>>()
        .join("\n");

    let risk = &report.primary_risk;
    let risks = format!(
        "**Risk Name**: {}\n\
        **Risk Description**: {}\n\
        **Risk Score**: {}\n\
        **Risk Level**: {}",
        risk.name, risk.description, risk.score, risk.level,
    );

    let market_info = format!(
        "**Market Type**: {}\n**LP Locked**: {}%",
        report.primary_market_type,
        format_percentage(report.lp_locked_percentage),
    );

    DisplayPayload {
        color: EMBED_COLOR,
        title: format!("Rugcheck ({})", report.symbol),
        url: format!("{}/{}", EXPLORER_TOKEN_URL, token),
        thumbnail: report.image_url.clone(),
        footer: EMBED_FOOTER.to_string(),
        fields: vec![
            EmbedField::new("**Token Information**", token_info),
            EmbedField::new("**Top Holders**", top_holders),
            EmbedField::new("**Risks**", risks),
            EmbedField::new("**Market Information**", market_info),
        ],
    }
}

impl DisplayPayload {
    pub fn into_embed(self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .colour(self.color)
            .title(self.title)
            .url(self.url)
            .footer(CreateEmbedFooter::new(self.footer));

        if let Some(thumbnail) = self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        self.fields
            .into_iter()
            .fold(embed, |embed, field| embed.field(field.name, field.value, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{Holder, PrimaryRisk, RAYDIUM_AUTHORITY};

    fn sample() -> NormalizedReport {
        NormalizedReport {
            mint: "ABC123".to_string(),
            mint_authority: None,
            freeze_authority: Some("FreezeAuth".to_string()),
            update_authority: Some("UpdAuth".to_string()),
            supply: 1_000_000.0,
            decimals: 6,
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            mutable: true,
            holders: vec![
                Holder::new("WalletA", 12.5),
                Holder::new(RAYDIUM_AUTHORITY, 40.0),
                Holder::new("WalletB", 3.14159),
                Holder::new("WalletC", 1.0),
                Holder::new("WalletD", 0.456),
            ],
            primary_risk: PrimaryRisk {
                name: "Low Liquidity".to_string(),
                description: "Low amount of LP Providers".to_string(),
                score: 10.0,
                level: "warn".to_string(),
            },
            image_url: Some("https://img.example/foo.png".to_string()),
            rugged: false,
            primary_market_type: "amm".to_string(),
            lp_locked_percentage: 95.5,
        }
    }

    fn field<'a>(payload: &'a DisplayPayload, name: &str) -> &'a str {
        payload
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_format_report_layout() {
        let token = TokenIdentifier::parse("ABC123").unwrap();
        let payload = format_report(&sample(), &token);

        assert_eq!(payload.title, "Rugcheck (FOO)");
        assert_eq!(payload.url, "https://solscan.io/token/ABC123");
        assert_eq!(payload.thumbnail.as_deref(), Some("https://img.example/foo.png"));
        assert_eq!(payload.footer, "Stay Safe. WAGMI");
        assert_eq!(payload.color, 0x0099ff);

        let names: Vec<_> = payload.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["**Token Information**", "**Top Holders**", "**Risks**", "**Market Information**"]
        );
        assert_eq!(
            field(&payload, "**Market Information**"),
            "**Market Type**: amm\n**LP Locked**: 95.50%"
        );
        assert_eq!(
            field(&payload, "**Risks**"),
            "**Risk Name**: Low Liquidity\n**Risk Description**: Low amount of LP Providers\n**Risk Score**: 10\n**Risk Level**: warn"
        );
    }

    #[test]
    fn test_token_information_authorities() {
        let token = TokenIdentifier::parse("ABC123").unwrap();
        let payload = format_report(&sample(), &token);
        let info = field(&payload, "**Token Information**");

        assert!(info.contains("**Mint Authority**: null"));
        assert!(!info.contains("None"));
        assert!(info.contains("**Freeze Authority**: FreezeAuth"));
        assert!(info.contains("**Mutable**: true"));
        assert!(info.starts_with("**Name**: Foo\n**Symbol**: FOO\n"));
    }

    #[test]
    fn test_top_holders_lines() {
        let token = TokenIdentifier::parse("ABC123").unwrap();
        let payload = format_report(&sample(), &token);

        assert_eq!(
            field(&payload, "**Top Holders**"),
            "WalletA - 12.50%\nRaydium - 40.00%\nWalletB - 3.14%\nWalletC - 1.00%\nWalletD - 0.46%"
        );
        assert!(!field(&payload, "**Top Holders**").contains(RAYDIUM_AUTHORITY));
    }

    #[test]
    fn test_format_percentage_idempotent() {
        for value in [12.35, 0.1, 100.0, 95.5] {
            let once = format_percentage(value);
            let again = format_percentage(once.parse().unwrap());
            assert_eq!(once, again);
        }
    }

    #[test]
    fn test_missing_thumbnail() {
        let mut report = sample();
        report.image_url = None;
        let token = TokenIdentifier::parse("ABC123").unwrap();

        let payload = format_report(&report, &token);
        assert_eq!(payload.thumbnail, None);

        // Builder accepts the payload without a thumbnail
        let embed = serde_json::to_value(payload.into_embed()).unwrap();
        assert_eq!(embed["title"], "Rugcheck (FOO)");
        assert!(embed["thumbnail"].is_null());
    }
}
