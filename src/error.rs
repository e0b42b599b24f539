use thiserror::Error;

/// Failure modes of a single Rugcheck report lookup.
///
/// All of these collapse into the same message for the Discord user; the variants
/// exist so logs and tests can tell them apart.
#[derive(Debug, Error)]
pub enum RugcheckError {
    #[error("Invalid token address: {0:?}")]
    InvalidToken(String),

    #[error("Invalid Rugcheck API url: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status from Rugcheck API: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed report payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Insufficient data in report: `{field}` has {found} entries, {required} required")]
    InsufficientData {
        field: &'static str,
        required: usize,
        found: usize,
    },
}

impl RugcheckError {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RugcheckError::InvalidToken(_) => "invalid_token",
            RugcheckError::InvalidUrl(_) => "invalid_url",
            RugcheckError::Network(_) => "network",
            RugcheckError::UnexpectedStatus { .. } => "status",
            RugcheckError::MalformedPayload(_) => "shape",
            RugcheckError::InsufficientData { .. } => "insufficient_data",
        }
    }
}
