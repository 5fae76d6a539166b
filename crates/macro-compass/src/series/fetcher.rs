use super::observation::Series;
use async_trait::async_trait;

/// Source of indicator series.
///
/// Implementations absorb every failure and return an empty series, so the
/// grading side only ever sees "data" or "no data".
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    async fn fetch(&self, country_code: &str, indicator_code: &str) -> Series;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("provider returned no observations")]
    EmptyPayload,
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
