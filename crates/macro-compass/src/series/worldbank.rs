//! World Bank Indicators API (v2) client.
//!
//! Responses are a two element JSON array: paging metadata followed by the
//! rows, newest first. Error responses carry a single `message` element.

use super::fetcher::{FetchError, SeriesFetcher};
use super::observation::{Observation, Series};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageMeta {
    pub page: u32,
    pub pages: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self { page: 1, pages: 1 }
    }
}

#[derive(Debug, Deserialize)]
struct RawPageMeta {
    #[serde(deserialize_with = "deserialize_count")]
    page: u32,
    #[serde(deserialize_with = "deserialize_count")]
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderMessage {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug)]
pub(crate) struct Page {
    pub meta: PageMeta,
    pub observations: Vec<Observation>,
}

/// The API has served paging counters both as numbers and as strings.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .and_then(|count| u32::try_from(count).ok())
            .ok_or_else(|| serde::de::Error::custom("paging counter out of range")),
        Value::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "unexpected paging counter {other}"
        ))),
    }
}

/// Parses `2023`, `2023Q2`, `2023M04`, or `2023-04-01` into a date.
pub(crate) fn parse_period(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let year: i32 = raw.get(..4)?.parse().ok()?;
    let rest = raw.get(4..)?;
    let month = match rest.chars().next() {
        None => 1,
        Some('Q') | Some('q') => {
            let quarter: u32 = rest[1..].parse().ok()?;
            if !(1..=4).contains(&quarter) {
                return None;
            }
            (quarter - 1) * 3 + 1
        }
        Some('M') | Some('m') => rest[1..].parse().ok()?,
        Some(_) => return None,
    };

    NaiveDate::from_ymd_opt(year, month, 1)
}

pub(crate) fn parse_page(body: &[u8]) -> Result<Page, FetchError> {
    let payload: Vec<Value> = serde_json::from_slice(body)?;

    if payload.len() < 2 {
        let message = payload
            .first()
            .and_then(|head| head.get("message"))
            .and_then(|messages| {
                serde_json::from_value::<Vec<ProviderMessage>>(messages.clone()).ok()
            })
            .and_then(|messages| messages.into_iter().next());
        return Err(match message {
            Some(message) => FetchError::Malformed(format!("{}: {}", message.key, message.value)),
            None => FetchError::EmptyPayload,
        });
    }

    let meta = serde_json::from_value::<RawPageMeta>(payload[0].clone())
        .map(|raw| PageMeta {
            page: raw.page,
            pages: raw.pages,
        })
        .unwrap_or_default();

    if payload[1].is_null() {
        return Err(FetchError::EmptyPayload);
    }

    let rows: Vec<RawRow> = serde_json::from_value(payload[1].clone())?;
    let observations = rows
        .into_iter()
        .filter_map(|row| {
            let value = row.value?;
            let date = parse_period(&row.date)?;
            Some(Observation::new(date, value))
        })
        .collect();

    Ok(Page { meta, observations })
}

pub struct WorldBankClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl WorldBankClient {
    pub fn new(config: ProviderConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("macro-compass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn indicator_url(&self, country_code: &str, indicator_code: &str) -> String {
        format!(
            "{}/country/{}/indicator/{}",
            self.config.base_url.trim_end_matches('/'),
            country_code,
            indicator_code
        )
    }

    /// Fetches every page (up to the configured cap) for one pair.
    pub async fn try_fetch(
        &self,
        country_code: &str,
        indicator_code: &str,
    ) -> Result<Series, FetchError> {
        let url = self.indicator_url(country_code, indicator_code);
        let per_page = self.config.per_page.to_string();
        let mut observations = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("format", "json"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            let parsed = parse_page(&body)?;
            debug!(
                country = country_code,
                indicator = indicator_code,
                page = parsed.meta.page,
                pages = parsed.meta.pages,
                rows = parsed.observations.len(),
                "fetched indicator page"
            );
            observations.extend(parsed.observations);

            if parsed.meta.page >= parsed.meta.pages || page >= self.config.max_pages {
                break;
            }
            page += 1;
        }

        Ok(Series::from_observations(observations))
    }
}

#[async_trait]
impl SeriesFetcher for WorldBankClient {
    async fn fetch(&self, country_code: &str, indicator_code: &str) -> Series {
        match self.try_fetch(country_code, indicator_code).await {
            Ok(series) => series,
            Err(err) => {
                warn!(
                    country = country_code,
                    indicator = indicator_code,
                    error = %err,
                    "indicator fetch failed; treating as no data"
                );
                Series::empty()
            }
        }
    }
}
