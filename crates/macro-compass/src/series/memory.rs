use super::fetcher::SeriesFetcher;
use super::observation::{Observation, Series};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Map-backed fetcher for tests and offline runs. Unknown pairs yield an
/// empty series, mirroring a provider that has no data.
#[derive(Debug, Default)]
pub struct InMemorySeriesFetcher {
    series: HashMap<(String, String), Series>,
    calls: AtomicUsize,
}

impl InMemorySeriesFetcher {
    pub fn with_series(
        mut self,
        country_code: &str,
        indicator_code: &str,
        observations: Vec<Observation>,
    ) -> Self {
        self.insert(country_code, indicator_code, observations);
        self
    }

    pub fn insert(&mut self, country_code: &str, indicator_code: &str, observations: Vec<Observation>) {
        self.series.insert(
            (country_code.to_string(), indicator_code.to_string()),
            Series::from_observations(observations),
        );
    }

    /// Number of `fetch` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SeriesFetcher for InMemorySeriesFetcher {
    async fn fetch(&self, country_code: &str, indicator_code: &str) -> Series {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.series
            .get(&(country_code.to_string(), indicator_code.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
