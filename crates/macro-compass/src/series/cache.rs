use super::fetcher::SeriesFetcher;
use super::observation::Series;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    series: Series,
    fetched_at: Instant,
}

/// Memoizes whole series per `(country, indicator)` pair.
///
/// Entries hold the full series; callers narrow to a year range afterwards,
/// so one cached entry serves every range. Empty results are never stored,
/// and a zero TTL stores nothing.
pub struct CachedFetcher<F> {
    inner: F,
    ttl: Duration,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl<F> CachedFetcher<F> {
    pub fn new(inner: F, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.clear();
        }
    }

    fn cached(&self, key: &(String, String)) -> Option<Series> {
        let guard = self.entries.lock().ok()?;
        guard
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.series.clone())
    }

    fn store(&self, key: (String, String), series: &Series) {
        if series.is_empty() || self.ttl.is_zero() {
            return;
        }
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(
                key,
                CacheEntry {
                    series: series.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}

#[async_trait]
impl<F: SeriesFetcher> SeriesFetcher for CachedFetcher<F> {
    async fn fetch(&self, country_code: &str, indicator_code: &str) -> Series {
        let key = (country_code.to_string(), indicator_code.to_string());
        if let Some(series) = self.cached(&key) {
            debug!(
                country = country_code,
                indicator = indicator_code,
                "series cache hit"
            );
            return series;
        }

        let series = self.inner.fetch(country_code, indicator_code).await;
        self.store(key, &series);
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{InMemorySeriesFetcher, Observation, YearRange};

    fn backing() -> InMemorySeriesFetcher {
        InMemorySeriesFetcher::default().with_series(
            "VN",
            "FP.CPI.TOTL.ZG",
            (2005..=2023)
                .filter_map(|year| Observation::annual(year, 3.0))
                .collect(),
        )
    }

    #[tokio::test]
    async fn repeated_fetches_hit_the_cache() {
        let cached = CachedFetcher::new(backing(), Duration::from_secs(60));

        let first = cached.fetch("VN", "FP.CPI.TOTL.ZG").await;
        let second = cached.fetch("VN", "FP.CPI.TOTL.ZG").await;

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn cached_series_serves_any_year_range() {
        let cached = CachedFetcher::new(backing(), Duration::from_secs(60));

        let early = cached
            .fetch("VN", "FP.CPI.TOTL.ZG")
            .await
            .within(YearRange::new(2005, 2010).expect("range"));
        let late = cached
            .fetch("VN", "FP.CPI.TOTL.ZG")
            .await
            .within(YearRange::new(2015, 2023).expect("range"));

        assert_eq!(early.len(), 6);
        assert_eq!(late.len(), 9);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn empty_results_are_not_cached() {
        let cached = CachedFetcher::new(backing(), Duration::from_secs(60));

        assert!(cached.fetch("TH", "FP.CPI.TOTL.ZG").await.is_empty());
        assert!(cached.fetch("TH", "FP.CPI.TOTL.ZG").await.is_empty());
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_always_refetches() {
        let cached = CachedFetcher::new(backing(), Duration::ZERO);

        cached.fetch("VN", "FP.CPI.TOTL.ZG").await;
        cached.fetch("VN", "FP.CPI.TOTL.ZG").await;
        assert_eq!(cached.inner().calls(), 2);

        cached.clear();
    }
}
