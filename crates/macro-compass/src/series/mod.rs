//! Indicator series: observations, the fetcher seam, and its implementations.

mod cache;
mod fetcher;
mod memory;
mod observation;
mod worldbank;

pub use cache::CachedFetcher;
pub use fetcher::{FetchError, SeriesFetcher};
pub use memory::InMemorySeriesFetcher;
pub use observation::{InvalidYearRange, Observation, Series, YearRange};
pub use worldbank::WorldBankClient;
