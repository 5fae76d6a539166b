use super::comparison::Comparison;
use super::error::ViewError;
use super::explorer::{ExplorerPanel, ExplorerRequest, ExplorerView};
use super::rubric::Rubric;
use super::scorecard::{round_to_hundredths, IndicatorScore, Scorecard};
use super::selection::SelectionPolicy;
use crate::catalog::{
    CatalogError, Country, CountryRegistry, ExploreCatalog, IndicatorCatalog, SeriesDefinition,
};
use crate::config::{AppConfig, ExplorerConfig, ScoringConfig};
use crate::error::AppError;
use crate::grading::GradingEngine;
use crate::series::{CachedFetcher, SeriesFetcher, WorldBankClient};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Assembles scorecards, comparisons, and explorer panels over a fetcher.
pub struct CompassService<F> {
    engine: GradingEngine,
    countries: CountryRegistry,
    explore: ExploreCatalog,
    explorer: ExplorerConfig,
    fetcher: F,
}

pub type LiveCompassService = CompassService<CachedFetcher<WorldBankClient>>;

impl<F: SeriesFetcher> CompassService<F> {
    /// Uses the standard country registry, explore catalog, and explorer bounds.
    pub fn new(engine: GradingEngine, fetcher: F) -> Self {
        Self {
            engine,
            countries: CountryRegistry::standard(),
            explore: ExploreCatalog::standard(),
            explorer: ExplorerConfig::default(),
            fetcher,
        }
    }

    pub fn with_countries(mut self, countries: CountryRegistry) -> Self {
        self.countries = countries;
        self
    }

    pub fn with_explore_catalog(mut self, explore: ExploreCatalog) -> Self {
        self.explore = explore;
        self
    }

    pub fn with_explorer_config(mut self, explorer: ExplorerConfig) -> Self {
        self.explorer = explorer;
        self
    }

    pub fn engine(&self) -> &GradingEngine {
        &self.engine
    }

    pub fn countries(&self) -> &CountryRegistry {
        &self.countries
    }

    pub fn explore_catalog(&self) -> &ExploreCatalog {
        &self.explore
    }

    pub fn explorer_config(&self) -> &ExplorerConfig {
        &self.explorer
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn rubric(&self) -> Rubric {
        Rubric::from_catalog(self.engine.catalog())
    }

    pub async fn scorecard(
        &self,
        country: &str,
        selection: SelectionPolicy,
    ) -> Result<Scorecard, ViewError> {
        let country = self.countries.lookup(country)?.clone();
        self.scorecard_for(country, selection).await
    }

    pub async fn comparison(
        &self,
        left: &str,
        right: &str,
        selection: SelectionPolicy,
    ) -> Result<Comparison, ViewError> {
        let left = self.countries.lookup(left)?.clone();
        let right = self.countries.lookup(right)?.clone();
        if left == right {
            return Err(ViewError::SameCountry(left.display_name));
        }

        let (left, right) = futures::join!(
            self.scorecard_for(left, selection),
            self.scorecard_for(right, selection)
        );
        Ok(Comparison::from_scorecards(left?, right?))
    }

    pub async fn explorer(&self, request: ExplorerRequest) -> Result<ExplorerView, ViewError> {
        let years = request.years.unwrap_or(self.explorer.default_range);
        if !years.is_within(self.explorer.bounds) {
            return Err(ViewError::YearOutOfBounds {
                requested: years,
                bounds: self.explorer.bounds,
            });
        }

        let mut countries = self.resolve_countries(&request.countries)?;
        let truncated = countries.len() > self.explorer.max_countries;
        if truncated {
            warn!(
                requested = countries.len(),
                limit = self.explorer.max_countries,
                "explorer country selection truncated"
            );
            countries.truncate(self.explorer.max_countries);
        }

        let definitions = self.resolve_series(&request.indicators)?;
        let countries_ref = &countries;
        let panels = join_all(definitions.into_iter().map(|definition| async move {
            let series = join_all(countries_ref.iter().map(|country| {
                self.fetcher
                    .fetch(&country.provider_code, &definition.provider_code)
            }))
            .await;
            ExplorerPanel::join(definition, countries_ref, series, years)
        }))
        .await;

        Ok(ExplorerView {
            years,
            countries,
            truncated,
            panels,
        })
    }

    async fn scorecard_for(
        &self,
        country: Country,
        selection: SelectionPolicy,
    ) -> Result<Scorecard, ViewError> {
        let definitions = self.engine.catalog().definitions();
        let fetched = join_all(definitions.iter().map(|definition| {
            self.fetcher
                .fetch(&country.provider_code, &definition.provider_code)
        }))
        .await;

        let mut scores = Vec::with_capacity(definitions.len());
        for (definition, series) in definitions.iter().zip(&fetched) {
            let observation = selection.select(series);
            let value = observation.map(|obs| round_to_hundredths(obs.value));
            let grade = self.engine.classify_observation(&definition.name, value)?;
            scores.push(IndicatorScore {
                indicator: definition.name.clone(),
                provider_code: definition.provider_code.clone(),
                value,
                year: observation.map(|obs| obs.year()),
                grade,
            });
        }

        Ok(Scorecard::assemble(
            &self.engine,
            country,
            selection,
            scores,
        ))
    }

    /// Resolves names in request order, dropping repeats.
    fn resolve_countries(&self, requested: &[String]) -> Result<Vec<Country>, ViewError> {
        if requested.is_empty() {
            return Ok(self.countries.first().cloned().into_iter().collect());
        }

        let mut resolved: Vec<Country> = Vec::with_capacity(requested.len());
        for query in requested {
            let country = self.countries.lookup(query)?;
            if !resolved.contains(country) {
                resolved.push(country.clone());
            }
        }
        Ok(resolved)
    }

    fn resolve_series(&self, requested: &[String]) -> Result<Vec<&SeriesDefinition>, ViewError> {
        if requested.is_empty() {
            return Ok(self.explore.series().iter().collect());
        }

        requested
            .iter()
            .map(|name| self.explore.lookup(name).map_err(ViewError::from))
            .collect()
    }
}

/// The configured JSON catalog when set, the standard variant otherwise.
pub fn load_catalog(config: &ScoringConfig) -> Result<IndicatorCatalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => IndicatorCatalog::from_path(path),
        None => IndicatorCatalog::standard(config.variant),
    }
}

impl LiveCompassService {
    /// Wires the World Bank client behind the series cache.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let catalog = load_catalog(&config.scoring)?;
        info!(
            indicators = catalog.len(),
            variant = ?config.scoring.variant,
            custom = config.scoring.catalog_path.is_some(),
            "score catalog loaded"
        );

        let client = WorldBankClient::new(config.provider.clone())?;
        let fetcher = CachedFetcher::new(
            client,
            Duration::from_secs(config.provider.cache_ttl_secs),
        );

        Ok(CompassService::new(GradingEngine::new(Arc::new(catalog)), fetcher)
            .with_explorer_config(config.explorer))
    }
}
