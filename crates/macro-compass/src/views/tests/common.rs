use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{IndicatorCatalog, ScoreVariant};
use crate::grading::GradingEngine;
use crate::series::{InMemorySeriesFetcher, Observation};
use crate::views::CompassService;

pub(super) const GDP_GROWTH_CODE: &str = "NY.GDP.MKTP.KD.ZG";
pub(super) const INFLATION_CODE: &str = "FP.CPI.TOTL.ZG";
pub(super) const UNEMPLOYMENT_CODE: &str = "SL.UEM.TOTL.ZS";
pub(super) const DEBT_CODE: &str = "GC.DOD.TOTL.GD.ZS";
pub(super) const GDP_CURRENT_CODE: &str = "NY.GDP.MKTP.CD";
pub(super) const POPULATION_CODE: &str = "SP.POP.TOTL";

pub(super) fn annual(points: &[(i32, f64)]) -> Vec<Observation> {
    points
        .iter()
        .filter_map(|&(year, value)| Observation::annual(year, value))
        .collect()
}

/// Vietnam grades B/C/A/A on latest data; its debt series stops in 2020.
/// Thailand grades D/D/A/A. Malaysia has no data at all.
pub(super) fn fixture_fetcher() -> InMemorySeriesFetcher {
    InMemorySeriesFetcher::default()
        .with_series(
            "VN",
            GDP_GROWTH_CODE,
            annual(&[(2020, 2.87), (2022, 8.02), (2023, 5.05)]),
        )
        .with_series(
            "VN",
            INFLATION_CODE,
            annual(&[(2020, 3.22), (2022, 3.16), (2023, 3.25)]),
        )
        .with_series(
            "VN",
            UNEMPLOYMENT_CODE,
            annual(&[(2022, 1.53), (2023, 1.6)]),
        )
        .with_series("VN", DEBT_CODE, annual(&[(2020, 40.9)]))
        .with_series("TH", GDP_GROWTH_CODE, annual(&[(2022, 2.5), (2023, 1.9)]))
        .with_series("TH", INFLATION_CODE, annual(&[(2022, 6.08), (2023, 1.23)]))
        .with_series("TH", UNEMPLOYMENT_CODE, annual(&[(2023, 0.98)]))
        .with_series("TH", DEBT_CODE, annual(&[(2022, 60.5), (2023, 62.0)]))
        .with_series(
            "VN",
            GDP_CURRENT_CODE,
            annual(&[(2021, 366e9), (2022, 409e9)]),
        )
        .with_series("TH", GDP_CURRENT_CODE, annual(&[(2022, 495e9)]))
        .with_series("VN", POPULATION_CODE, annual(&[(2022, 98_186_856.0)]))
}

pub(super) fn engine() -> GradingEngine {
    let catalog = IndicatorCatalog::standard(ScoreVariant::GovernmentDebt).expect("catalog");
    GradingEngine::new(Arc::new(catalog))
}

pub(super) fn build_service() -> Arc<CompassService<InMemorySeriesFetcher>> {
    Arc::new(CompassService::new(engine(), fixture_fetcher()))
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("json body")
}
