use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::ViewError;
use super::explorer::ExplorerRequest;
use super::selection::SelectionPolicy;
use super::service::CompassService;
use crate::catalog::{Country, IndicatorDefinition, SeriesDefinition};
use crate::grading::Grade;
use crate::series::YearRange;

/// Router builder exposing the read-only views and the grading endpoints.
pub fn compass_router<F>(service: Arc<CompassService<F>>) -> Router
where
    F: crate::series::SeriesFetcher + 'static,
{
    Router::new()
        .route("/api/v1/countries", get(countries_handler::<F>))
        .route("/api/v1/indicators", get(indicators_handler::<F>))
        .route("/api/v1/rubric", get(rubric_handler::<F>))
        .route("/api/v1/scorecard/:country", get(scorecard_handler::<F>))
        .route("/api/v1/comparison", get(comparison_handler::<F>))
        .route("/api/v1/explorer", get(explorer_handler::<F>))
        .route("/api/v1/grades/classify", post(classify_handler::<F>))
        .route("/api/v1/grades/aggregate", post(aggregate_handler::<F>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct YearQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonQuery {
    pub left: String,
    pub right: String,
    pub year: Option<i32>,
}

/// `countries` and `indicators` are comma-separated lists.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExplorerQuery {
    pub countries: Option<String>,
    pub start: Option<i32>,
    pub end: Option<i32>,
    pub indicators: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub indicator: String,
    /// `null` grades as unavailable.
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub indicator: String,
    pub value: Option<f64>,
    pub grade: Grade,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub grades: Vec<Grade>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub overall: Grade,
    /// Letters that contributed to the average.
    pub counted: usize,
}

#[derive(Debug, Serialize)]
struct IndicatorsView<'a> {
    score: &'a [IndicatorDefinition],
    explore: &'a [SeriesDefinition],
}

/// Extractor failures get the same `{"error": ...}` body as view errors.
fn rejected(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn explorer_request(
    query: ExplorerQuery,
    default_range: YearRange,
) -> Result<ExplorerRequest, ViewError> {
    let years = match (query.start, query.end) {
        (None, None) => None,
        (start, end) => Some(YearRange::new(
            start.unwrap_or(default_range.start),
            end.unwrap_or(default_range.end),
        )?),
    };

    Ok(ExplorerRequest {
        countries: split_list(query.countries.as_deref()),
        years,
        indicators: split_list(query.indicators.as_deref()),
    })
}

pub(crate) async fn countries_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
) -> Json<Vec<Country>>
where
    F: crate::series::SeriesFetcher + 'static,
{
    Json(service.countries().countries().to_vec())
}

pub(crate) async fn indicators_handler<F>(State(service): State<Arc<CompassService<F>>>) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let view = IndicatorsView {
        score: service.engine().catalog().definitions(),
        explore: service.explore_catalog().series(),
    };
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn rubric_handler<F>(State(service): State<Arc<CompassService<F>>>) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    (StatusCode::OK, Json(service.rubric())).into_response()
}

pub(crate) async fn scorecard_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
    Path(country): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    match service
        .scorecard(&country, SelectionPolicy::from_year(query.year))
        .await
    {
        Ok(scorecard) => (StatusCode::OK, Json(scorecard)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn comparison_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
    query: Result<Query<ComparisonQuery>, QueryRejection>,
) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    match service
        .comparison(
            &query.left,
            &query.right,
            SelectionPolicy::from_year(query.year),
        )
        .await
    {
        Ok(comparison) => (StatusCode::OK, Json(comparison)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn explorer_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
    query: Result<Query<ExplorerQuery>, QueryRejection>,
) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let request = match explorer_request(query, service.explorer_config().default_range) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match service.explorer(request).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn classify_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
    request: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    match service
        .engine()
        .classify_observation(&request.indicator, request.value)
    {
        Ok(grade) => {
            let body = ClassifyResponse {
                indicator: request.indicator,
                value: request.value,
                grade,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => ViewError::from(error).into_response(),
    }
}

pub(crate) async fn aggregate_handler<F>(
    State(service): State<Arc<CompassService<F>>>,
    request: Result<Json<AggregateRequest>, JsonRejection>,
) -> Response
where
    F: crate::series::SeriesFetcher + 'static,
{
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let counted = request
        .grades
        .iter()
        .filter(|grade| grade.is_available())
        .count();
    let overall = service.engine().aggregate(request.grades);
    (StatusCode::OK, Json(AggregateResponse { overall, counted })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_query_fills_open_year_bounds() {
        let default_range = YearRange::new(2005, 2023).expect("range");
        let request = explorer_request(
            ExplorerQuery {
                countries: Some("Vietnam, TH,,".to_string()),
                start: Some(2010),
                end: None,
                indicators: None,
            },
            default_range,
        )
        .expect("request builds");

        assert_eq!(request.countries, vec!["Vietnam", "TH"]);
        assert_eq!(request.years, Some(YearRange::new(2010, 2023).expect("range")));
        assert!(request.indicators.is_empty());
    }

    #[test]
    fn explorer_query_rejects_inverted_range() {
        let default_range = YearRange::new(2005, 2023).expect("range");
        let result = explorer_request(
            ExplorerQuery {
                start: Some(2020),
                end: Some(2010),
                ..ExplorerQuery::default()
            },
            default_range,
        );
        assert!(matches!(result, Err(ViewError::InvalidYearRange(_))));
    }
}
