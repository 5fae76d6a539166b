use crate::catalog::CatalogError;
use crate::grading::GradingError;
use crate::series::{InvalidYearRange, YearRange};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error("cannot compare {0} with itself; choose two different countries")]
    SameCountry(String),
    #[error(transparent)]
    InvalidYearRange(#[from] InvalidYearRange),
    #[error("year range {requested} is outside the supported range {bounds}")]
    YearOutOfBounds {
        requested: YearRange,
        bounds: YearRange,
    },
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewError::Catalog(
                CatalogError::UnknownCountry(_)
                | CatalogError::UnknownIndicator(_)
                | CatalogError::UnknownSeries(_),
            )
            | ViewError::Grading(GradingError::UnknownIndicator(_)) => StatusCode::NOT_FOUND,
            ViewError::SameCountry(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ViewError::InvalidYearRange(_) | ViewError::YearOutOfBounds { .. } => {
                StatusCode::BAD_REQUEST
            }
            ViewError::Catalog(_) | ViewError::Grading(GradingError::NoMatchingBand(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_errors_split_between_caller_and_catalog_faults() {
        let unknown = ViewError::from(GradingError::UnknownIndicator("X".to_string()));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let malformed = ViewError::from(GradingError::NoMatchingBand("X".to_string()));
        assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
