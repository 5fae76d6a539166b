//! Scorecard, comparison, explorer, and rubric views plus their HTTP routes.
//!
//! [`CompassService`] fetches every series a view needs concurrently, then
//! grades synchronously through the shared [`GradingEngine`](crate::grading::GradingEngine).

mod comparison;
mod error;
mod explorer;
pub mod router;
mod rubric;
mod scorecard;
mod selection;
mod service;

#[cfg(test)]
mod tests;

pub use comparison::{Comparison, ComparisonRow, Side};
pub use error::ViewError;
pub use explorer::{ExplorerPanel, ExplorerRequest, ExplorerRow, ExplorerView};
pub use router::{
    compass_router, AggregateRequest, AggregateResponse, ClassifyRequest, ClassifyResponse,
};
pub use rubric::{Rubric, RubricCell, RubricRow, RUBRIC_TITLE};
pub use scorecard::{IndicatorScore, Scorecard, SUMMARY_UNAVAILABLE};
pub use selection::SelectionPolicy;
pub use service::{load_catalog, CompassService, LiveCompassService};
