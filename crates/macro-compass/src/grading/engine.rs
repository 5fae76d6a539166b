use super::aggregate::aggregate;
use super::grade::Grade;
use super::insights::{strengths_and_risks, StrengthsAndRisks};
use crate::catalog::{IndicatorCatalog, IndicatorDefinition};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    #[error("indicator '{0}' is not registered in the catalog")]
    UnknownIndicator(String),
    #[error("indicator '{0}' has no band for this value; the catalog is malformed")]
    NoMatchingBand(String),
}

/// Stateless grader over a shared, validated catalog.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    catalog: Arc<IndicatorCatalog>,
}

impl GradingEngine {
    pub fn new(catalog: Arc<IndicatorCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn definition(&self, indicator: &str) -> Result<&IndicatorDefinition, GradingError> {
        self.catalog
            .lookup(indicator)
            .map_err(|_| GradingError::UnknownIndicator(indicator.to_string()))
    }

    /// Grades `value` against the indicator's bands in their declared order.
    ///
    /// Non-finite values are treated as missing data and yield `Unavailable`.
    /// A value no band admits is a catalog defect, reported as
    /// [`GradingError::NoMatchingBand`] rather than a grade.
    pub fn classify(&self, indicator: &str, value: f64) -> Result<Grade, GradingError> {
        let definition = self.definition(indicator)?;
        if !value.is_finite() {
            return Ok(Grade::Unavailable);
        }

        definition
            .letter_for(value)
            .map(Grade::Graded)
            .ok_or_else(|| GradingError::NoMatchingBand(indicator.to_string()))
    }

    /// Like [`classify`](Self::classify) but for a possibly missing value.
    pub fn classify_observation(
        &self,
        indicator: &str,
        value: Option<f64>,
    ) -> Result<Grade, GradingError> {
        match value {
            Some(value) => self.classify(indicator, value),
            None => {
                self.definition(indicator)?;
                Ok(Grade::Unavailable)
            }
        }
    }

    pub fn aggregate<I>(&self, grades: I) -> Grade
    where
        I: IntoIterator<Item = Grade>,
    {
        aggregate(grades)
    }

    pub fn strengths_and_risks<'a, I>(&self, results: I) -> StrengthsAndRisks
    where
        I: IntoIterator<Item = (&'a str, Grade)>,
    {
        strengths_and_risks(results)
    }
}
