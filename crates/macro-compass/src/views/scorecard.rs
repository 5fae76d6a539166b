use super::selection::SelectionPolicy;
use crate::catalog::Country;
use crate::grading::{Grade, GradingEngine};
use serde::Serialize;

pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable due to missing data.";

/// One graded indicator on a scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorScore {
    pub indicator: String,
    pub provider_code: String,
    pub value: Option<f64>,
    pub year: Option<i32>,
    pub grade: Grade,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scorecard {
    pub country: Country,
    pub selection: SelectionPolicy,
    pub indicators: Vec<IndicatorScore>,
    pub overall: Grade,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Scorecard {
    pub(crate) fn assemble(
        engine: &GradingEngine,
        country: Country,
        selection: SelectionPolicy,
        indicators: Vec<IndicatorScore>,
    ) -> Self {
        let overall = engine.aggregate(indicators.iter().map(|score| score.grade));
        let partition = engine.strengths_and_risks(
            indicators
                .iter()
                .map(|score| (score.indicator.as_str(), score.grade)),
        );
        let complete = indicators.iter().all(|score| score.grade.is_available());
        let summary = complete.then(|| partition.summary(&country.display_name));

        Self {
            country,
            selection,
            indicators,
            overall,
            strengths: partition.strengths,
            risks: partition.risks,
            summary,
        }
    }

    pub fn score(&self, indicator: &str) -> Option<&IndicatorScore> {
        self.indicators
            .iter()
            .find(|score| score.indicator == indicator)
    }

    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(SUMMARY_UNAVAILABLE)
    }
}

/// Values are shown and graded at two decimal places.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
