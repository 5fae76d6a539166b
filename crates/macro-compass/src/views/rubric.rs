use crate::catalog::{IndicatorCatalog, IndicatorDefinition, Polarity};
use crate::grading::Letter;
use serde::Serialize;

pub const RUBRIC_TITLE: &str = "How we score each macro indicator";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RubricCell {
    pub grade: Letter,
    /// Human-readable value range, e.g. `4 to < 6`.
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RubricRow {
    pub indicator: String,
    pub polarity: Polarity,
    pub polarity_label: String,
    pub bands: Vec<RubricCell>,
}

/// Band table derived from the active catalog, so it never drifts from
/// what the grader actually does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rubric {
    pub title: String,
    pub rows: Vec<RubricRow>,
}

impl Rubric {
    pub fn from_catalog(catalog: &IndicatorCatalog) -> Self {
        Self {
            title: RUBRIC_TITLE.to_string(),
            rows: catalog.definitions().iter().map(rubric_row).collect(),
        }
    }

    pub fn row(&self, indicator: &str) -> Option<&RubricRow> {
        self.rows.iter().find(|row| row.indicator == indicator)
    }
}

fn rubric_row(definition: &IndicatorDefinition) -> RubricRow {
    let polarity = definition.polarity;
    let last = definition.bands.len().saturating_sub(1);

    let bands = definition
        .bands
        .iter()
        .enumerate()
        .map(|(position, band)| {
            let earlier = &definition.bands[..position];
            // Loosest bound any earlier band already claimed.
            let claimed = earlier
                .iter()
                .map(|b| b.threshold)
                .reduce(|acc, t| match polarity {
                    Polarity::HigherIsBetter => acc.min(t),
                    Polarity::LowerIsBetter => acc.max(t),
                });

            let range = match (claimed, position == last) {
                (None, true) => "any value".to_string(),
                (None, false) => match polarity {
                    Polarity::HigherIsBetter => format!(">= {}", band.threshold),
                    Polarity::LowerIsBetter => format!("<= {}", band.threshold),
                },
                (Some(bound), true) => match polarity {
                    Polarity::HigherIsBetter => format!("< {bound}"),
                    Polarity::LowerIsBetter => format!("> {bound}"),
                },
                (Some(bound), false) => match polarity {
                    Polarity::HigherIsBetter if band.threshold < bound => {
                        format!("{} to < {bound}", band.threshold)
                    }
                    Polarity::LowerIsBetter if band.threshold > bound => {
                        format!("> {bound} to <= {}", band.threshold)
                    }
                    _ => "unreachable".to_string(),
                },
            };

            RubricCell {
                grade: band.grade,
                range,
            }
        })
        .collect();

    RubricRow {
        indicator: definition.name.clone(),
        polarity,
        polarity_label: polarity.label().to_string(),
        bands,
    }
}
