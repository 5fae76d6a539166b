use super::error::CatalogError;
use crate::grading::Letter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Comparison direction used when walking an indicator's bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// A band matches when `value >= threshold`.
    HigherIsBetter,
    /// A band matches when `value <= threshold`.
    LowerIsBetter,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "Higher is better",
            Self::LowerIsBetter => "Lower is better",
        }
    }

    pub(crate) fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::HigherIsBetter => value >= threshold,
            Self::LowerIsBetter => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: f64,
    pub grade: Letter,
}

impl Band {
    pub const fn new(threshold: f64, grade: Letter) -> Self {
        Self { threshold, grade }
    }
}

/// A graded indicator. Bands are evaluated in the order given here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub name: String,
    pub provider_code: String,
    pub polarity: Polarity,
    pub bands: Vec<Band>,
}

impl IndicatorDefinition {
    pub fn new(
        name: impl Into<String>,
        provider_code: impl Into<String>,
        polarity: Polarity,
        bands: Vec<Band>,
    ) -> Self {
        Self {
            name: name.into(),
            provider_code: provider_code.into(),
            polarity,
            bands,
        }
    }

    /// The final band. It absorbs every value no earlier band matched.
    pub fn catch_all(&self) -> Option<&Band> {
        self.bands.last()
    }

    /// Letter for a finite value: the first matching band, else the catch-all.
    /// `None` only when the definition has no bands at all.
    pub(crate) fn letter_for(&self, value: f64) -> Option<Letter> {
        self.bands
            .iter()
            .find(|band| self.polarity.matches(value, band.threshold))
            .or_else(|| self.catch_all())
            .map(|band| band.grade)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let last = self
            .catch_all()
            .ok_or_else(|| CatalogError::EmptyBands(self.name.clone()))?;

        if let Some(position) = self
            .bands
            .iter()
            .position(|band| !band.threshold.is_finite())
        {
            return Err(CatalogError::NonFiniteThreshold {
                indicator: self.name.clone(),
                position,
            });
        }

        // The catch-all is positional: it must carry the sentinel threshold,
        // the smallest or largest of the list.
        let sentinel = self.bands.iter().all(|band| last.threshold <= band.threshold)
            || self.bands.iter().all(|band| last.threshold >= band.threshold);
        if !sentinel {
            return Err(CatalogError::MissingCatchAll {
                indicator: self.name.clone(),
                last: last.threshold,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    indicators: Vec<IndicatorDefinition>,
}

/// Immutable, validated registry of graded indicators.
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    definitions: Vec<IndicatorDefinition>,
}

impl IndicatorCatalog {
    pub fn new(definitions: Vec<IndicatorDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(CatalogError::DuplicateIndicator(definition.name.clone()));
            }
            definition.validate()?;
        }

        Ok(Self { definitions })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::new(document.indicators)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn lookup(&self, name: &str) -> Result<&IndicatorDefinition, CatalogError> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
            .ok_or_else(|| CatalogError::UnknownIndicator(name.to_string()))
    }

    pub fn definitions(&self) -> &[IndicatorDefinition] {
        &self.definitions
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .map(|definition| definition.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
