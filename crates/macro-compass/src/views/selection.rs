use crate::series::{Observation, Series};
use serde::{Deserialize, Serialize};

/// Which observation of a series feeds the grader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", content = "year", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Most recent observation the provider has.
    #[default]
    Latest,
    /// Observation for exactly this year; absent years are unavailable.
    Year(i32),
}

impl SelectionPolicy {
    pub fn from_year(year: Option<i32>) -> Self {
        year.map(Self::Year).unwrap_or_default()
    }

    pub fn select<'a>(&self, series: &'a Series) -> Option<&'a Observation> {
        match self {
            Self::Latest => series.latest(),
            Self::Year(year) => series.for_year(*year),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Latest => "latest available".to_string(),
            Self::Year(year) => year.to_string(),
        }
    }
}
