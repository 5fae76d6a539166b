use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Annual observation dated January 1st of `year`.
    pub fn annual(year: i32, value: f64) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1).map(|date| Self { date, value })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Observations for one country/indicator pair, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorts by date and drops non-finite values.
    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        observations.retain(|observation| observation.value.is_finite());
        observations.sort_by_key(|observation| observation.date);
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Latest observation falling in `year`. Sub-annual series resolve to
    /// the last period of that year.
    pub fn for_year(&self, year: i32) -> Option<&Observation> {
        self.observations
            .iter()
            .rev()
            .find(|observation| observation.year() == year)
    }

    pub fn within(&self, range: YearRange) -> Series {
        Series {
            observations: self
                .observations
                .iter()
                .filter(|observation| range.contains(observation.year()))
                .copied()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("year range start {start} is after end {end}")]
pub struct InvalidYearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, InvalidYearRange> {
        if start > end {
            return Err(InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Whether `self` lies entirely inside `bounds`.
    pub fn is_within(&self, bounds: YearRange) -> bool {
        bounds.contains(self.start) && bounds.contains(self.end)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
