use super::error::CatalogError;
use super::indicator::{Band, IndicatorCatalog, IndicatorDefinition, Polarity};
use crate::grading::Letter;
use serde::Serialize;

pub const GDP_GROWTH: &str = "GDP Growth (%)";
pub const INFLATION: &str = "Inflation (%)";
pub const UNEMPLOYMENT: &str = "Unemployment (%)";
pub const GOVERNMENT_DEBT: &str = "Gov Debt (% of GDP)";
pub const INTEREST_RATE: &str = "Interest Rate (%)";

/// Deployment flavour deciding the fourth scored indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreVariant {
    #[default]
    GovernmentDebt,
    InterestRate,
}

impl ScoreVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debt" | "government-debt" | "gov-debt" => Some(Self::GovernmentDebt),
            "interest-rate" | "interest" | "rate" => Some(Self::InterestRate),
            _ => None,
        }
    }
}

fn bands(pairs: &[(f64, Letter)]) -> Vec<Band> {
    pairs
        .iter()
        .map(|&(threshold, grade)| Band::new(threshold, grade))
        .collect()
}

/// Inflation is the only lower-is-better indicator. Unemployment and debt
/// keep their ascending band tables under `>=`, so any non-negative value
/// takes the first band and negative values fall through to the last one.
fn standard_definitions(variant: ScoreVariant) -> Vec<IndicatorDefinition> {
    use Letter::*;

    let mut definitions = vec![
        IndicatorDefinition::new(
            GDP_GROWTH,
            "NY.GDP.MKTP.KD.ZG",
            Polarity::HigherIsBetter,
            bands(&[(6.0, A), (4.0, B), (2.0, C), (0.0, D), (-100.0, E)]),
        ),
        IndicatorDefinition::new(
            INFLATION,
            "FP.CPI.TOTL.ZG",
            Polarity::LowerIsBetter,
            bands(&[(0.0, E), (2.0, D), (4.0, C), (6.0, B), (100.0, A)]),
        ),
        IndicatorDefinition::new(
            UNEMPLOYMENT,
            "SL.UEM.TOTL.ZS",
            Polarity::HigherIsBetter,
            bands(&[(0.0, A), (3.0, B), (5.0, C), (7.0, D), (100.0, E)]),
        ),
    ];

    definitions.push(match variant {
        ScoreVariant::GovernmentDebt => IndicatorDefinition::new(
            GOVERNMENT_DEBT,
            "GC.DOD.TOTL.GD.ZS",
            Polarity::HigherIsBetter,
            bands(&[(30.0, A), (50.0, B), (70.0, C), (90.0, D), (1000.0, E)]),
        ),
        ScoreVariant::InterestRate => IndicatorDefinition::new(
            INTEREST_RATE,
            "FR.INR.DPST",
            Polarity::HigherIsBetter,
            bands(&[(8.0, A), (6.0, B), (4.0, C), (2.0, D), (-100.0, E)]),
        ),
    });

    definitions
}

impl IndicatorCatalog {
    pub fn standard(variant: ScoreVariant) -> Result<Self, CatalogError> {
        Self::new(standard_definitions(variant))
    }
}

/// A charted, ungraded series in the explorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDefinition {
    pub name: String,
    pub provider_code: String,
    pub unit: String,
    /// Raw provider values are divided by this before display.
    pub scale: f64,
}

impl SeriesDefinition {
    pub fn new(name: &str, provider_code: &str, unit: &str, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            provider_code: provider_code.to_string(),
            unit: unit.to_string(),
            scale,
        }
    }

    pub fn scaled(&self, raw: f64) -> f64 {
        raw / self.scale
    }
}

#[derive(Debug, Clone)]
pub struct ExploreCatalog {
    series: Vec<SeriesDefinition>,
}

impl ExploreCatalog {
    pub fn new(series: Vec<SeriesDefinition>) -> Self {
        Self { series }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            SeriesDefinition::new("GDP (current $ Billion)", "NY.GDP.MKTP.CD", "US$ bn", 1e9),
            SeriesDefinition::new("Inflation (% annual)", "FP.CPI.TOTL.ZG", "%", 1.0),
            SeriesDefinition::new("Population", "SP.POP.TOTL", "people", 1.0),
            SeriesDefinition::new(
                "Unemployment (% of labor force)",
                "SL.UEM.TOTL.ZS",
                "%",
                1.0,
            ),
            SeriesDefinition::new(
                "Interest Rate (proxy - deposit rate)",
                "FR.INR.DPST",
                "%",
                1.0,
            ),
            SeriesDefinition::new("Exchange Rate (LCU per USD)", "PA.NUS.FCRF", "LCU", 1.0),
            SeriesDefinition::new(
                "Government Debt (% of GDP)",
                "GC.DOD.TOTL.GD.ZS",
                "% of GDP",
                1.0,
            ),
        ])
    }

    pub fn lookup(&self, name: &str) -> Result<&SeriesDefinition, CatalogError> {
        self.series
            .iter()
            .find(|series| series.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CatalogError::UnknownSeries(name.to_string()))
    }

    pub fn series(&self) -> &[SeriesDefinition] {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogs_validate_for_every_variant() {
        let debt = IndicatorCatalog::standard(ScoreVariant::GovernmentDebt).expect("debt");
        let names: Vec<_> = debt.names().collect();
        assert_eq!(names, [GDP_GROWTH, INFLATION, UNEMPLOYMENT, GOVERNMENT_DEBT]);

        let rate = IndicatorCatalog::standard(ScoreVariant::InterestRate).expect("rate");
        assert!(rate.lookup(INTEREST_RATE).is_ok());
        assert!(rate.lookup(GOVERNMENT_DEBT).is_err());
    }

    #[test]
    fn every_standard_indicator_carries_five_bands() {
        let catalog = IndicatorCatalog::standard(ScoreVariant::GovernmentDebt).expect("catalog");
        assert!(catalog
            .definitions()
            .iter()
            .all(|definition| definition.bands.len() == 5));
    }

    #[test]
    fn only_inflation_is_lower_is_better() {
        for variant in [ScoreVariant::GovernmentDebt, ScoreVariant::InterestRate] {
            let catalog = IndicatorCatalog::standard(variant).expect("catalog");
            let lower: Vec<_> = catalog
                .definitions()
                .iter()
                .filter(|definition| definition.polarity == Polarity::LowerIsBetter)
                .map(|definition| definition.name.as_str())
                .collect();
            assert_eq!(lower, [INFLATION]);
        }
    }

    #[test]
    fn variant_parsing_accepts_aliases() {
        assert_eq!(ScoreVariant::parse("Debt"), Some(ScoreVariant::GovernmentDebt));
        assert_eq!(
            ScoreVariant::parse("interest-rate"),
            Some(ScoreVariant::InterestRate)
        );
        assert_eq!(ScoreVariant::parse("fx"), None);
    }

    #[test]
    fn gdp_series_is_scaled_to_billions() {
        let explore = ExploreCatalog::standard();
        let gdp = explore.lookup("gdp (current $ billion)").expect("gdp series");
        assert_eq!(gdp.scaled(366_000_000_000.0), 366.0);
        assert_eq!(explore.series().len(), 7);
    }
}
