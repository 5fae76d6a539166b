//! Static registries: graded indicators, explore series, and countries.

mod country;
mod error;
mod indicator;
mod standard;

pub use country::{Country, CountryRegistry};
pub use error::CatalogError;
pub use indicator::{Band, IndicatorCatalog, IndicatorDefinition, Polarity};
pub use standard::{
    ExploreCatalog, ScoreVariant, SeriesDefinition, GDP_GROWTH, GOVERNMENT_DEBT, INFLATION,
    INTEREST_RATE, UNEMPLOYMENT,
};
