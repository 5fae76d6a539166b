/// Failures raised while building or querying the static registries.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown indicator '{0}'")]
    UnknownIndicator(String),
    #[error("unknown country '{0}'")]
    UnknownCountry(String),
    #[error("unknown explore series '{0}'")]
    UnknownSeries(String),
    #[error("indicator '{0}' has no bands")]
    EmptyBands(String),
    #[error("indicator '{indicator}' has a non-finite threshold in band {position}")]
    NonFiniteThreshold { indicator: String, position: usize },
    #[error(
        "indicator '{indicator}' must end with a catch-all band (last threshold {last} is neither the smallest nor the largest)"
    )]
    MissingCatchAll { indicator: String, last: f64 },
    #[error("indicator '{0}' is registered more than once")]
    DuplicateIndicator(String),
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog document: {0}")]
    Io(#[from] std::io::Error),
}
