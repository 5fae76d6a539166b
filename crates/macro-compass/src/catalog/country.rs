use super::error::CatalogError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Country {
    pub display_name: String,
    pub provider_code: String,
}

impl Country {
    pub fn new(display_name: impl Into<String>, provider_code: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            provider_code: provider_code.into(),
        }
    }
}

/// Countries the views may be requested for, in display order.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    countries: Vec<Country>,
}

impl CountryRegistry {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Country::new("Vietnam", "VN"),
            Country::new("Indonesia", "ID"),
            Country::new("Philippines", "PH"),
            Country::new("Thailand", "TH"),
            Country::new("Malaysia", "MY"),
        ])
    }

    /// Resolves a display name or provider code, ignoring case.
    pub fn lookup(&self, query: &str) -> Result<&Country, CatalogError> {
        let query = query.trim();
        self.countries
            .iter()
            .find(|country| {
                country.display_name.eq_ignore_ascii_case(query)
                    || country.provider_code.eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| CatalogError::UnknownCountry(query.to_string()))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn first(&self) -> Option<&Country> {
        self.countries.first()
    }
}
