use crate::catalog::{Country, SeriesDefinition};
use crate::series::{Series, YearRange};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;

/// Explorer inputs as given by a caller, before resolution.
///
/// Empty `countries` selects the default country; empty `indicators`
/// selects every explore series. `years` falls back to the configured
/// default range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerRequest {
    pub countries: Vec<String>,
    pub years: Option<YearRange>,
    pub indicators: Vec<String>,
}

/// One year of a panel; `values` follows the panel's `countries` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerRow {
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerPanel {
    pub indicator: String,
    pub provider_code: String,
    pub unit: String,
    pub countries: Vec<String>,
    pub rows: Vec<ExplorerRow>,
}

impl ExplorerPanel {
    /// Outer-joins each country's series on year. Years no country reports
    /// are omitted; a country missing a reported year shows `None`.
    pub(crate) fn join(
        definition: &SeriesDefinition,
        countries: &[Country],
        series: Vec<Series>,
        years: YearRange,
    ) -> Self {
        let mut table: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
        for (column, series) in series.iter().enumerate() {
            for observation in series.within(years).observations() {
                let row = table
                    .entry(observation.year())
                    .or_insert_with(|| vec![None; countries.len()]);
                if let Some(cell) = row.get_mut(column) {
                    *cell = Some(definition.scaled(observation.value));
                }
            }
        }

        Self {
            indicator: definition.name.clone(),
            provider_code: definition.provider_code.clone(),
            unit: definition.unit.clone(),
            countries: countries
                .iter()
                .map(|country| country.display_name.clone())
                .collect(),
            rows: table
                .into_iter()
                .map(|(year, values)| ExplorerRow { year, values })
                .collect(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Writes `year,<country>...` rows; missing cells are left empty.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.countries.len() + 1);
        header.push("year".to_string());
        header.extend(self.countries.iter().cloned());
        csv.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.values.len() + 1);
            record.push(row.year.to_string());
            record.extend(
                row.values
                    .iter()
                    .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
            );
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerView {
    pub years: YearRange,
    pub countries: Vec<Country>,
    /// Set when more countries were requested than the explorer charts.
    pub truncated: bool,
    pub panels: Vec<ExplorerPanel>,
}

impl ExplorerView {
    pub fn has_data(&self) -> bool {
        self.panels.iter().any(ExplorerPanel::has_data)
    }

    pub fn panel(&self, indicator: &str) -> Option<&ExplorerPanel> {
        self.panels
            .iter()
            .find(|panel| panel.indicator.eq_ignore_ascii_case(indicator))
    }
}
