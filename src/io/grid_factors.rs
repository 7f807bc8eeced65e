// src/io/grid_factors.rs

use crate::constants::DEFAULT_COUNTRY;
use crate::error::DataError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Which grid emission factor feeds the EV model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Combined-margin intensity of the whole generation mix.
    #[default]
    Average,
    /// Operating-margin intensity of the plants that respond to new load.
    Marginal,
}

/// One row of the per-country grid factor table (g CO2/kWh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFactor {
    pub country: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub carbon_intensity_average: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub carbon_intensity_marginal: Option<f64>,
}

impl GridFactor {
    /// Picks the factor for `mode`.
    ///
    /// | mode     | marginal | average | result   |
    /// |----------|----------|---------|----------|
    /// | Marginal | Some(m)  | any     | m        |
    /// | Marginal | None     | Some(a) | a        |
    /// | Average  | any      | Some(a) | a        |
    /// | Average  | Some(m)  | None    | m        |
    /// | any      | None     | None    | error    |
    ///
    /// A literal zero is a real value (fully renewable grid), never a gap.
    pub fn resolve(&self, mode: GridMode) -> Result<f64, DataError> {
        let (preferred, fallback) = match mode {
            GridMode::Average => (self.carbon_intensity_average, self.carbon_intensity_marginal),
            GridMode::Marginal => (self.carbon_intensity_marginal, self.carbon_intensity_average),
        };
        match (preferred, fallback) {
            (Some(value), _) => Ok(value),
            (None, Some(value)) => {
                warn!(
                    "{}: no {:?} grid factor, falling back to {value:.1} g/kWh",
                    self.country, mode
                );
                Ok(value)
            }
            (None, None) => Err(DataError::MissingIntensity {
                country: self.country.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFactorTable {
    rows: Vec<GridFactor>,
}

impl GridFactorTable {
    pub fn new(rows: Vec<GridFactor>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| !row.country.trim().is_empty())
            .collect();
        Self { rows }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_csv(reader).map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded {} grid factors from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<GridFactor>, csv::Error>>()?;
        Ok(Self::new(rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[GridFactor] {
        &self.rows
    }

    pub fn get(&self, country: &str) -> Option<&GridFactor> {
        self.rows.iter().find(|row| row.country == country)
    }

    /// The country shown first: the default one if present, else the first row.
    pub fn default_country(&self) -> Option<&str> {
        self.get(DEFAULT_COUNTRY)
            .or_else(|| self.rows.first())
            .map(|row| row.country.as_str())
    }

    /// Mean of every known average factor.
    pub fn mean_average(&self) -> Option<f64> {
        let known: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row.carbon_intensity_average)
            .collect();
        if known.is_empty() {
            return None;
        }
        Some(known.iter().sum::<f64>() / known.len() as f64)
    }

    /// Grid intensity for `country`; unknown countries get the table mean.
    pub fn intensity_for(&self, country: &str, mode: GridMode) -> Result<f64, DataError> {
        if let Some(row) = self.get(country) {
            return row.resolve(mode);
        }
        let mean = self.mean_average().ok_or(DataError::EmptyGridTable)?;
        warn!("unknown country {country:?}, using table mean {mean:.1} g/kWh");
        Ok(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
country,carbon_intensity_average,carbon_intensity_marginal
United States,386.0,540.0
Norway,0.0,0.0
Iceland,28.0,
Atlantis,,
,100.0,100.0
Chile,n/a,300.0
";

    fn table() -> GridFactorTable {
        GridFactorTable::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn drops_rows_without_country() {
        assert_eq!(table().len(), 5);
    }

    #[test]
    fn marginal_null_falls_back_to_average() {
        let t = table();
        assert_eq!(t.intensity_for("Iceland", GridMode::Marginal).unwrap(), 28.0);
        assert_eq!(t.intensity_for("United States", GridMode::Marginal).unwrap(), 540.0);
    }

    #[test]
    fn renewable_zero_is_preserved() {
        let t = table();
        assert_eq!(t.intensity_for("Norway", GridMode::Average).unwrap(), 0.0);
        assert_eq!(t.intensity_for("Norway", GridMode::Marginal).unwrap(), 0.0);
    }

    #[test]
    fn unparseable_cells_read_as_missing() {
        let t = table();
        let chile = t.get("Chile").unwrap();
        assert_eq!(chile.carbon_intensity_average, None);
        assert_eq!(t.intensity_for("Chile", GridMode::Average).unwrap(), 300.0);
    }

    #[test]
    fn fully_missing_row_is_an_error() {
        assert!(matches!(
            table().intensity_for("Atlantis", GridMode::Average),
            Err(DataError::MissingIntensity { .. })
        ));
    }

    #[test]
    fn unknown_country_uses_mean_of_averages() {
        let mean = (386.0 + 0.0 + 28.0) / 3.0;
        let got = table().intensity_for("Nowhere", GridMode::Marginal).unwrap();
        assert!((got - mean).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_no_fallback() {
        assert!(matches!(
            GridFactorTable::default().intensity_for("Nowhere", GridMode::Average),
            Err(DataError::EmptyGridTable)
        ));
    }

    #[test]
    fn default_country_prefers_united_states() {
        assert_eq!(table().default_country(), Some("United States"));
        let other = GridFactorTable::new(vec![GridFactor {
            country: "France".into(),
            carbon_intensity_average: Some(56.0),
            carbon_intensity_marginal: None,
        }]);
        assert_eq!(other.default_country(), Some("France"));
    }
}
