// src/io/manufacturing.rs

use crate::constants::{
    EV_SEDAN_BATTERY_KG, EV_SEDAN_FLUIDS_KG, EV_SEDAN_TOTAL_KG, ICE_SEDAN_BATTERY_KG,
    ICE_SEDAN_FLUIDS_KG, ICE_SEDAN_TOTAL_KG,
};
use crate::error::DataError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Ice,
    Ev,
}

impl VehicleKind {
    pub fn table_key(self) -> &'static str {
        match self {
            Self::Ice => "ICE_Sedan",
            Self::Ev => "EV_Sedan",
        }
    }
}

/// Production emissions for one vehicle type (kg CO2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingBaseline {
    pub vehicle_type: String,
    pub total_manufacturing_co2_kg: f64,
    pub battery_manufacturing_co2_kg: f64,
    pub fluids_co2_kg: f64,
    pub glider_co2_kg: f64,
}

impl ManufacturingBaseline {
    /// Glider is whatever is left of the total after battery and fluids.
    pub fn with_residual_glider(vehicle_type: &str, total: f64, battery: f64, fluids: f64) -> Self {
        Self {
            vehicle_type: vehicle_type.to_string(),
            total_manufacturing_co2_kg: total,
            battery_manufacturing_co2_kg: battery,
            fluids_co2_kg: fluids,
            glider_co2_kg: total - battery - fluids,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturingTable {
    rows: Vec<ManufacturingBaseline>,
}

impl Default for ManufacturingTable {
    fn default() -> Self {
        Self::baseline()
    }
}

impl ManufacturingTable {
    /// Built-in sedan baselines.
    pub fn baseline() -> Self {
        Self {
            rows: vec![
                ManufacturingBaseline::with_residual_glider(
                    VehicleKind::Ice.table_key(),
                    ICE_SEDAN_TOTAL_KG,
                    ICE_SEDAN_BATTERY_KG,
                    ICE_SEDAN_FLUIDS_KG,
                ),
                ManufacturingBaseline::with_residual_glider(
                    VehicleKind::Ev.table_key(),
                    EV_SEDAN_TOTAL_KG,
                    EV_SEDAN_BATTERY_KG,
                    EV_SEDAN_FLUIDS_KG,
                ),
            ],
        }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let to_data_error = |source: csv::Error| DataError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let reader = csv::Reader::from_path(path).map_err(to_data_error)?;
        let table = Self::from_csv(reader).map_err(to_data_error)?;
        info!("loaded {} manufacturing baselines from {}", table.rows.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ManufacturingBaseline>, csv::Error>>()?;
        Ok(Self { rows })
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        let to_data_error = |source: csv::Error| DataError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(|err| to_data_error(csv::Error::from(err)))?;
        self.to_writer(file).map_err(to_data_error)?;
        info!(
            "manufacturing data written to {}, EV carbon debt {:.0} kg CO2",
            path.display(),
            self.carbon_debt().unwrap_or(0.0)
        );
        Ok(())
    }

    pub fn get(&self, kind: VehicleKind) -> Result<&ManufacturingBaseline, DataError> {
        self.rows
            .iter()
            .find(|row| row.vehicle_type == kind.table_key())
            .ok_or_else(|| DataError::MissingVehicle {
                vehicle_type: kind.table_key().to_string(),
            })
    }

    pub fn debt_for(&self, kind: VehicleKind) -> Result<f64, DataError> {
        Ok(self.get(kind)?.total_manufacturing_co2_kg)
    }

    /// Extra production emissions the EV starts with (EV total - ICE total).
    pub fn carbon_debt(&self) -> Result<f64, DataError> {
        Ok(self.debt_for(VehicleKind::Ev)? - self.debt_for(VehicleKind::Ice)?)
    }

    /// Fraction of the EV's production emissions that comes from the battery.
    pub fn battery_share(&self) -> Result<f64, DataError> {
        let ev = self.get(VehicleKind::Ev)?;
        if ev.total_manufacturing_co2_kg == 0.0 {
            return Ok(0.0);
        }
        Ok(ev.battery_manufacturing_co2_kg / ev.total_manufacturing_co2_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_glider_is_residual() {
        let table = ManufacturingTable::baseline();
        let ice = table.get(VehicleKind::Ice).unwrap();
        let ev = table.get(VehicleKind::Ev).unwrap();
        assert_eq!(ice.glider_co2_kg, 6079.0 - 34.0 - 745.0);
        assert_eq!(ev.glider_co2_kg, 10471.0 - 5238.0 - 174.0);
    }

    #[test]
    fn debt_and_battery_share() {
        let table = ManufacturingTable::baseline();
        assert_eq!(table.carbon_debt().unwrap(), 4392.0);
        assert!((table.battery_share().unwrap() - 5238.0 / 10471.0).abs() < 1e-12);
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let table = ManufacturingTable::baseline();
        let mut buf = Vec::new();
        table.to_writer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("vehicle_type,total_manufacturing_co2_kg"));
        let back = ManufacturingTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn missing_vehicle_is_reported() {
        let text = "vehicle_type,total_manufacturing_co2_kg,battery_manufacturing_co2_kg,fluids_co2_kg,glider_co2_kg\nICE_Sedan,6000,0,0,6000\n";
        let table = ManufacturingTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.debt_for(VehicleKind::Ice).unwrap(), 6000.0);
        assert!(matches!(
            table.debt_for(VehicleKind::Ev),
            Err(DataError::MissingVehicle { .. })
        ));
    }

    #[test]
    fn zero_total_has_zero_battery_share() {
        let table = ManufacturingTable {
            rows: vec![ManufacturingBaseline::with_residual_glider("EV_Sedan", 0.0, 0.0, 0.0)],
        };
        assert_eq!(table.battery_share().unwrap(), 0.0);
    }
}
