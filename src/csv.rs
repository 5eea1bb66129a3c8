use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::{Amount, FuelRequest, FuelType, Station};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized fuel type '{fuel_type}'")]
    UnrecognizedFuelType { line: usize, fuel_type: String },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    liters: f64,
    max_price: f64,
}

#[derive(Debug, Serialize)]
struct ReportRow {
    sales: u64,
    revenue: String,
    rejected_no_fuel: u64,
    rejected_too_expensive: u64,
}

/// Read customer requests from a csv file
pub fn read_requests(path: impl AsRef<Path>) -> impl Iterator<Item = Result<FuelRequest, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let fuel_type =
                FuelType::from_name(&row.r#type).ok_or_else(|| CsvError::UnrecognizedFuelType {
                    line,
                    fuel_type: row.r#type.clone(),
                })?;
            Ok(FuelRequest {
                fuel_type,
                liters: Amount::from_float(row.liters),
                max_price: Amount::from_float(row.max_price),
            })
        })
}

/// Write the station's end-of-day counters to stdout in csv format
pub fn write_report(station: &Station) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    let row = ReportRow {
        sales: station.sales(),
        revenue: station.revenue().to_string(),
        rejected_no_fuel: station.cancellations_no_fuel(),
        rejected_too_expensive: station.cancellations_too_expensive(),
    };
    writer.serialize(&row).expect("failed to write csv row");

    writer.flush().expect("failed to flush csv writer");
}
