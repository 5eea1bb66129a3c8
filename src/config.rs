//! Injected startup configuration.
//!
//! The station never reads files itself; the host process hands it a
//! [`StationConfig`] value. The JSON loader here is for driver processes
//! and degrades to an empty config instead of failing startup, leaving
//! prices in the unconfigured state.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::Amount;
use crate::model::FuelType;

/// Errors that can occur when reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct PumpEntry {
    fuel_type: FuelType,
    liters: f64,
}

/// Startup configuration: per-type unit prices and the initial pumps.
///
/// ```json
/// {
///   "prices": { "diesel": 1.45, "regular": 1.30 },
///   "pumps": [ { "fuel_type": "diesel", "liters": 500.0 } ]
/// }
/// ```
///
/// Both sections are optional; a type absent from `prices` stays
/// unconfigured in the station.
#[derive(Debug, Default, Deserialize)]
pub struct StationConfig {
    #[serde(default)]
    prices: HashMap<FuelType, f64>,
    #[serde(default)]
    pumps: Vec<PumpEntry>,
}

impl StationConfig {
    /// Parse a config from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a config file, falling back to the empty config if the file is
    /// missing or malformed. Startup must survive a broken config; the
    /// failure is logged and every price stays unconfigured.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(ConfigError::from)
            .and_then(Self::from_reader);
        match result {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to empty station config");
                Self::default()
            }
        }
    }

    /// Configured prices, as amounts.
    pub fn prices(&self) -> impl Iterator<Item = (FuelType, Amount)> + '_ {
        self.prices
            .iter()
            .map(|(&fuel_type, &price)| (fuel_type, Amount::from_float(price)))
    }

    /// Initial pumps, in file order.
    pub fn pumps(&self) -> impl Iterator<Item = (FuelType, Amount)> + '_ {
        self.pumps
            .iter()
            .map(|entry| (entry.fuel_type, Amount::from_float(entry.liters)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::Station;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_prices_and_pumps() {
        let json = r#"{
            "prices": { "diesel": 1.45, "super": 1.6 },
            "pumps": [
                { "fuel_type": "diesel", "liters": 500.0 },
                { "fuel_type": "super", "liters": 250.0 }
            ]
        }"#;
        let config = StationConfig::from_reader(json.as_bytes()).unwrap();

        let prices: HashMap<_, _> = config.prices().collect();
        assert_eq!(prices[&FuelType::Diesel], Amount::from_float(1.45));
        assert_eq!(prices[&FuelType::Super], Amount::from_float(1.6));
        assert!(!prices.contains_key(&FuelType::Regular));

        let pumps: Vec<_> = config.pumps().collect();
        assert_eq!(pumps[0], (FuelType::Diesel, Amount::from_float(500.0)));
        assert_eq!(pumps[1], (FuelType::Super, Amount::from_float(250.0)));
    }

    #[test]
    fn sections_are_optional() {
        let config = StationConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config.prices().count(), 0);
        assert_eq!(config.pumps().count(), 0);
    }

    #[test]
    fn unknown_fuel_type_is_a_parse_error() {
        let result = StationConfig::from_reader(r#"{ "prices": { "jetfuel": 9.0 } }"#.as_bytes());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_survives_missing_file() {
        let config = StationConfig::load("does/not/exist.json");
        assert_eq!(config.prices().count(), 0);
    }

    #[test]
    fn load_survives_malformed_file() {
        let file = write_config("not json at all");
        let config = StationConfig::load(file.path());
        assert_eq!(config.prices().count(), 0);
        assert_eq!(config.pumps().count(), 0);
    }

    #[test]
    fn station_with_config_applies_prices_then_pumps() {
        let json = r#"{
            "prices": { "regular": 1.3 },
            "pumps": [ { "fuel_type": "regular", "liters": 100.0 } ]
        }"#;
        let config = StationConfig::from_reader(json.as_bytes()).unwrap();
        let station = Station::with_config(&config);

        assert_eq!(station.price(FuelType::Regular), Some(Amount::from_float(1.3)));
        assert_eq!(station.price(FuelType::Diesel), None);
        assert_eq!(station.pumps().len(), 1);
        assert_eq!(station.pumps()[0].remaining(), Amount::from_float(100.0));
    }

    #[test]
    fn station_from_broken_config_starts_unconfigured() {
        let station = Station::with_config(&StationConfig::load("nope.json"));
        assert!(station.pumps().is_empty());
        for fuel_type in FuelType::ALL {
            assert_eq!(station.price(fuel_type), None);
        }
    }
}
