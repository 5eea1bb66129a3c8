//! Core domain types for the fuel station.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Amount;

/// One of the fuel varieties the station sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Diesel,
    Regular,
    Super,
}

impl FuelType {
    /// Every variety, in a stable order.
    pub const ALL: [FuelType; 3] = [FuelType::Diesel, FuelType::Regular, FuelType::Super];

    /// Parse the lowercase name used in config files and request rows.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "diesel" => Some(FuelType::Diesel),
            "regular" => Some(FuelType::Regular),
            "super" => Some(FuelType::Super),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::Regular => "regular",
            FuelType::Super => "super",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single customer request: a quantity of one fuel type, with the highest
/// unit price the customer is willing to pay.
#[derive(Debug, Clone, Copy)]
pub struct FuelRequest {
    pub fuel_type: FuelType,
    pub liters: Amount,
    pub max_price: Amount,
}
