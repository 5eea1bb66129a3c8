//! Error types for fuel purchases.

use thiserror::Error;

use crate::Amount;
use crate::model::FuelType;

/// Typed outcome of a failed [`Station::buy_fuel`](super::Station::buy_fuel).
///
/// Only the two business rejections touch the cancellation counters;
/// `PriceNotConfigured` and `InvalidAmount` are reported without counting,
/// since the first is a configuration defect and the second a caller
/// contract violation.
#[derive(Debug, Error)]
pub enum BuyError {
    #[error("no price configured for {0}")]
    PriceNotConfigured(FuelType),

    #[error("{fuel_type} costs {price} per liter, over the {max_price} ceiling")]
    TooExpensive {
        fuel_type: FuelType,
        price: Amount,
        max_price: Amount,
    },

    #[error("no {fuel_type} pump can serve {liters} liters")]
    NotEnoughFuel { fuel_type: FuelType, liters: Amount },

    #[error("requested liters must be positive, got {0}")]
    InvalidAmount(Amount),
}
