pub mod amount;
pub mod config;
pub mod csv;
pub mod model;
pub mod station;

pub use amount::Amount;
pub use config::StationConfig;
pub use model::{FuelRequest, FuelType};
pub use station::{BuyError, FuelPump, Station};
