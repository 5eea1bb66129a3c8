//! Fuel-station engine.
//!
//! The station owns the pumps, the per-type price table, and the aggregate
//! sales counters, and arbitrates concurrent purchase requests. Also
//! supports an async stream of requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::Amount;
use crate::config::StationConfig;
use crate::model::{FuelRequest, FuelType};

mod pump;
pub use pump::FuelPump;

mod error;
pub use error::BuyError;

/// The fuel-station engine.
///
/// Safe to share across threads behind a plain reference or `Arc`: every
/// operation takes `&self`. Each pump guards its own reserve, the counters
/// are independent atomics, and neither ever holds the other's lock, so
/// customers at different pumps never serialize against each other.
pub struct Station {
    /// Append-only; scan order is insertion order (first-fit policy).
    pumps: RwLock<Vec<Arc<FuelPump>>>,
    /// Absent key means "price not configured", never a numeric sentinel.
    prices: RwLock<HashMap<FuelType, Amount>>,
    sales: AtomicU64,
    /// Scaled `Amount` representation, so sales can add to it atomically.
    revenue: AtomicI64,
    cancel_no_fuel: AtomicU64,
    cancel_too_expensive: AtomicU64,
}

/// Public API
impl Station {
    pub fn new() -> Self {
        Self {
            pumps: RwLock::new(Vec::new()),
            prices: RwLock::new(HashMap::new()),
            sales: AtomicU64::new(0),
            revenue: AtomicI64::new(0),
            cancel_no_fuel: AtomicU64::new(0),
            cancel_too_expensive: AtomicU64::new(0),
        }
    }

    /// Build a station from an injected configuration: prices first, then
    /// the initial pumps. An empty config yields an empty station with
    /// every price unconfigured.
    pub fn with_config(config: &StationConfig) -> Self {
        let station = Self::new();
        for (fuel_type, price) in config.prices() {
            station.set_price(fuel_type, price);
        }
        for (fuel_type, liters) in config.pumps() {
            station.add_pump(FuelPump::new(fuel_type, liters));
        }
        station
    }

    /// Install a pump. Returns a handle so the caller can keep watching
    /// its reserve; the station holds its own.
    pub fn add_pump(&self, pump: FuelPump) -> Arc<FuelPump> {
        let pump = Arc::new(pump);
        self.write_pumps().push(Arc::clone(&pump));
        pump
    }

    /// Snapshot of the installed pumps, in insertion order.
    pub fn pumps(&self) -> Vec<Arc<FuelPump>> {
        self.read_pumps().clone()
    }

    /// Current unit price for `fuel_type`, or `None` if never configured.
    pub fn price(&self, fuel_type: FuelType) -> Option<Amount> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&fuel_type)
            .copied()
    }

    /// Replace the unit price for `fuel_type`, last write wins.
    ///
    /// Deliberately permissive: no check that a pump of that type exists,
    /// and negative placeholder values from config are stored as-is.
    pub fn set_price(&self, fuel_type: FuelType, price: Amount) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(fuel_type, price);
    }

    /// Serve one customer: find a pump of `fuel_type` holding at least
    /// `liters`, withdraw, and return the amount to pay.
    ///
    /// The price is read once, before any pump is touched; the first pump
    /// (in insertion order) that accepts the withdrawal wins. A pump with
    /// too little fuel is skipped, not terminal: the no-fuel rejection is
    /// only reached after every matching pump declined.
    pub fn buy_fuel(
        &self,
        fuel_type: FuelType,
        liters: Amount,
        max_price: Amount,
    ) -> Result<Amount, BuyError> {
        if !liters.is_positive() {
            return Err(BuyError::InvalidAmount(liters));
        }

        let price = self
            .price(fuel_type)
            .ok_or(BuyError::PriceNotConfigured(fuel_type))?;

        if price > max_price {
            self.cancel_too_expensive.fetch_add(1, Ordering::Relaxed);
            return Err(BuyError::TooExpensive {
                fuel_type,
                price,
                max_price,
            });
        }

        let pumps = self.read_pumps();
        for pump in pumps.iter().filter(|p| p.fuel_type() == fuel_type) {
            // The pump's own critical section decides; no station-wide
            // lock is held across attempts, so two customers can probe
            // two pumps at once.
            if pump.try_withdraw(liters) {
                let paid = liters * price;
                self.revenue.fetch_add(paid.to_scaled(), Ordering::Relaxed);
                self.sales.fetch_add(1, Ordering::Relaxed);
                debug!(
                    %fuel_type,
                    %liters,
                    remaining = %pump.remaining(),
                    "pump served"
                );
                return Ok(paid);
            }
            debug!(%fuel_type, %liters, remaining = %pump.remaining(), "pump too low, trying next");
        }
        drop(pumps);

        self.cancel_no_fuel.fetch_add(1, Ordering::Relaxed);
        Err(BuyError::NotEnoughFuel { fuel_type, liters })
    }

    /// Drain a request stream, applying each request in order of arrival.
    /// Rejections are logged and never stop the loop.
    pub async fn serve(&self, mut stream: impl Stream<Item = FuelRequest> + Unpin) {
        while let Some(request) = stream.next().await {
            let result = self.buy_fuel(request.fuel_type, request.liters, request.max_price);
            Self::log_result(&request, &result);
        }
    }

    /// Number of completed sales.
    pub fn sales(&self) -> u64 {
        self.sales.load(Ordering::Relaxed)
    }

    /// Total taken over all completed sales.
    pub fn revenue(&self) -> Amount {
        Amount::from_scaled(self.revenue.load(Ordering::Relaxed))
    }

    /// Customers turned away because no pump could serve the full amount.
    pub fn cancellations_no_fuel(&self) -> u64 {
        self.cancel_no_fuel.load(Ordering::Relaxed)
    }

    /// Customers turned away because the price was over their ceiling.
    pub fn cancellations_too_expensive(&self) -> u64 {
        self.cancel_too_expensive.load(Ordering::Relaxed)
    }
}

/// Private API
impl Station {
    fn read_pumps(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<FuelPump>>> {
        self.pumps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_pumps(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<FuelPump>>> {
        self.pumps.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Small helper to log `serve` outcomes
    fn log_result(request: &FuelRequest, result: &Result<Amount, BuyError>) {
        match result {
            Ok(paid) => {
                info!(
                    fuel_type = %request.fuel_type,
                    liters = %request.liters,
                    paid = %paid,
                    "sale completed"
                );
            }
            Err(e) => {
                info!(
                    fuel_type = %request.fuel_type,
                    liters = %request.liters,
                    reason = %e,
                    "request rejected"
                );
            }
        }
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}
