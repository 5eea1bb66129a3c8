use std::sync::{Mutex, PoisonError};

use crate::Amount;
use crate::model::FuelType;

/// A single physical pump: one fuel type for life, a finite reserve.
///
/// The reserve is only ever touched through [`FuelPump::try_withdraw`],
/// whose check-and-subtract runs as one critical section. Two customers
/// racing for the last liters of the same pump can never both win.
#[derive(Debug)]
pub struct FuelPump {
    fuel_type: FuelType,
    remaining: Mutex<Amount>,
}

impl FuelPump {
    pub fn new(fuel_type: FuelType, initial: Amount) -> Self {
        Self {
            fuel_type,
            remaining: Mutex::new(initial),
        }
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn remaining(&self) -> Amount {
        *self.lock()
    }

    /// Withdraw `liters` if the reserve covers them.
    ///
    /// Returns `false` and leaves the reserve untouched otherwise; there is
    /// no partial fill. `liters` must be positive, which the station
    /// validates before scanning pumps.
    pub fn try_withdraw(&self, liters: Amount) -> bool {
        let mut remaining = self.lock();
        if *remaining >= liters {
            *remaining -= liters;
            true
        } else {
            false
        }
    }

    // Nothing can panic while the lock is held, so a poisoned lock carries
    // an intact value; recover it instead of unwinding the caller.
    fn lock(&self) -> std::sync::MutexGuard<'_, Amount> {
        self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
