//! Vehicle range and consumption model.

/// Range the driver always keeps in the tank, in km.
pub const RESERVE_KM: f64 = 15.0;

/// Fixed consumption used for detour cost, in litres per 100 km.
pub const CONSUMPTION_L_PER_100KM: f64 = 6.0;

/// What the vehicle can still do before refuelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// Range the driver reports as available, in km.
    pub available_range_km: f64,
}

impl VehicleState {
    pub fn new(available_range_km: f64) -> Self {
        Self { available_range_km }
    }

    /// Available range minus the safety reserve. May be zero or negative.
    pub fn usable_range_km(&self) -> f64 {
        self.available_range_km - RESERVE_KM
    }

    /// Litres consumed over `km` at the fixed consumption rate.
    pub fn liters_for(&self, km: f64) -> f64 {
        km * CONSUMPTION_L_PER_100KM / 100.0
    }
}
