//! Generation and demand models driving each simulated tick.

mod demand;
mod solar;
/// Injectable randomness for the stochastic models.
pub mod types;
mod wind;

use serde::Serialize;

use crate::config::SimulationConfig;

pub use demand::demand;
pub use solar::{SUNRISE_HOUR, SUNSET_HOUR, solar_generation};
pub use types::{FixedVariability, SeededVariability, Variability};
pub use wind::wind_generation;

/// Solar, wind and demand sampled for one time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationSnapshot {
    /// Simulated hour the snapshot was taken at.
    pub time_of_day: f64,
    /// Solar output (MW).
    pub solar_mw: f64,
    /// Wind output (MW).
    pub wind_mw: f64,
    /// Demand (MW).
    pub demand_mw: f64,
}

impl GenerationSnapshot {
    /// Samples all three models for `time_of_day` against the configured capacities.
    ///
    /// Solar draws from `variability` only in daylight; wind always draws.
    pub fn sample(time_of_day: f64, config: &SimulationConfig, variability: &mut impl Variability) -> Self {
        let solar_mw = solar_generation(time_of_day, config.solar_capacity_mw, variability);
        let wind_mw = wind_generation(time_of_day, config.wind_capacity_mw, variability);
        Self {
            time_of_day,
            solar_mw,
            wind_mw,
            demand_mw: demand(time_of_day, config.base_demand_mw),
        }
    }

    /// Combined renewable output (MW).
    pub fn total_generation_mw(&self) -> f64 {
        self.solar_mw + self.wind_mw
    }
}
