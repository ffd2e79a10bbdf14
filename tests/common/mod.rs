//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use grid_dispatch_sim::config::ScenarioConfig;
use grid_dispatch_sim::dispatch::OptimizationInput;
use grid_dispatch_sim::sim::SimulationDriver;

/// Baseline scenario (dashboard defaults, seed 42, 120 ticks).
pub fn baseline_scenario() -> ScenarioConfig {
    ScenarioConfig::baseline()
}

/// Driver built from `scenario`; panics on an invalid scenario.
pub fn driver_for(scenario: &ScenarioConfig) -> SimulationDriver {
    SimulationDriver::new(scenario).expect("scenario should be valid")
}

/// Baseline driver.
pub fn default_driver() -> SimulationDriver {
    driver_for(&baseline_scenario())
}

/// Surplus tick: 300 MW renewables against 250 MW demand, storage half full.
pub fn surplus_input() -> OptimizationInput {
    OptimizationInput {
        solar_mw: 200.0,
        wind_mw: 100.0,
        demand_mw: 250.0,
        storage_charge_mwh: 100.0,
        storage_capacity_mwh: 200.0,
    }
}

/// Deficit tick: 50 MW wind against 200 MW demand, 30 MWh stored.
pub fn deficit_input() -> OptimizationInput {
    OptimizationInput {
        solar_mw: 0.0,
        wind_mw: 50.0,
        demand_mw: 200.0,
        storage_charge_mwh: 30.0,
        storage_capacity_mwh: 200.0,
    }
}

/// Tolerance for floating-point comparisons of derived figures.
pub const EPS: f64 = 1e-9;
