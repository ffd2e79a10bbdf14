//! Observable grid state, updated once per committed tick.

use serde::Serialize;

use crate::dispatch::{OptimizationInput, OptimizationResult};

/// One renewable source: current output against installed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceState {
    /// Latest output (MW).
    pub current_mw: f64,
    /// Installed capacity (MW).
    pub capacity_mw: f64,
}

impl SourceState {
    /// Output as a fraction of capacity, or zero with no capacity.
    pub fn utilization(&self) -> f64 {
        if self.capacity_mw > 0.0 {
            self.current_mw / self.capacity_mw
        } else {
            0.0
        }
    }
}

/// Storage charge, capacity, and the direction of the latest flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StorageState {
    /// Stored energy (MWh), kept within `[0, capacity_mwh]`.
    pub charge_mwh: f64,
    /// Energy capacity (MWh).
    pub capacity_mwh: f64,
    pub charging: bool,
    pub discharging: bool,
    /// Signed flow of the latest tick (MWh; positive = charge).
    pub flow_rate_mwh: f64,
}

impl StorageState {
    /// State of charge in `[0, 1]`.
    pub fn soc(&self) -> f64 {
        if self.capacity_mwh > 0.0 {
            self.charge_mwh / self.capacity_mwh
        } else {
            0.0
        }
    }
}

/// Snapshot of the whole grid as last committed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridState {
    pub solar: SourceState,
    pub wind: SourceState,
    pub storage: StorageState,
    /// Latest demand (MW).
    pub demand_mw: f64,
    /// Curtailment reported by the latest committed dispatch (MWh).
    pub curtailment_mwh: f64,
}

impl GridState {
    /// Idle grid with the given capacities and storage charged to
    /// `initial_fraction` of its capacity.
    pub fn new(
        solar_capacity_mw: f64,
        wind_capacity_mw: f64,
        storage_capacity_mwh: f64,
        initial_fraction: f64,
    ) -> Self {
        Self {
            solar: SourceState {
                current_mw: 0.0,
                capacity_mw: solar_capacity_mw,
            },
            wind: SourceState {
                current_mw: 0.0,
                capacity_mw: wind_capacity_mw,
            },
            storage: StorageState {
                charge_mwh: storage_capacity_mwh * initial_fraction.clamp(0.0, 1.0),
                capacity_mwh: storage_capacity_mwh,
                charging: false,
                discharging: false,
                flow_rate_mwh: 0.0,
            },
            demand_mw: 0.0,
            curtailment_mwh: 0.0,
        }
    }

    /// Applies a tick's dispatch input and the result committed for it.
    pub fn apply(&mut self, input: &OptimizationInput, result: &OptimizationResult) {
        self.solar.current_mw = input.solar_mw;
        self.wind.current_mw = input.wind_mw;
        self.demand_mw = input.demand_mw;
        self.curtailment_mwh = result.curtailment_mwh;

        let s = &mut self.storage;
        s.charge_mwh = result.new_storage_charge_mwh.clamp(0.0, s.capacity_mwh);
        s.flow_rate_mwh = result.storage_flow_mwh;
        s.charging = result.is_charging();
        s.discharging = result.is_discharging();
    }

    /// Updates capacities; stored energy is clamped into the new storage capacity.
    pub fn resize(&mut self, solar_capacity_mw: f64, wind_capacity_mw: f64, storage_capacity_mwh: f64) {
        self.solar.capacity_mw = solar_capacity_mw;
        self.wind.capacity_mw = wind_capacity_mw;
        self.storage.capacity_mwh = storage_capacity_mwh;
        self.storage.charge_mwh = self.storage.charge_mwh.clamp(0.0, storage_capacity_mwh);
    }
}
