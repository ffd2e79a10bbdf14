//! Dispatch input snapshot, result, and metric types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite};
use crate::generation::GenerationSnapshot;

/// Supply, demand, and storage state for one tick, fed to both heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationInput {
    /// Solar output (MW).
    pub solar_mw: f64,
    /// Wind output (MW).
    pub wind_mw: f64,
    /// Demand (MW).
    pub demand_mw: f64,
    /// Storage charge at the start of the tick (MWh).
    pub storage_charge_mwh: f64,
    /// Storage capacity (MWh).
    pub storage_capacity_mwh: f64,
}

impl OptimizationInput {
    /// Builds the input from a generation snapshot and the current storage state.
    pub fn from_snapshot(
        snapshot: &GenerationSnapshot,
        storage_charge_mwh: f64,
        storage_capacity_mwh: f64,
    ) -> Self {
        Self {
            solar_mw: snapshot.solar_mw,
            wind_mw: snapshot.wind_mw,
            demand_mw: snapshot.demand_mw,
            storage_charge_mwh,
            storage_capacity_mwh,
        }
    }

    /// Combined renewable output (MW).
    pub fn total_generation_mw(&self) -> f64 {
        self.solar_mw + self.wind_mw
    }

    /// Generation minus demand; positive is surplus, negative is deficit.
    pub fn surplus_mw(&self) -> f64 {
        self.total_generation_mw() - self.demand_mw
    }

    /// Rejects non-finite fields before any arithmetic runs.
    pub(crate) fn check_finite(&self) -> Result<()> {
        ensure_finite("input.solar_mw", self.solar_mw)?;
        ensure_finite("input.wind_mw", self.wind_mw)?;
        ensure_finite("input.demand_mw", self.demand_mw)?;
        ensure_finite("input.storage_charge_mwh", self.storage_charge_mwh)?;
        ensure_finite("input.storage_capacity_mwh", self.storage_capacity_mwh)?;
        Ok(())
    }

    /// Capacity floored at zero.
    pub(crate) fn capacity(&self) -> f64 {
        self.storage_capacity_mwh.max(0.0)
    }

    /// Starting charge clamped into `[0, capacity]`.
    pub(crate) fn clamped_charge(&self) -> f64 {
        self.storage_charge_mwh.clamp(0.0, self.capacity())
    }
}

/// Cost, curtailment, efficiency and emissions reported by one heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Total dispatch cost ($).
    pub total_cost: f64,
    /// Curtailed renewable energy (MWh).
    pub curtailment_mwh: f64,
    /// Delivered share of generation (%), clamped to `[0, 100]`.
    pub efficiency_pct: f64,
    /// Emissions from backup generation (t).
    pub emissions_t: f64,
    /// Synthetic compute time for display (ms). Carries no computational meaning.
    pub compute_time_ms: f64,
}

impl OptimizationMetrics {
    pub(crate) fn check_finite(self) -> Result<Self> {
        ensure_finite("metrics.total_cost", self.total_cost)?;
        ensure_finite("metrics.curtailment_mwh", self.curtailment_mwh)?;
        ensure_finite("metrics.efficiency_pct", self.efficiency_pct)?;
        ensure_finite("metrics.emissions_t", self.emissions_t)?;
        ensure_finite("metrics.compute_time_ms", self.compute_time_ms)?;
        Ok(self)
    }
}

impl fmt::Display for OptimizationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cost=${:.0} curt={:.1} MWh eff={:.1}% em={:.1} t ({:.0} ms)",
            self.total_cost,
            self.curtailment_mwh,
            self.efficiency_pct,
            self.emissions_t,
            self.compute_time_ms,
        )
    }
}

/// Outcome of one heuristic for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Reported metrics.
    pub metrics: OptimizationMetrics,
    /// Curtailed energy (MWh).
    pub curtailment_mwh: f64,
    /// Storage flow (MWh; positive = charging, negative = discharging).
    pub storage_flow_mwh: f64,
    /// Storage charge after applying the flow (MWh), always within `[0, capacity]`.
    pub new_storage_charge_mwh: f64,
}

impl OptimizationResult {
    /// Returns `true` when storage absorbed energy this tick.
    pub fn is_charging(&self) -> bool {
        self.storage_flow_mwh > 0.0
    }

    /// Returns `true` when storage released energy this tick.
    pub fn is_discharging(&self) -> bool {
        self.storage_flow_mwh < 0.0
    }

    pub(crate) fn check_finite(self) -> Result<Self> {
        self.metrics.check_finite()?;
        ensure_finite("result.curtailment_mwh", self.curtailment_mwh)?;
        ensure_finite("result.storage_flow_mwh", self.storage_flow_mwh)?;
        ensure_finite("result.new_storage_charge_mwh", self.new_storage_charge_mwh)?;
        Ok(self)
    }
}

/// Storage movement chosen for one ramp rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StorageMove {
    /// Signed flow (positive = charge).
    pub flow: f64,
    /// Surplus the storage could not absorb (0 in deficit).
    pub spill: f64,
    /// Charge after the move, clamped into `[0, capacity]`.
    pub new_charge: f64,
}

/// Greedy storage balancing shared by both heuristics.
///
/// Charges surplus up to the free headroom and `ramp_fraction × capacity`;
/// discharges deficit up to the stored energy and the same ramp cap.
pub(crate) fn balance_storage(input: &OptimizationInput, ramp_fraction: f64) -> StorageMove {
    let capacity = input.capacity();
    let charge = input.clamped_charge();
    let surplus = input.surplus_mw();
    let ramp_cap = capacity * ramp_fraction;

    if surplus > 0.0 {
        let amount = surplus.min(capacity - charge).min(ramp_cap).max(0.0);
        StorageMove {
            flow: amount,
            spill: surplus - amount,
            new_charge: (charge + amount).clamp(0.0, capacity),
        }
    } else {
        let deficit = -surplus;
        let amount = deficit.min(charge).min(ramp_cap).max(0.0);
        StorageMove {
            flow: -amount,
            spill: 0.0,
            new_charge: (charge - amount).clamp(0.0, capacity),
        }
    }
}

/// Energy actually served: generation plus storage movement, capped at demand.
pub(crate) fn delivered_energy(input: &OptimizationInput, flow: f64) -> f64 {
    (input.total_generation_mw() + flow.abs()).min(input.demand_mw)
}
