//! Per-tick record emitted by the simulation driver.

use std::fmt;

use serde::Serialize;

use crate::dispatch::{BackendHint, Comparison, OptimizationMetrics};

/// Complete record of one committed simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    /// Tick index since start or the last reset.
    pub tick: usize,
    /// Simulated hour the tick was evaluated at.
    pub time_of_day: f64,
    /// Solar output (MW).
    pub solar_mw: f64,
    /// Wind output (MW).
    pub wind_mw: f64,
    /// Demand (MW).
    pub demand_mw: f64,
    /// Storage charge after the committed (quantum-inspired) dispatch (MWh).
    pub storage_charge_mwh: f64,
    /// Signed storage flow of the committed dispatch (MWh; positive = charge).
    pub storage_flow_mwh: f64,
    /// Classical heuristic metrics.
    pub classical: OptimizationMetrics,
    /// Quantum-inspired heuristic metrics.
    pub quantum: OptimizationMetrics,
}

impl TickRecord {
    /// Combined renewable output (MW).
    pub fn total_generation_mw(&self) -> f64 {
        self.solar_mw + self.wind_mw
    }

    /// Quantum-inspired improvement over classical for this tick.
    pub fn comparison(&self) -> Comparison {
        Comparison::between(&self.classical, &self.quantum)
    }

    pub fn backend_hint(&self) -> BackendHint {
        BackendHint::from_compute_time(self.quantum.compute_time_ms)
    }
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.time_of_day.floor();
        let minutes = ((self.time_of_day - hours) * 60.0).floor();
        write!(
            f,
            "t={:>4} ({:02}:{:02}) | solar={:>6.1} wind={:>6.1} demand={:>6.1} MW | \
             storage={:>6.1} MWh ({:+.1}) | classical cost=${:>6.0} eff={:>5.1}% | \
             quantum cost=${:>6.0} eff={:>5.1}%",
            self.tick,
            hours as u32,
            minutes as u32,
            self.solar_mw,
            self.wind_mw,
            self.demand_mw,
            self.storage_charge_mwh,
            self.storage_flow_mwh,
            self.classical.total_cost,
            self.classical.efficiency_pct,
            self.quantum.total_cost,
            self.quantum.efficiency_pct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TickRecord {
        TickRecord {
            tick: 3,
            time_of_day: 6.5,
            solar_mw: 40.0,
            wind_mw: 12.0,
            demand_mw: 330.0,
            storage_charge_mwh: 80.0,
            storage_flow_mwh: -20.0,
            classical: OptimizationMetrics {
                total_cost: 20_000.0,
                curtailment_mwh: 0.0,
                efficiency_pct: 100.0,
                emissions_t: 130.0,
                compute_time_ms: 170.0,
            },
            quantum: OptimizationMetrics {
                total_cost: 18_500.0,
                curtailment_mwh: 0.0,
                efficiency_pct: 100.0,
                emissions_t: 120.0,
                compute_time_ms: 15.0,
            },
        }
    }

    #[test]
    fn display_formats_clock_time() {
        let s = format!("{}", record());
        assert!(s.contains("06:30"), "{s}");
        assert!(s.contains("storage="));
    }

    #[test]
    fn comparison_and_hint() {
        let r = record();
        assert_eq!(r.comparison().cost.diff, 1_500.0);
        assert_eq!(r.backend_hint(), BackendHint::LocalHeuristic);
        assert_eq!(r.total_generation_mw(), 52.0);
    }
}
