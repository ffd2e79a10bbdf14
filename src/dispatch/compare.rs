//! Side-by-side comparison of classical and quantum-inspired metrics.

use std::fmt;

use serde::Serialize;

use super::types::OptimizationMetrics;

/// Hours per year, for annualizing hourly cost and emissions.
const HOURS_PER_YEAR: f64 = 8760.0;

/// Days per year, for annualizing curtailment.
const DAYS_PER_YEAR: f64 = 365.0;

/// Quantum compute times above this (ms) point at a genuine remote backend.
pub const REMOTE_BACKEND_THRESHOLD_MS: f64 = 30.0;

/// Absolute and relative improvement of quantum over classical for one metric.
///
/// Positive values favour the quantum-inspired result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    /// Absolute difference in the metric's own unit.
    pub diff: f64,
    /// `diff` relative to the classical value, in percent. Zero when the
    /// classical value is zero.
    pub percent: f64,
}

impl Improvement {
    /// For metrics where lower is better (cost, curtailment, emissions).
    pub fn lower_is_better(classical: f64, quantum: f64) -> Self {
        Self::from_diff(classical - quantum, classical)
    }

    /// For metrics where higher is better (efficiency).
    pub fn higher_is_better(classical: f64, quantum: f64) -> Self {
        Self::from_diff(quantum - classical, classical)
    }

    fn from_diff(diff: f64, classical: f64) -> Self {
        let percent = if classical == 0.0 {
            0.0
        } else {
            diff / classical * 100.0
        };
        Self { diff, percent }
    }
}

/// Per-metric improvements for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub cost: Improvement,
    pub curtailment: Improvement,
    pub efficiency: Improvement,
    pub emissions: Improvement,
}

impl Comparison {
    /// Compares two metric sets taken on the same input.
    pub fn between(classical: &OptimizationMetrics, quantum: &OptimizationMetrics) -> Self {
        Self {
            cost: Improvement::lower_is_better(classical.total_cost, quantum.total_cost),
            curtailment: Improvement::lower_is_better(
                classical.curtailment_mwh,
                quantum.curtailment_mwh,
            ),
            efficiency: Improvement::higher_is_better(
                classical.efficiency_pct,
                quantum.efficiency_pct,
            ),
            emissions: Improvement::lower_is_better(classical.emissions_t, quantum.emissions_t),
        }
    }

    /// Annualized projection of this tick's savings.
    ///
    /// Cost and emissions scale by hours per year, curtailment by days per year.
    pub fn annualized(&self) -> AnnualProjection {
        AnnualProjection {
            cost_savings: self.cost.diff * HOURS_PER_YEAR,
            curtailment_reduction_mwh: self.curtailment.diff * DAYS_PER_YEAR,
            emissions_reduction_t: self.emissions.diff * HOURS_PER_YEAR,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Quantum-inspired vs classical ---")?;
        writeln!(
            f,
            "Cost savings:          ${:.0} ({:+.1}%)",
            self.cost.diff, self.cost.percent
        )?;
        writeln!(
            f,
            "Curtailment reduction: {:.1} MWh ({:+.1}%)",
            self.curtailment.diff, self.curtailment.percent
        )?;
        writeln!(
            f,
            "Efficiency gain:       {:+.1}% ({:+.1}% rel.)",
            self.efficiency.diff, self.efficiency.percent
        )?;
        write!(
            f,
            "Emissions reduction:   {:.1} t ({:+.1}%)",
            self.emissions.diff, self.emissions.percent
        )
    }
}

/// Savings extrapolated to a full year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualProjection {
    pub cost_savings: f64,
    pub curtailment_reduction_mwh: f64,
    pub emissions_reduction_t: f64,
}

/// Which backend most likely produced a quantum result, judged by its compute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackendHint {
    /// No result yet (compute time of zero).
    Unknown,
    /// Fast enough to be the local quantum-inspired heuristic.
    LocalHeuristic,
    /// Slow enough to be a genuine remote solver.
    RemoteSolver,
}

impl BackendHint {
    /// Classifies a reported quantum compute time.
    pub fn from_compute_time(compute_time_ms: f64) -> Self {
        if compute_time_ms <= 0.0 {
            Self::Unknown
        } else if compute_time_ms > REMOTE_BACKEND_THRESHOLD_MS {
            Self::RemoteSolver
        } else {
            Self::LocalHeuristic
        }
    }
}
