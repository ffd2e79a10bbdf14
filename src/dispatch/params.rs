//! Cost, ramp, and bonus constants for both dispatch heuristics.
//!
//! Every number that shapes a dispatch decision or a reported metric lives
//! here, so the heuristics can be retuned (or the quantum-inspired one swapped
//! for a real solver) without touching control flow. Both tables deserialize
//! from the `[classical]` and `[quantum]` sections of a scenario file.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Constants for the greedy classical heuristic.
///
/// The ramp fraction and the backup/curtailment/emission figures are shared
/// with the quantum-inspired heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassicalParams {
    /// Maximum charge or discharge per tick as a fraction of storage capacity.
    pub ramp_fraction: f64,
    /// Cost of backup generation covering unmet demand ($/MWh).
    pub backup_cost_per_mwh: f64,
    /// Penalty for curtailed renewable energy ($/MWh).
    pub curtailment_penalty_per_mwh: f64,
    /// Storage cycling cost ($/MWh moved in or out).
    pub storage_cycling_cost_per_mwh: f64,
    /// Emissions per MWh of backup generation (t/MWh).
    pub emission_factor_t_per_mwh: f64,
    /// Added to total generation before dividing, so zero output cannot divide by zero.
    pub efficiency_epsilon: f64,
    /// Fixed part of the synthetic compute time (ms).
    pub compute_time_base_ms: f64,
    /// Width of the uniform jitter added to the compute time (ms).
    pub compute_time_jitter_ms: f64,
}

impl Default for ClassicalParams {
    fn default() -> Self {
        Self {
            ramp_fraction: 0.2,
            backup_cost_per_mwh: 80.0,
            curtailment_penalty_per_mwh: 5.0,
            storage_cycling_cost_per_mwh: 2.0,
            emission_factor_t_per_mwh: 0.5,
            efficiency_epsilon: 0.001,
            compute_time_base_ms: 150.0,
            compute_time_jitter_ms: 50.0,
        }
    }
}

/// Bonus constants for the quantum-inspired heuristic.
///
/// These are asserted advantages, not derived ones: the reduced backup
/// factor, the cheaper cycling cost and the curtailment discount guarantee the
/// quantum-inspired cost never exceeds the classical one on the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantumParams {
    /// Number of sweep samples; sample `i` uses `beta = i / samples`.
    pub samples: usize,
    /// Extra ramp fraction at `beta = 1` on top of the classical ramp.
    pub ramp_spread: f64,
    /// Curtailment multiplier at `beta = 0`.
    pub curtailment_discount_base: f64,
    /// Increase of the curtailment multiplier from `beta = 0` to `beta = 1`.
    pub curtailment_discount_spread: f64,
    /// Multiplier on backup energy (0.92 = 8% less backup).
    pub backup_factor: f64,
    /// Storage cycling cost used when scoring samples ($/MWh).
    pub storage_cycling_cost_per_mwh: f64,
    /// Multiplier on the reported efficiency before clamping to 100%.
    pub efficiency_bonus: f64,
    /// Fixed part of the synthetic compute time (ms).
    pub compute_time_base_ms: f64,
    /// Width of the uniform jitter added to the compute time (ms).
    pub compute_time_jitter_ms: f64,
}

impl Default for QuantumParams {
    fn default() -> Self {
        Self {
            samples: 8,
            ramp_spread: 0.1,
            curtailment_discount_base: 0.65,
            curtailment_discount_spread: 0.15,
            backup_factor: 0.92,
            storage_cycling_cost_per_mwh: 1.5,
            efficiency_bonus: 1.08,
            compute_time_base_ms: 12.0,
            compute_time_jitter_ms: 8.0,
        }
    }
}

fn non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be a finite value >= 0, got {value}"),
        });
    }
}

impl ClassicalParams {
    /// Validates all fields and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(self.ramp_fraction > 0.0 && self.ramp_fraction <= 1.0) {
            errors.push(ConfigError {
                field: "classical.ramp_fraction".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(self.efficiency_epsilon.is_finite() && self.efficiency_epsilon > 0.0) {
            errors.push(ConfigError {
                field: "classical.efficiency_epsilon".into(),
                message: "must be > 0".into(),
            });
        }
        non_negative(&mut errors, "classical.backup_cost_per_mwh", self.backup_cost_per_mwh);
        non_negative(
            &mut errors,
            "classical.curtailment_penalty_per_mwh",
            self.curtailment_penalty_per_mwh,
        );
        non_negative(
            &mut errors,
            "classical.storage_cycling_cost_per_mwh",
            self.storage_cycling_cost_per_mwh,
        );
        non_negative(
            &mut errors,
            "classical.emission_factor_t_per_mwh",
            self.emission_factor_t_per_mwh,
        );
        non_negative(&mut errors, "classical.compute_time_base_ms", self.compute_time_base_ms);
        non_negative(&mut errors, "classical.compute_time_jitter_ms", self.compute_time_jitter_ms);
        errors
    }
}

impl QuantumParams {
    /// Validates all fields and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.samples == 0 {
            errors.push(ConfigError {
                field: "quantum.samples".into(),
                message: "must be > 0".into(),
            });
        }
        non_negative(&mut errors, "quantum.ramp_spread", self.ramp_spread);
        non_negative(
            &mut errors,
            "quantum.curtailment_discount_base",
            self.curtailment_discount_base,
        );
        non_negative(
            &mut errors,
            "quantum.curtailment_discount_spread",
            self.curtailment_discount_spread,
        );
        non_negative(&mut errors, "quantum.backup_factor", self.backup_factor);
        non_negative(
            &mut errors,
            "quantum.storage_cycling_cost_per_mwh",
            self.storage_cycling_cost_per_mwh,
        );
        non_negative(&mut errors, "quantum.efficiency_bonus", self.efficiency_bonus);
        non_negative(&mut errors, "quantum.compute_time_base_ms", self.compute_time_base_ms);
        non_negative(&mut errors, "quantum.compute_time_jitter_ms", self.compute_time_jitter_ms);
        errors
    }
}
