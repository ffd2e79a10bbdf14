use crate::error::Result;
use crate::generation::Variability;

use super::params::ClassicalParams;
use super::types::{
    OptimizationInput, OptimizationMetrics, OptimizationResult, balance_storage, delivered_energy,
};

/// Single-pass greedy dispatcher.
///
/// Absorbs surplus into storage (or covers deficit from it) at a fixed ramp
/// cap, curtails whatever storage cannot take, and backs the remaining
/// shortfall with fossil generation.
#[derive(Debug, Clone, Default)]
pub struct ClassicalDispatcher {
    params: ClassicalParams,
}

impl ClassicalDispatcher {
    /// Creates a dispatcher with the given constants.
    pub fn new(params: ClassicalParams) -> Self {
        Self { params }
    }

    /// Returns the constants this dispatcher prices with.
    pub fn params(&self) -> &ClassicalParams {
        &self.params
    }

    /// Dispatches one tick.
    ///
    /// Deterministic in `input`; `variability` only feeds the synthetic
    /// compute-time figure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::ComputationInvariantViolated`] if
    /// the input or any computed quantity is non-finite.
    pub fn dispatch<V: Variability + ?Sized>(
        &self,
        input: &OptimizationInput,
        variability: &mut V,
    ) -> Result<OptimizationResult> {
        input.check_finite()?;
        let p = &self.params;
        let total_generation = input.total_generation_mw();

        let step = balance_storage(input, p.ramp_fraction);
        let curtailment = step.spill;

        let delivered = delivered_energy(input, step.flow);
        let efficiency = (delivered / (total_generation + p.efficiency_epsilon) * 100.0).clamp(0.0, 100.0);
        let fossil_backup = (input.demand_mw - delivered).max(0.0);

        let metrics = OptimizationMetrics {
            total_cost: fossil_backup * p.backup_cost_per_mwh
                + curtailment * p.curtailment_penalty_per_mwh
                + step.flow.abs() * p.storage_cycling_cost_per_mwh,
            curtailment_mwh: curtailment,
            efficiency_pct: efficiency,
            emissions_t: fossil_backup * p.emission_factor_t_per_mwh,
            compute_time_ms: p.compute_time_base_ms + variability.unit() * p.compute_time_jitter_ms,
        };

        OptimizationResult {
            metrics,
            curtailment_mwh: curtailment,
            storage_flow_mwh: step.flow,
            new_storage_charge_mwh: step.new_charge,
        }
        .check_finite()
    }
}

/// Dispatches one tick with the greedy classical heuristic.
///
/// Convenience wrapper over [`ClassicalDispatcher::dispatch`].
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::dispatch::{ClassicalParams, OptimizationInput, dispatch_classical};
/// use grid_dispatch_sim::generation::FixedVariability;
///
/// let input = OptimizationInput {
///     solar_mw: 200.0,
///     wind_mw: 100.0,
///     demand_mw: 250.0,
///     storage_charge_mwh: 100.0,
///     storage_capacity_mwh: 200.0,
/// };
/// let r = dispatch_classical(&input, &ClassicalParams::default(), &mut FixedVariability(0.0)).unwrap();
/// assert_eq!(r.storage_flow_mwh, 40.0);
/// assert_eq!(r.metrics.total_cost, 130.0);
/// ```
pub fn dispatch_classical<V: Variability + ?Sized>(
    input: &OptimizationInput,
    params: &ClassicalParams,
    variability: &mut V,
) -> Result<OptimizationResult> {
    ClassicalDispatcher::new(params.clone()).dispatch(input, variability)
}
