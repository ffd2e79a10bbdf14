use crate::error::{EngineError, Result};
use crate::generation::Variability;

use super::params::{ClassicalParams, QuantumParams};
use super::types::{
    OptimizationInput, OptimizationMetrics, OptimizationResult, balance_storage, delivered_energy,
};

/// One scored point of the parameter sweep.
#[derive(Debug, Clone, Copy)]
struct Sample {
    cost: f64,
    curtailment: f64,
    flow: f64,
    new_charge: f64,
}

/// "Quantum-inspired" dispatcher.
///
/// Sweeps a mixing parameter `beta = i / samples`, widening the ramp cap and
/// discounting curtailment as `beta` grows, and keeps the cheapest sample
/// (first one wins on ties). Its edge over [`super::ClassicalDispatcher`]
/// comes entirely from the bonus constants in [`QuantumParams`]; it is a
/// stand-in for a real solver, not an optimizer in its own right.
#[derive(Debug, Clone, Default)]
pub struct QuantumInspiredDispatcher {
    shared: ClassicalParams,
    bonus: QuantumParams,
}

impl QuantumInspiredDispatcher {
    /// Creates a dispatcher from the shared cost table and the bonus table.
    pub fn new(shared: ClassicalParams, bonus: QuantumParams) -> Self {
        Self { shared, bonus }
    }

    /// Returns the bonus constants.
    pub fn bonus(&self) -> &QuantumParams {
        &self.bonus
    }

    fn sample(&self, input: &OptimizationInput, beta: f64) -> Sample {
        let (p, q) = (&self.shared, &self.bonus);
        let rate = p.ramp_fraction + beta * q.ramp_spread;
        let step = balance_storage(input, rate);

        let curtailment = if input.surplus_mw() > 0.0 {
            step.spill.max(0.0) * (q.curtailment_discount_base + beta * q.curtailment_discount_spread)
        } else {
            0.0
        };

        let delivered = delivered_energy(input, step.flow);
        let fossil_backup = (input.demand_mw - delivered).max(0.0) * q.backup_factor;
        let cost = fossil_backup * p.backup_cost_per_mwh
            + curtailment * p.curtailment_penalty_per_mwh
            + step.flow.abs() * q.storage_cycling_cost_per_mwh;

        Sample {
            cost,
            curtailment,
            flow: step.flow,
            new_charge: step.new_charge,
        }
    }

    /// Dispatches one tick synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when the sweep has no
    /// samples, and [`EngineError::ComputationInvariantViolated`] if the input
    /// or any computed quantity is non-finite.
    pub fn dispatch<V: Variability + ?Sized>(
        &self,
        input: &OptimizationInput,
        variability: &mut V,
    ) -> Result<OptimizationResult> {
        input.check_finite()?;
        let (p, q) = (&self.shared, &self.bonus);
        if q.samples == 0 {
            return Err(EngineError::InvalidConfiguration {
                field: "quantum.samples".into(),
                message: "must be > 0".into(),
            });
        }

        let mut best = self.sample(input, 0.0);
        for i in 1..q.samples {
            let candidate = self.sample(input, i as f64 / q.samples as f64);
            if candidate.cost < best.cost {
                best = candidate;
            }
        }

        let total_generation = input.total_generation_mw();
        let delivered = delivered_energy(input, best.flow);
        let efficiency = (delivered / (total_generation + p.efficiency_epsilon) * 100.0 * q.efficiency_bonus)
            .clamp(0.0, 100.0);
        let fossil_backup = (input.demand_mw - delivered).max(0.0) * q.backup_factor;

        let metrics = OptimizationMetrics {
            total_cost: best.cost,
            curtailment_mwh: best.curtailment,
            efficiency_pct: efficiency,
            emissions_t: fossil_backup * p.emission_factor_t_per_mwh,
            compute_time_ms: q.compute_time_base_ms + variability.unit() * q.compute_time_jitter_ms,
        };

        OptimizationResult {
            metrics,
            curtailment_mwh: best.curtailment,
            storage_flow_mwh: best.flow,
            new_storage_charge_mwh: best.new_charge,
        }
        .check_finite()
    }
}

/// Dispatches one tick with the quantum-inspired heuristic, synchronously.
///
/// Convenience wrapper over [`QuantumInspiredDispatcher::dispatch`]; the
/// deferred entry point is [`super::QuantumInspiredSolver`].
pub fn dispatch_quantum_inspired<V: Variability + ?Sized>(
    input: &OptimizationInput,
    shared: &ClassicalParams,
    bonus: &QuantumParams,
    variability: &mut V,
) -> Result<OptimizationResult> {
    QuantumInspiredDispatcher::new(shared.clone(), bonus.clone()).dispatch(input, variability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ClassicalDispatcher;
    use crate::generation::FixedVariability;

    fn input(solar: f64, wind: f64, demand: f64, charge: f64, cap: f64) -> OptimizationInput {
        OptimizationInput {
            solar_mw: solar,
            wind_mw: wind,
            demand_mw: demand,
            storage_charge_mwh: charge,
            storage_capacity_mwh: cap,
        }
    }

    fn run(i: &OptimizationInput) -> OptimizationResult {
        QuantumInspiredDispatcher::default()
            .dispatch(i, &mut FixedVariability(0.0))
            .expect("finite input")
    }

    #[test]
    fn surplus_picks_widest_useful_ramp() {
        // beta = 0.5 reaches rate 0.25 → 50 MWh, absorbing the whole surplus
        let r = run(&input(200.0, 100.0, 250.0, 100.0, 200.0));
        assert!((r.storage_flow_mwh - 50.0).abs() < 1e-9);
        assert!(r.curtailment_mwh.abs() < 1e-9);
        assert!((r.new_storage_charge_mwh - 150.0).abs() < 1e-9);
        assert!((r.metrics.total_cost - 75.0).abs() < 1e-9);
        assert_eq!(r.metrics.emissions_t, 0.0);
        let expected_eff = 250.0 / 300.001 * 100.0 * 1.08;
        assert!((r.metrics.efficiency_pct - expected_eff).abs() < 1e-9);
    }

    #[test]
    fn deficit_applies_backup_bonus() {
        let r = run(&input(0.0, 50.0, 200.0, 30.0, 200.0));
        assert_eq!(r.storage_flow_mwh, -30.0);
        assert_eq!(r.new_storage_charge_mwh, 0.0);
        // 120 × 0.92 × 80 + 30 × 1.5
        assert!((r.metrics.total_cost - 8877.0).abs() < 1e-9);
        assert!((r.metrics.emissions_t - 55.2).abs() < 1e-9);
        assert_eq!(r.metrics.efficiency_pct, 100.0);
    }

    #[test]
    fn first_sample_retained_on_tie() {
        // Ramp never binds: every sample moves the same 5 MWh at the same cost.
        let r = run(&input(0.0, 0.0, 5.0, 100.0, 200.0));
        assert_eq!(r.storage_flow_mwh, -5.0);
        assert!((r.metrics.total_cost - 7.5).abs() < 1e-9);
    }

    #[test]
    fn curtailment_discount_applies_when_ramp_binds() {
        // Storage nearly full: headroom 4 MWh at every beta.
        let r = run(&input(300.0, 0.0, 100.0, 196.0, 200.0));
        assert!((r.storage_flow_mwh - 4.0).abs() < 1e-9);
        // cheapest is beta = 0: 196 × 0.65
        assert!((r.curtailment_mwh - 196.0 * 0.65).abs() < 1e-9);
    }

    #[test]
    fn never_costs_more_than_classical() {
        let classical = ClassicalDispatcher::default();
        let cases = [
            input(200.0, 100.0, 250.0, 100.0, 200.0),
            input(0.0, 50.0, 200.0, 30.0, 200.0),
            input(400.0, 300.0, 150.0, 0.0, 200.0),
            input(10.0, 20.0, 600.0, 200.0, 200.0),
            input(0.0, 0.0, 0.0, 0.0, 50.0),
        ];
        for i in &cases {
            let c = classical.dispatch(i, &mut FixedVariability(0.0)).unwrap();
            let q = run(i);
            assert!(
                q.metrics.total_cost <= c.metrics.total_cost,
                "{i:?}: quantum {} > classical {}",
                q.metrics.total_cost,
                c.metrics.total_cost
            );
        }
    }

    #[test]
    fn compute_time_far_below_classical() {
        let i = input(1.0, 1.0, 1.0, 0.0, 1.0);
        let q = QuantumInspiredDispatcher::default()
            .dispatch(&i, &mut FixedVariability(0.999))
            .unwrap();
        assert!(q.metrics.compute_time_ms >= 12.0 && q.metrics.compute_time_ms < 20.0);
    }

    #[test]
    fn zero_samples_is_rejected() {
        let d = QuantumInspiredDispatcher::new(
            ClassicalParams::default(),
            QuantumParams {
                samples: 0,
                ..QuantumParams::default()
            },
        );
        let err = d
            .dispatch(&input(1.0, 1.0, 1.0, 0.0, 1.0), &mut FixedVariability(0.0))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    }
}
