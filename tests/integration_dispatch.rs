//! Integration tests pinning both heuristics on hand-computed ticks.

mod common;

use grid_dispatch_sim::dispatch::{
    ClassicalParams, Comparison, DeferredSolver, QuantumInspiredSolver, QuantumParams,
    dispatch_classical, dispatch_quantum_inspired,
};
use grid_dispatch_sim::generation::FixedVariability;

#[test]
fn classical_surplus_scenario() {
    let r = dispatch_classical(
        &common::surplus_input(),
        &ClassicalParams::default(),
        &mut FixedVariability(0.0),
    )
    .unwrap();
    assert_eq!(r.storage_flow_mwh, 40.0);
    assert_eq!(r.curtailment_mwh, 10.0);
    assert_eq!(r.new_storage_charge_mwh, 140.0);
    assert_eq!(r.metrics.total_cost, 130.0);
    assert_eq!(r.metrics.emissions_t, 0.0);
    assert_eq!(r.metrics.compute_time_ms, 150.0);
}

#[test]
fn classical_deficit_scenario() {
    let r = dispatch_classical(
        &common::deficit_input(),
        &ClassicalParams::default(),
        &mut FixedVariability(0.0),
    )
    .unwrap();
    assert_eq!(r.storage_flow_mwh, -30.0);
    assert_eq!(r.new_storage_charge_mwh, 0.0);
    assert!((r.metrics.total_cost - 9660.0).abs() < common::EPS);
    assert!((r.metrics.emissions_t - 60.0).abs() < common::EPS);
}

#[test]
fn quantum_beats_classical_on_both_scenarios() {
    let shared = ClassicalParams::default();
    let bonus = QuantumParams::default();
    for input in [common::surplus_input(), common::deficit_input()] {
        let c = dispatch_classical(&input, &shared, &mut FixedVariability(0.5)).unwrap();
        let q = dispatch_quantum_inspired(&input, &shared, &bonus, &mut FixedVariability(0.5)).unwrap();
        let cmp = Comparison::between(&c.metrics, &q.metrics);
        assert!(cmp.cost.diff > 0.0, "{input:?}");
        assert!(cmp.cost.percent > 0.0);
        assert!(q.metrics.compute_time_ms < c.metrics.compute_time_ms);
    }
}

#[test]
fn repeated_dispatch_is_idempotent() {
    let shared = ClassicalParams::default();
    let bonus = QuantumParams::default();
    let input = common::surplus_input();
    let a = dispatch_quantum_inspired(&input, &shared, &bonus, &mut FixedVariability(0.3)).unwrap();
    let b = dispatch_quantum_inspired(&input, &shared, &bonus, &mut FixedVariability(0.3)).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn deferred_solver_matches_direct_call_on_deficit() {
    let solver = QuantumInspiredSolver::new(ClassicalParams::default(), QuantumParams::default(), 5);
    let deferred = solver.solve(common::deficit_input()).await.unwrap();
    assert!((deferred.metrics.total_cost - 8877.0).abs() < common::EPS);
    assert!((deferred.metrics.emissions_t - 55.2).abs() < common::EPS);
    assert!(deferred.metrics.compute_time_ms >= 12.0 && deferred.metrics.compute_time_ms < 20.0);
}

#[test]
fn annualized_projection_of_deficit_savings() {
    let shared = ClassicalParams::default();
    let c = dispatch_classical(&common::deficit_input(), &shared, &mut FixedVariability(0.0)).unwrap();
    let q = dispatch_quantum_inspired(
        &common::deficit_input(),
        &shared,
        &QuantumParams::default(),
        &mut FixedVariability(0.0),
    )
    .unwrap();
    let annual = Comparison::between(&c.metrics, &q.metrics).annualized();
    assert!((annual.cost_savings - 783.0 * 8760.0).abs() < 1e-6);
    assert!((annual.emissions_reduction_t - 4.8 * 8760.0).abs() < 1e-6);
}
