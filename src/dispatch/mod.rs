//! Classical and quantum-inspired dispatch heuristics.

mod classical;
/// Metric comparison and savings projections.
pub mod compare;
/// Tunable constants for both heuristics.
pub mod params;
mod quantum;
/// Deferred (future-returning) solver interface.
pub mod solver;
pub mod types;

pub use classical::{ClassicalDispatcher, dispatch_classical};
pub use compare::{BackendHint, Comparison, Improvement};
pub use params::{ClassicalParams, QuantumParams};
pub use quantum::{QuantumInspiredDispatcher, dispatch_quantum_inspired};
pub use solver::{DeferredSolver, QuantumInspiredSolver};
pub use types::{OptimizationInput, OptimizationMetrics, OptimizationResult};
