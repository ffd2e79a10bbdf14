//! Deferred solver seam for the quantum-inspired path.
//!
//! The heuristic itself is synchronous, but callers only see a future so that
//! a genuinely slow external optimizer can be dropped in behind
//! [`DeferredSolver`] without changing the driver.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::generation::SeededVariability;

use super::params::{ClassicalParams, QuantumParams};
use super::quantum::QuantumInspiredDispatcher;
use super::types::{OptimizationInput, OptimizationResult};

/// A dispatch solver whose result arrives asynchronously.
#[async_trait]
pub trait DeferredSolver: Send + Sync {
    /// Short label for logs and reports.
    fn label(&self) -> &'static str;

    /// Solves one tick; resolves with the dispatch.
    async fn solve(&self, input: OptimizationInput) -> Result<OptimizationResult>;
}

/// Local stand-in for a remote QAOA backend.
///
/// Runs [`QuantumInspiredDispatcher`] inline; the future resolves on its first
/// poll. Compute-time jitter comes from an owned seeded
/// source so runs stay reproducible.
#[derive(Debug)]
pub struct QuantumInspiredSolver {
    dispatcher: QuantumInspiredDispatcher,
    variability: Mutex<SeededVariability>,
}

impl QuantumInspiredSolver {
    /// Creates a solver; `seed` drives only the synthetic compute time.
    pub fn new(shared: ClassicalParams, bonus: QuantumParams, seed: u64) -> Self {
        Self {
            dispatcher: QuantumInspiredDispatcher::new(shared, bonus),
            variability: Mutex::new(SeededVariability::new(seed)),
        }
    }
}

#[async_trait]
impl DeferredSolver for QuantumInspiredSolver {
    fn label(&self) -> &'static str {
        "quantum-inspired (QAOA simulation)"
    }

    async fn solve(&self, input: OptimizationInput) -> Result<OptimizationResult> {
        debug!("no remote QAOA backend configured, using quantum-inspired sampling");
        let mut variability = self.variability.lock().unwrap_or_else(PoisonError::into_inner);
        self.dispatcher.dispatch(&input, &mut *variability)
    }
}
