//! Simulation driver: owns the clock, grid state and both dispatchers.
//!
//! A tick is split in two. [`SimulationDriver::begin_tick`] samples generation,
//! runs the classical heuristic and commits its metrics immediately; the
//! input of the returned [`PendingDispatch`] is then handed to the deferred
//! quantum-inspired solver, and [`SimulationDriver::commit`] applies that result once it
//! resolves. Every pending dispatch carries the configuration epoch it was
//! started under, so a result that resolves after a configuration change or
//! reset is discarded instead of overwriting newer state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{RunConfig, ScenarioConfig, SimulationConfig};
use crate::dispatch::{
    ClassicalDispatcher, DeferredSolver, OptimizationInput, OptimizationMetrics,
    OptimizationResult, QuantumInspiredSolver,
};
use crate::error::Result;
use crate::generation::{GenerationSnapshot, SeededVariability, Variability};

use super::clock::SimClock;
use super::state::GridState;
use super::types::TickRecord;

/// Seed offset for the classical compute-time jitter, decorrelating it from generation.
const CLASSICAL_TIMING_SEED_OFFSET: u64 = 17;
/// Seed offset for the quantum-inspired compute-time jitter.
const QUANTUM_TIMING_SEED_OFFSET: u64 = 31;

/// Builds one tick's dispatch input from the configuration, the storage
/// charge carried over from the previous tick, and the time of day.
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::config::SimulationConfig;
/// use grid_dispatch_sim::generation::FixedVariability;
/// use grid_dispatch_sim::sim::driver::tick;
///
/// let input = tick(&SimulationConfig::default(), 100.0, 2.0, &mut FixedVariability(0.5));
/// assert_eq!(input.solar_mw, 0.0);
/// assert_eq!(input.storage_charge_mwh, 100.0);
/// assert_eq!(input.storage_capacity_mwh, 200.0);
/// ```
pub fn tick(
    config: &SimulationConfig,
    previous_storage_charge_mwh: f64,
    time_of_day: f64,
    variability: &mut impl Variability,
) -> OptimizationInput {
    let snapshot = GenerationSnapshot::sample(time_of_day, config, variability);
    OptimizationInput::from_snapshot(
        &snapshot,
        previous_storage_charge_mwh,
        config.storage_capacity_mwh,
    )
}

/// A tick whose classical result is committed and whose quantum-inspired
/// result is still outstanding.
#[derive(Debug, Clone)]
pub struct PendingDispatch {
    epoch: u64,
    tick: usize,
    time_of_day: f64,
    input: OptimizationInput,
    classical: OptimizationResult,
}

impl PendingDispatch {
    /// Configuration epoch the dispatch was started under.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The input both heuristics were given.
    pub fn input(&self) -> &OptimizationInput {
        &self.input
    }

    pub fn classical(&self) -> &OptimizationResult {
        &self.classical
    }
}

/// Drives the day loop and holds the state both heuristics report into.
pub struct SimulationDriver {
    config: SimulationConfig,
    run: RunConfig,
    classical: ClassicalDispatcher,
    solver: Arc<dyn DeferredSolver>,
    generation_rng: SeededVariability,
    timing_rng: SeededVariability,
    clock: SimClock,
    grid: GridState,
    classical_metrics: OptimizationMetrics,
    quantum_metrics: OptimizationMetrics,
    epoch: u64,
    running: bool,
}

impl SimulationDriver {
    /// Builds a driver from a scenario, using the local quantum-inspired solver.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidConfiguration`] for the first problem
    /// [`ScenarioConfig::validate`] reports.
    pub fn new(scenario: &ScenarioConfig) -> Result<Self> {
        if let Some(e) = scenario.validate().into_iter().next() {
            return Err(e.into());
        }

        let seed = scenario.run.seed;
        let solver = QuantumInspiredSolver::new(
            scenario.classical.clone(),
            scenario.quantum.clone(),
            seed.wrapping_add(QUANTUM_TIMING_SEED_OFFSET),
        );
        let s = &scenario.simulation;

        Ok(Self {
            config: s.clone(),
            run: scenario.run.clone(),
            classical: ClassicalDispatcher::new(scenario.classical.clone()),
            solver: Arc::new(solver),
            generation_rng: SeededVariability::new(seed),
            timing_rng: SeededVariability::new(seed.wrapping_add(CLASSICAL_TIMING_SEED_OFFSET)),
            clock: SimClock::new(scenario.run.start_hour),
            grid: GridState::new(
                s.solar_capacity_mw,
                s.wind_capacity_mw,
                s.storage_capacity_mwh,
                scenario.run.initial_storage_fraction,
            ),
            classical_metrics: OptimizationMetrics::default(),
            quantum_metrics: OptimizationMetrics::default(),
            epoch: 0,
            running: false,
        })
    }

    /// Replaces the deferred solver, e.g. with a remote backend.
    pub fn with_solver(mut self, solver: Arc<dyn DeferredSolver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run
    }

    /// Grid state as of the last committed quantum-inspired dispatch.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn classical_metrics(&self) -> &OptimizationMetrics {
        &self.classical_metrics
    }

    pub fn quantum_metrics(&self) -> &OptimizationMetrics {
        &self.quantum_metrics
    }

    pub fn time_of_day(&self) -> f64 {
        self.clock.time_of_day()
    }

    /// Current configuration epoch; bumped by every config change and reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flips between running and paused, returning the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        info!(running = self.running, "simulation toggled");
        self.running
    }

    pub fn solver_label(&self) -> &'static str {
        self.solver.label()
    }

    /// Simulated hours covered by one tick at the current speed.
    pub fn hours_per_tick(&self) -> f64 {
        self.config.hours_per_tick()
    }

    /// Samples generation at the current time and commits the classical result.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::EngineError::ComputationInvariantViolated`] from the
    /// classical heuristic.
    pub fn begin_tick(&mut self) -> Result<PendingDispatch> {
        let time_of_day = self.clock.time_of_day();
        let input = tick(
            &self.config,
            self.grid.storage.charge_mwh,
            time_of_day,
            &mut self.generation_rng,
        );
        let classical = self.classical.dispatch(&input, &mut self.timing_rng)?;
        self.classical_metrics = classical.metrics;

        Ok(PendingDispatch {
            epoch: self.epoch,
            tick: self.clock.ticks(),
            time_of_day,
            input,
            classical,
        })
    }

    /// Shared handle to the deferred solver, for spawning solves off the driver.
    pub fn solver(&self) -> Arc<dyn DeferredSolver> {
        Arc::clone(&self.solver)
    }

    /// Applies a resolved quantum-inspired result.
    ///
    /// Returns `None`, leaving state untouched, when `pending` belongs to an
    /// earlier configuration epoch.
    pub fn commit(&mut self, pending: PendingDispatch, quantum: OptimizationResult) -> Option<TickRecord> {
        if pending.epoch != self.epoch {
            warn!(
                tick = pending.tick,
                stale_epoch = pending.epoch,
                epoch = self.epoch,
                "discarding quantum-inspired result from a superseded configuration"
            );
            return None;
        }

        self.quantum_metrics = quantum.metrics;
        self.grid.apply(&pending.input, &quantum);
        debug!(
            tick = pending.tick,
            time_of_day = pending.time_of_day,
            classical_cost = pending.classical.metrics.total_cost,
            quantum_cost = quantum.metrics.total_cost,
            storage_mwh = self.grid.storage.charge_mwh,
            "tick committed"
        );

        Some(TickRecord {
            tick: pending.tick,
            time_of_day: pending.time_of_day,
            solar_mw: pending.input.solar_mw,
            wind_mw: pending.input.wind_mw,
            demand_mw: pending.input.demand_mw,
            storage_charge_mwh: self.grid.storage.charge_mwh,
            storage_flow_mwh: quantum.storage_flow_mwh,
            classical: pending.classical.metrics,
            quantum: quantum.metrics,
        })
    }

    /// Advances simulated time by one tick and returns the new time of day.
    pub fn advance_clock(&mut self) -> f64 {
        self.clock.advance(self.config.speed)
    }

    /// Runs both heuristics at the current time without advancing the clock.
    ///
    /// # Errors
    ///
    /// Propagates errors from either heuristic.
    pub async fn evaluate(&mut self) -> Result<Option<TickRecord>> {
        let pending = self.begin_tick()?;
        let quantum = self.solver.solve(pending.input).await?;
        Ok(self.commit(pending, quantum))
    }

    /// Runs `ticks` ticks back to back, evaluating before each clock advance.
    ///
    /// # Errors
    ///
    /// Stops at the first heuristic error.
    pub async fn run(&mut self, ticks: usize) -> Result<Vec<TickRecord>> {
        info!(
            ticks,
            start_hour = self.clock.time_of_day(),
            speed = self.config.speed,
            solver = self.solver.label(),
            "simulation started"
        );
        self.running = true;
        let mut records = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            if let Some(record) = self.evaluate().await? {
                records.push(record);
            }
            self.advance_clock();
        }
        self.running = false;
        info!(ticks = records.len(), end_hour = self.clock.time_of_day(), "simulation finished");
        Ok(records)
    }

    /// Swaps in a new configuration without advancing the clock.
    ///
    /// Bumps the epoch so in-flight quantum-inspired results are discarded,
    /// updates grid capacities, and clamps stored energy into the new storage
    /// capacity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidConfiguration`] and keeps the old
    /// configuration if `config` is invalid.
    pub fn apply_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.ensure_valid()?;
        self.epoch += 1;
        self.grid.resize(
            config.solar_capacity_mw,
            config.wind_capacity_mw,
            config.storage_capacity_mwh,
        );
        info!(
            epoch = self.epoch,
            solar_mw = config.solar_capacity_mw,
            wind_mw = config.wind_capacity_mw,
            storage_mwh = config.storage_capacity_mwh,
            demand_mw = config.base_demand_mw,
            speed = config.speed,
            "configuration updated"
        );
        self.config = config;
        Ok(())
    }

    /// Applies `config` and re-evaluates both heuristics at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidConfiguration`] for an invalid config,
    /// or any heuristic error from the re-evaluation.
    pub async fn update_config(&mut self, config: SimulationConfig) -> Result<Option<TickRecord>> {
        self.apply_config(config)?;
        self.evaluate().await
    }

    /// Returns to the start hour with storage at its initial fraction,
    /// metrics zeroed, and the simulation paused.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.clock.reset();
        self.grid = GridState::new(
            self.config.solar_capacity_mw,
            self.config.wind_capacity_mw,
            self.config.storage_capacity_mwh,
            self.run.initial_storage_fraction,
        );
        self.classical_metrics = OptimizationMetrics::default();
        self.quantum_metrics = OptimizationMetrics::default();
        self.running = false;
        info!(epoch = self.epoch, "simulation reset");
    }
}

impl std::fmt::Debug for SimulationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationDriver")
            .field("config", &self.config)
            .field("solver", &self.solver.label())
            .field("time_of_day", &self.clock.time_of_day())
            .field("grid", &self.grid)
            .field("epoch", &self.epoch)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
