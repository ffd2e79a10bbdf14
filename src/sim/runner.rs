//! Wall-clock paced day loop with live control commands.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::dispatch::OptimizationResult;
use crate::error::{EngineError, Result};

use super::driver::{PendingDispatch, SimulationDriver};
use super::types::TickRecord;

/// Control input accepted while a real-time run is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Swap in a new configuration and re-evaluate at the current time.
    UpdateConfig(SimulationConfig),
    /// Pause or resume the timer.
    Toggle,
    /// Return to the start state; leaves the run paused.
    Reset,
    /// Stop the run, dropping any outstanding dispatches.
    Shutdown,
}

type InFlight = JoinSet<(PendingDispatch, Result<OptimizationResult>)>;

fn spawn_dispatch(driver: &mut SimulationDriver, in_flight: &mut InFlight) -> Result<()> {
    let pending = driver.begin_tick()?;
    let solver = driver.solver();
    in_flight.spawn(async move {
        let result = solver.solve(*pending.input()).await;
        (pending, result)
    });
    Ok(())
}

fn abort_in_flight(in_flight: &mut InFlight, reason: &'static str) {
    if !in_flight.is_empty() {
        warn!(pending = in_flight.len(), reason, "aborting in-flight quantum-inspired dispatches");
    }
    in_flight.abort_all();
}

/// Runs up to `ticks` ticks paced by the configured tick interval.
///
/// Each timer firing starts a tick: the classical result commits at once and
/// the deferred quantum-inspired solve is spawned; its result commits when it
/// resolves, unless a [`Command::UpdateConfig`] or [`Command::Reset`] has
/// superseded it in the meantime. Commands are handled ahead of timer
/// firings. The run ends when the tick budget is spent and nothing is in
/// flight, on [`Command::Shutdown`], or when the command channel closes
/// while paused.
///
/// `on_record` sees every committed tick as it lands; the same records are
/// returned in commit order.
///
/// # Errors
///
/// Propagates heuristic errors, and returns
/// [`EngineError::SolverUnavailable`] if a solve task panics.
pub async fn run_realtime(
    driver: &mut SimulationDriver,
    ticks: usize,
    mut commands: mpsc::Receiver<Command>,
    mut on_record: impl FnMut(&TickRecord),
) -> Result<Vec<TickRecord>> {
    let period = Duration::from_millis(driver.run_config().tick_interval_ms);
    let mut timer = time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight = InFlight::new();
    let mut records = Vec::with_capacity(ticks);
    let mut dispatched = 0_usize;
    let mut commands_open = true;

    info!(ticks, interval_ms = period.as_millis() as u64, solver = driver.solver_label(), "real-time run started");
    driver.set_running(true);

    loop {
        if in_flight.is_empty() && (dispatched >= ticks || (!commands_open && !driver.is_running())) {
            break;
        }

        tokio::select! {
            biased;

            cmd = commands.recv(), if commands_open => match cmd {
                Some(Command::UpdateConfig(config)) => {
                    let previous_epoch = driver.epoch();
                    match driver.apply_config(config) {
                        Ok(()) => {
                            abort_in_flight(&mut in_flight, "configuration changed");
                            debug!(previous_epoch, epoch = driver.epoch(), "re-evaluating at current time");
                            spawn_dispatch(driver, &mut in_flight)?;
                        }
                        Err(e) => warn!(error = %e, "rejected configuration update"),
                    }
                }
                Some(Command::Toggle) => {
                    driver.toggle_running();
                }
                Some(Command::Reset) => {
                    abort_in_flight(&mut in_flight, "reset");
                    driver.reset();
                }
                Some(Command::Shutdown) => {
                    abort_in_flight(&mut in_flight, "shutdown");
                    break;
                }
                None => commands_open = false,
            },

            Some(joined) = in_flight.join_next() => match joined {
                Ok((pending, result)) => {
                    if let Some(record) = driver.commit(pending, result?) {
                        on_record(&record);
                        records.push(record);
                    }
                }
                Err(e) if e.is_cancelled() => debug!("quantum-inspired dispatch cancelled"),
                Err(e) => return Err(EngineError::SolverUnavailable(e.to_string())),
            },

            _ = timer.tick(), if driver.is_running() && dispatched < ticks => {
                spawn_dispatch(driver, &mut in_flight)?;
                driver.advance_clock();
                dispatched += 1;
            }

            else => break,
        }
    }

    driver.set_running(false);
    info!(dispatched, committed = records.len(), "real-time run finished");
    Ok(records)
}
