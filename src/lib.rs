//! Renewable grid simulation comparing a classical and a quantum-inspired
//! dispatch heuristic over a simulated day.

/// Scenario configuration, presets and validation.
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generation;
pub mod io;
/// Simulation driver, clock, runner and KPIs.
pub mod sim;
