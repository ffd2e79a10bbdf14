//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatch::{ClassicalParams, QuantumParams};
use crate::error::EngineError;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Capacities, base demand, and speed multiplier.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Run length, timing, seed, and initial state.
    #[serde(default)]
    pub run: RunConfig,
    /// Classical heuristic constants (shared cost table).
    #[serde(default)]
    pub classical: ClassicalParams,
    /// Quantum-inspired bonus constants.
    #[serde(default)]
    pub quantum: QuantumParams,
}

/// Grid capacities and simulation speed; the user-adjustable surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Installed solar capacity (MW).
    pub solar_capacity_mw: f64,
    /// Installed wind capacity (MW).
    pub wind_capacity_mw: f64,
    /// Storage energy capacity (MWh).
    pub storage_capacity_mwh: f64,
    /// Demand scale (MW).
    pub base_demand_mw: f64,
    /// Multiplier on simulated hours advanced per tick (must be > 0).
    pub speed: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            solar_capacity_mw: 300.0,
            wind_capacity_mw: 250.0,
            storage_capacity_mwh: 200.0,
            base_demand_mw: 400.0,
            speed: 2,
        }
    }
}

/// Recommended (dashboard slider) range for capacities, in MW / MWh.
const CAPACITY_RANGE: (f64, f64) = (50.0, 500.0);
/// Recommended range for base demand (MW).
const DEMAND_RANGE: (f64, f64) = (100.0, 600.0);
/// Recommended range for the speed multiplier.
const SPEED_RANGE: (u32, u32) = (1, 10);

fn positive(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be > 0, got {value}"),
        });
    }
}

fn warn_outside(field: &str, value: f64, (lo, hi): (f64, f64)) {
    if value.is_finite() && value > 0.0 && !(lo..=hi).contains(&value) {
        warn!(field, value, lo, hi, "outside the recommended range");
    }
}

impl SimulationConfig {
    /// Validates all fields and returns a list of errors.
    ///
    /// Values outside the recommended ranges are accepted with a warning.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        positive(&mut errors, "simulation.solar_capacity_mw", self.solar_capacity_mw);
        positive(&mut errors, "simulation.wind_capacity_mw", self.wind_capacity_mw);
        positive(&mut errors, "simulation.storage_capacity_mwh", self.storage_capacity_mwh);
        positive(&mut errors, "simulation.base_demand_mw", self.base_demand_mw);
        if self.speed == 0 {
            errors.push(ConfigError {
                field: "simulation.speed".into(),
                message: "must be > 0".into(),
            });
        }

        warn_outside("simulation.solar_capacity_mw", self.solar_capacity_mw, CAPACITY_RANGE);
        warn_outside("simulation.wind_capacity_mw", self.wind_capacity_mw, CAPACITY_RANGE);
        warn_outside("simulation.storage_capacity_mwh", self.storage_capacity_mwh, CAPACITY_RANGE);
        warn_outside("simulation.base_demand_mw", self.base_demand_mw, DEMAND_RANGE);
        if self.speed > SPEED_RANGE.1 {
            warn!(speed = self.speed, "simulation.speed outside the recommended range");
        }
        errors
    }

    /// Validates at the engine boundary, failing on the first problem.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] for a non-positive
    /// capacity, base demand, or speed.
    pub fn ensure_valid(&self) -> Result<(), EngineError> {
        match self.validate().into_iter().next() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Simulated hours advanced per tick (`0.1 × speed`).
    pub fn hours_per_tick(&self) -> f64 {
        crate::sim::clock::BASE_HOURS_PER_TICK * f64::from(self.speed)
    }
}

/// Run length, wall-clock timing, seed, and initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Master random seed for generation variability and compute-time jitter.
    pub seed: u64,
    /// Number of ticks to simulate.
    pub ticks: usize,
    /// Wall-clock period between ticks in real-time mode (ms).
    pub tick_interval_ms: u64,
    /// Simulated hour the clock starts (and resets) at.
    pub start_hour: f64,
    /// Initial storage charge as a fraction of capacity.
    pub initial_storage_fraction: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 120,
            tick_interval_ms: 100,
            start_hour: 6.0,
            initial_storage_fraction: 0.5,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.speed"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario (the dashboard's default settings).
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the high-renewables preset: oversized solar and wind fleets.
    pub fn high_renewables() -> Self {
        Self {
            simulation: SimulationConfig {
                solar_capacity_mw: 500.0,
                wind_capacity_mw: 450.0,
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the storage-heavy preset: large storage, full at start.
    pub fn storage_heavy() -> Self {
        Self {
            simulation: SimulationConfig {
                storage_capacity_mwh: 500.0,
                ..SimulationConfig::default()
            },
            run: RunConfig {
                initial_storage_fraction: 1.0,
                ..RunConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the evening-peak preset: high demand, modest renewables,
    /// starting just before the evening ramp.
    pub fn evening_peak() -> Self {
        Self {
            simulation: SimulationConfig {
                solar_capacity_mw: 200.0,
                wind_capacity_mw: 150.0,
                base_demand_mw: 600.0,
                ..SimulationConfig::default()
            },
            run: RunConfig {
                start_hour: 15.0,
                ticks: 40,
                ..RunConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_renewables", "storage_heavy", "evening_peak"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_renewables" => Ok(Self::high_renewables()),
            "storage_heavy" => Ok(Self::storage_heavy()),
            "evening_peak" => Ok(Self::evening_peak()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all sections and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.simulation.validate();

        let r = &self.run;
        if r.ticks == 0 {
            errors.push(ConfigError {
                field: "run.ticks".into(),
                message: "must be > 0".into(),
            });
        }
        if r.tick_interval_ms == 0 {
            errors.push(ConfigError {
                field: "run.tick_interval_ms".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..24.0).contains(&r.start_hour) {
            errors.push(ConfigError {
                field: "run.start_hour".into(),
                message: "must be in [0.0, 24.0)".into(),
            });
        }
        if !(0.0..=1.0).contains(&r.initial_storage_fraction) {
            errors.push(ConfigError {
                field: "run.initial_storage_fraction".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        errors.extend(self.classical.validate());
        errors.extend(self.quantum.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_dashboard_defaults() {
        let s = ScenarioConfig::baseline().simulation;
        assert_eq!(s.solar_capacity_mw, 300.0);
        assert_eq!(s.wind_capacity_mw, 250.0);
        assert_eq!(s.storage_capacity_mwh, 200.0);
        assert_eq!(s.base_demand_mw, 400.0);
        assert_eq!(s.speed, 2);
    }

    #[test]
    fn from_preset_unknown() {
        let e = ScenarioConfig::from_preset("nonexistent").unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(errors.is_empty(), "preset \"{name}\" should be valid: {errors:?}");
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
solar_capacity_mw = 350.0
wind_capacity_mw = 200.0
storage_capacity_mwh = 250.0
base_demand_mw = 450.0
speed = 3

[run]
seed = 7
ticks = 80
tick_interval_ms = 50
start_hour = 0.0
initial_storage_fraction = 0.25

[classical]
backup_cost_per_mwh = 95.0

[quantum]
samples = 16
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("valid TOML should parse");
        assert_eq!(cfg.simulation.speed, 3);
        assert_eq!(cfg.run.ticks, 80);
        assert_eq!(cfg.classical.backup_cost_per_mwh, 95.0);
        assert_eq!(cfg.classical.ramp_fraction, 0.2);
        assert_eq!(cfg.quantum.samples, 16);
        assert_eq!(cfg.quantum.backup_factor, 0.92);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[simulation]
speed = 2
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ScenarioConfig::from_toml_str("[run]\nseed = 99\n").expect("parses");
        assert_eq!(cfg.run.seed, 99);
        assert_eq!(cfg.run.ticks, 120);
        assert_eq!(cfg.simulation.solar_capacity_mw, 300.0);
    }

    #[test]
    fn validation_catches_non_positive_capacity() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.storage_capacity_mwh = 0.0;
        cfg.simulation.solar_capacity_mw = -5.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.storage_capacity_mwh"));
        assert!(errors.iter().any(|e| e.field == "simulation.solar_capacity_mw"));
    }

    #[test]
    fn ensure_valid_reports_invalid_configuration() {
        let s = SimulationConfig {
            base_demand_mw: 0.0,
            ..SimulationConfig::default()
        };
        let err = s.ensure_valid().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfiguration { ref field, .. } if field == "simulation.base_demand_mw"
        ));
    }

    #[test]
    fn validation_catches_zero_speed() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.speed = 0;
        assert!(cfg.validate().iter().any(|e| e.field == "simulation.speed"));
    }

    #[test]
    fn validation_catches_bad_start_hour() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.start_hour = 24.0;
        assert!(cfg.validate().iter().any(|e| e.field == "run.start_hour"));
    }

    #[test]
    fn validation_includes_param_tables() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.quantum.samples = 0;
        assert!(cfg.validate().iter().any(|e| e.field == "quantum.samples"));
    }

    #[test]
    fn hours_per_tick_scales_with_speed() {
        let s = SimulationConfig {
            speed: 5,
            ..SimulationConfig::default()
        };
        assert!((s.hours_per_tick() - 0.5).abs() < 1e-12);
    }
}
