use std::f64::consts::PI;

use super::types::Variability;

/// Hour of sunrise; output is zero before it.
pub const SUNRISE_HOUR: f64 = 6.0;

/// Hour of sunset; output is zero after it.
pub const SUNSET_HOUR: f64 = 18.0;

/// Lower edge of the cloud-cover factor band `[0.8, 1.0)`.
const CLOUD_FACTOR_MIN: f64 = 0.8;

/// Width of the cloud-cover factor band.
const CLOUD_FACTOR_SPREAD: f64 = 0.2;

/// Instantaneous solar output in MW.
///
/// Follows a half-sine daylight bell between [`SUNRISE_HOUR`] and
/// [`SUNSET_HOUR`] (both inclusive), scaled by a cloud-cover factor drawn
/// uniformly from `[0.8, 1.0)`. Zero outside the daylight window.
///
/// # Arguments
///
/// * `time_of_day` - Hour in `[0, 24)`
/// * `capacity_mw` - Installed solar capacity
/// * `variability` - Source of the cloud-cover draw
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::generation::{FixedVariability, solar_generation};
///
/// // Noon, no cloud cover penalty beyond the band floor.
/// let mw = solar_generation(12.0, 300.0, &mut FixedVariability(0.0));
/// assert!((mw - 240.0).abs() < 1e-9);
/// assert_eq!(solar_generation(3.0, 300.0, &mut FixedVariability(0.5)), 0.0);
/// ```
pub fn solar_generation(time_of_day: f64, capacity_mw: f64, variability: &mut impl Variability) -> f64 {
    if !(SUNRISE_HOUR..=SUNSET_HOUR).contains(&time_of_day) {
        return 0.0;
    }
    let hours_since_sunrise = time_of_day - SUNRISE_HOUR;
    let curve = ((hours_since_sunrise / (SUNSET_HOUR - SUNRISE_HOUR)) * PI).sin();
    let cloud_factor = CLOUD_FACTOR_MIN + variability.unit() * CLOUD_FACTOR_SPREAD;
    capacity_mw * curve * cloud_factor
}
