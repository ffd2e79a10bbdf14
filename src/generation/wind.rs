use std::f64::consts::PI;

use super::types::Variability;

/// Mean capacity factor of the diurnal wind profile.
const BASE_FRACTION: f64 = 0.3;

/// Amplitude of the diurnal swing around [`BASE_FRACTION`].
const DIURNAL_AMPLITUDE: f64 = 0.4;

/// Width of the additive gust term `[0, 0.3)`.
const GUST_SPREAD: f64 = 0.3;

/// Instantaneous wind output in MW.
///
/// The diurnal base fraction is `0.3 + 0.4·sin(2π·t/24 + π)`: 0.3 at midnight
/// and noon, bottoming out at -0.1 at 06:00 and peaking at 0.7 at 18:00.
/// A gust term drawn uniformly from `[0, 0.3)` is added on top.
///
/// Output is floored at zero, since around dawn a small gust leaves the raw
/// fraction negative. It is **not** clamped to `capacity_mw`; the fraction
/// tops out just below 1.0 at 18:00 with a maximal gust.
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::generation::{FixedVariability, wind_generation};
///
/// let mw = wind_generation(0.0, 100.0, &mut FixedVariability(0.0));
/// assert!((mw - 30.0).abs() < 1e-9);
/// ```
pub fn wind_generation(time_of_day: f64, capacity_mw: f64, variability: &mut impl Variability) -> f64 {
    let base = BASE_FRACTION + DIURNAL_AMPLITUDE * ((time_of_day / 24.0) * PI * 2.0 + PI).sin();
    let gust = variability.unit() * GUST_SPREAD;
    (capacity_mw * (base + gust)).max(0.0)
}
