/// Share of base demand present at every hour.
const BASE_LOAD_FRACTION: f64 = 0.6;

/// Morning peak: hour, height.
const MORNING_PEAK: (f64, f64) = (8.0, 0.3);

/// Evening peak: hour, height.
const EVENING_PEAK: (f64, f64) = (19.0, 0.4);

/// Shared Gaussian width term (the `8` in `exp(-(t - h)^2 / 8)`).
const PEAK_WIDTH: f64 = 8.0;

fn bump(time_of_day: f64, (hour, height): (f64, f64)) -> f64 {
    (-(time_of_day - hour).powi(2) / PEAK_WIDTH).exp() * height
}

/// Instantaneous demand in MW.
///
/// A 0.6 base-load fraction with two Gaussian bumps on top: +0.3 centred on
/// 08:00 and +0.4 centred on 19:00. Deterministic.
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::generation::demand;
///
/// assert!(demand(19.0, 400.0) > demand(8.0, 400.0));
/// assert!(demand(8.0, 400.0) > demand(2.0, 400.0));
/// ```
pub fn demand(time_of_day: f64, base_demand_mw: f64) -> f64 {
    base_demand_mw
        * (BASE_LOAD_FRACTION + bump(time_of_day, MORNING_PEAK) + bump(time_of_day, EVENING_PEAK))
}
