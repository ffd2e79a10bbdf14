/// Simulated hours advanced per tick at speed 1.
pub const BASE_HOURS_PER_TICK: f64 = 0.1;

/// Hours in a simulated day; the clock wraps to zero on reaching it.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Time-of-day clock for the grid simulation.
///
/// Advances by `0.1 × speed` hours per tick and wraps to exactly `0.0` when
/// it reaches or passes 24 (the overshoot is dropped).
///
/// # Examples
///
/// ```
/// use grid_dispatch_sim::sim::clock::SimClock;
///
/// let mut clock = SimClock::new(23.0);
/// clock.advance(5);
/// assert!((clock.time_of_day() - 23.5).abs() < 1e-9);
/// clock.advance(5);
/// assert_eq!(clock.time_of_day(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Current simulated hour in `[0, 24)`.
    time_of_day: f64,
    /// Hour the clock returns to on reset.
    start_hour: f64,
    /// Ticks advanced since creation or the last reset.
    ticks: usize,
}

impl SimClock {
    /// Creates a clock positioned at `start_hour`.
    ///
    /// # Arguments
    ///
    /// * `start_hour` - Initial simulated hour; folded into `[0, 24)`
    pub fn new(start_hour: f64) -> Self {
        let start_hour = start_hour.rem_euclid(HOURS_PER_DAY);
        Self {
            time_of_day: start_hour,
            start_hour,
            ticks: 0,
        }
    }

    /// Current simulated hour.
    pub fn time_of_day(&self) -> f64 {
        self.time_of_day
    }

    /// Ticks advanced since creation or the last reset.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Advances one tick at the given speed multiplier.
    ///
    /// # Returns
    ///
    /// The new time of day.
    pub fn advance(&mut self, speed: u32) -> f64 {
        let next = self.time_of_day + BASE_HOURS_PER_TICK * f64::from(speed);
        self.time_of_day = if next >= HOURS_PER_DAY { 0.0 } else { next };
        self.ticks += 1;
        self.time_of_day
    }

    /// Returns the clock to its start hour and clears the tick count.
    pub fn reset(&mut self) {
        self.time_of_day = self.start_hour;
        self.ticks = 0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(6.0)
    }
}
