/// Time-of-day clock for tick management.
pub mod clock;
pub mod driver;
pub mod kpi;
/// Wall-clock paced runner with live control commands.
pub mod runner;
/// Grid state snapshot owned by the driver.
pub mod state;
pub mod types;

pub use driver::{PendingDispatch, SimulationDriver};
pub use runner::{Command, run_realtime};
