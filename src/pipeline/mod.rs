//! Pipeline entry points for monitor operations.
//!
//! - `SeatMonitor::check`: one fetch, filter and notify cycle
//! - `Scheduler::run`: immediate check, then periodic checks until the deadline
//! - `run_monitor`: build everything from configuration and run the loop

pub mod check;
pub mod run;
pub mod schedule;

pub use check::{CheckOutcome, NotificationStatus, SeatMonitor};
pub use run::{build_monitor, run_monitor};
pub use schedule::{RunState, RunSummary, Scheduler, StopReason};
