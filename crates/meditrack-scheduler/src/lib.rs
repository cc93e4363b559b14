//! # meditrack-scheduler
//!
//! Runs the alert engine on a clock: a six-hourly full generation and a daily
//! expiry sweep, each on its own cron cadence, plus the `meditrack` binary.

pub mod cadence;
pub mod jobs;
pub mod scheduler;

pub use cadence::Cadence;
pub use scheduler::{Scheduler, SchedulerHandle};
