//! # meditrack-observability
//!
//! Subscriber setup for the `meditrack` binary, span macros for the long-running
//! operations, and the named structured events every other crate emits.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
