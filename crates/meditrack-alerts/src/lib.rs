//! # meditrack-alerts
//!
//! Turns an inventory snapshot into alerts. Four detection passes (low stock, expiry,
//! high demand, substitute recommendation) feed the synthesizer; reconciliation
//! writes the batch to the alert store; the lifecycle module owns status changes.
//! [`AlertEngine`] ties these to a store and serializes runs.

pub mod engine;
pub mod lifecycle;
pub mod passes;
pub mod reconcile;
pub mod synthesizer;

pub use engine::AlertEngine;
pub use passes::ExpiryPolicy;
pub use reconcile::{Reconciled, ReconcileStrategy};
pub use synthesizer::AlertSynthesizer;
