//! Detection passes. Each is a pure function over the inventory and keeps its
//! input order, so a pass is deterministic for a given slice.
//!
//! Low stock → Expiry → Demand → Substitutes

pub mod demand;
pub mod expiry;
pub mod low_stock;
pub mod substitutes;

pub use expiry::ExpiryPolicy;
