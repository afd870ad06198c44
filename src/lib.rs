//! Order/payment reconciliation and billing core for a clinical-lab
//! operations app.
//!
//! Orders and payments are fetched and mutated independently; this crate
//! joins them into one consistent view, derives money amounts from the
//! lifecycle-stateful line items, and guarantees an order is never charged
//! twice while tolerating stale caches.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
