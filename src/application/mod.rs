//! Application layer: the payment command path.
//!
//! This module defines the `PaymentProcessor`, the only component that
//! writes through the payment repository. Everything else in the crate is a
//! pure read-side computation.

pub mod processor;
