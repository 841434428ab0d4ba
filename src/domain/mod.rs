//! # Domain Layer
//!
//! Entities, value objects, and errors for delivery-fee pricing.
//!
//! This layer has no I/O. It defines the pricing vocabulary (money,
//! coordinates, modifications, rate configuration) and the invariants the
//! engine relies on.

pub mod entities;
pub mod errors;
pub mod value_objects;
