//! # Application Layer
//!
//! Pricing rules and the services that evaluate them.
//!
//! The [`rules`] module defines the closed rule set and its registry; the
//! [`services`] module runs the registry over a pricing context and
//! assembles the final result.

pub mod rules;
pub mod services;
