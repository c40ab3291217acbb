//! Resilience primitives for calls that leave the process.
//!
//! Currently only the consecutive-failure [`CircuitBreaker`] that guards
//! upstream product lookups.

pub mod circuit_breaker;

pub use circuit_breaker::{BreakerError, BreakerState, CircuitBreaker};
