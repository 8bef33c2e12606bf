//! Pricing models
//!
//! Implements:
//! - Black-Scholes price, Greeks and ITM probability
//! - Comparison of a market premium against the model price

pub mod black_scholes;
pub mod valuation;

pub use black_scholes::*;
pub use valuation::*;
