//! Data fetching
//!
//! Handles:
//! - Yahoo Finance API for option chains and spot (free)
//! - FRED treasury yields for the risk-free rate (API key required)

pub mod yahoo;
pub mod fred;

pub use yahoo::*;
pub use fred::*;
