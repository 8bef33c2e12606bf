//! Core data types
//!
//! Defines fundamental types:
//! - OptionType / MarketInputs: what is being priced
//! - Greeks: sensitivities and ITM probability
//! - QuoteChain: listed contracts for one expiry
//! - PricerError: the crate-wide error type

pub mod option;
pub mod quote;
pub mod greeks;
pub mod error;

pub use option::*;
pub use quote::*;
pub use greeks::*;
pub use error::*;
