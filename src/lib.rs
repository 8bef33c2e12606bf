//! # BS Options - Black-Scholes analysis for listed option chains
//!
//! An interactive calculator that prices European options with the
//! Black-Scholes model and shows Greeks, probability of finishing in the
//! money, and payoff diagrams for contracts picked from a live chain.
//!
//! ## Key Components
//!
//! - **Pricing**: closed-form Black-Scholes price and Greeks (`models`)
//! - **Data Fetching**: Yahoo Finance chains and FRED treasury yields (`data`)
//! - **Payoff**: long call/put P&L curves, drawn in the terminal or a window
//! - **Shell**: the interactive menu loop (`shell`)
//!
//! ## Usage
//!
//! ```rust
//! use bs_options::prelude::*;
//!
//! let inputs = MarketInputs::new(100.0, 100.0, 1.0, 0.05, 0.20);
//! let call = bs_price(&inputs, OptionType::Call).unwrap();
//! assert!((call - 10.4506).abs() < 1e-4);
//!
//! let greeks = analyze(&inputs, 10.0, OptionType::Call).unwrap();
//! assert!(greeks.probability_itm > 0.0 && greeks.probability_itm < 1.0);
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Price American exercise
//! - Solve for implied volatility (the chain's IV is used as given)
//! - Multi-leg strategies or streaming quotes

pub mod config;
pub mod core;
pub mod data;
pub mod models;
pub mod payoff;
pub mod shell;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        ChainRow, Greeks, MarketInputs, OptionType, PricerError, PricerResult, QuoteChain,
    };

    // Pricing
    pub use crate::models::{
        analyze, norm_cdf, norm_pdf, price as bs_price, value_against_market, Valuation,
        Verdict, ANALYSIS_RHO_RATE,
    };

    // Data fetching
    pub use crate::data::{
        FredClient, MarketDataProvider, MaturityBucket, RateProvider, YahooClient,
    };

    // Payoff
    pub use crate::payoff::{AsciiRenderer, PayoffDiagram, PayoffRenderer};
    #[cfg(feature = "gui")]
    pub use crate::payoff::WindowRenderer;

    // Shell and config
    pub use crate::config::AppConfig;
    pub use crate::shell::Session;
}

// Re-export main types at crate root
pub use crate::core::{PricerError, PricerResult};
pub use crate::models::{analyze, price};
