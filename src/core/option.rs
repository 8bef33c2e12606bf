//! Option kinds and pricing inputs
//!
//! `OptionType` is a closed two-variant enum; text only becomes an option
//! kind through `FromStr`, which rejects anything other than call/put.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PricerError;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Lowercase label ("call" / "put")
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Capitalised label for headings
    pub fn title(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptionType {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricerError::invalid_option_kind(s.trim())),
        }
    }
}

/// Market parameters for a single European option valuation.
///
/// `volatility > 0` and `time_to_expiry > 0` are preconditions of the
/// pricing functions; they report a typed error rather than a value when
/// these do not hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    /// Current underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Annualised risk-free rate as a decimal
    pub risk_free_rate: f64,
    /// Annualised volatility as a decimal
    pub volatility: f64,
}

impl MarketInputs {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
        }
    }

    /// sigma * sqrt(T), the d1/d2 denominator
    pub fn vol_sqrt_time(&self) -> f64 {
        self.volatility * self.time_to_expiry.sqrt()
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}
