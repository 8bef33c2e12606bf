//! Market premium vs Black-Scholes value

use serde::{Deserialize, Serialize};

use super::black_scholes::price;
use crate::core::{MarketInputs, OptionType, PricerResult};

/// How the market premium compares to the theoretical price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Overvalued,
    Undervalued,
    FairlyValued,
}

/// Theoretical price next to the observed premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub theoretical: f64,
    pub market: f64,
    /// market - theoretical
    pub difference: f64,
    /// |difference| as a percentage of the theoretical price (0 if that is 0)
    pub percent_difference: f64,
    pub verdict: Verdict,
}

impl Valuation {
    pub fn new(theoretical: f64, market: f64) -> Self {
        let difference = market - theoretical;
        let percent_difference = if theoretical != 0.0 {
            difference.abs() / theoretical * 100.0
        } else {
            0.0
        };

        let verdict = if difference > 0.0 {
            Verdict::Overvalued
        } else if difference < 0.0 {
            Verdict::Undervalued
        } else {
            Verdict::FairlyValued
        };

        Self {
            theoretical,
            market,
            difference,
            percent_difference,
            verdict,
        }
    }
}

/// Price the option and compare against the market premium
pub fn value_against_market(
    inputs: &MarketInputs,
    premium: f64,
    option_type: OptionType,
) -> PricerResult<Valuation> {
    let theoretical = price(inputs, option_type)?;
    Ok(Valuation::new(theoretical, premium))
}
