//! Option chain quote data
//!
//! The subset of a listed chain the analysis needs: strike, last traded
//! price and the exchange-provided implied volatility.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// One listed contract in a chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    /// Strike price
    pub strike: f64,
    /// Last traded price (used as the market premium)
    pub last_price: f64,
    /// Implied volatility as a decimal
    pub implied_volatility: f64,
}

impl ChainRow {
    pub fn new(strike: f64, last_price: f64, implied_volatility: f64) -> Self {
        Self {
            strike,
            last_price,
            implied_volatility,
        }
    }
}

/// Calls and puts for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Call rows
    pub calls: Vec<ChainRow>,
    /// Put rows
    pub puts: Vec<ChainRow>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    pub fn add_call(&mut self, row: ChainRow) {
        self.calls.push(row);
    }

    pub fn add_put(&mut self, row: ChainRow) {
        self.puts.push(row);
    }

    /// Rows for one side of the chain, in provider order
    pub fn rows(&self, option_type: OptionType) -> &[ChainRow] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Rows sorted by strike, highest first (the order they are listed in)
    pub fn display_rows(&self, option_type: OptionType) -> Vec<ChainRow> {
        let mut rows = self.rows(option_type).to_vec();
        rows.sort_by(|a, b| b.strike.total_cmp(&a.strike));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chain() -> QuoteChain {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let mut chain = QuoteChain::new("BAC", expiry);
        chain.add_call(ChainRow::new(40.0, 2.10, 0.28));
        chain.add_call(ChainRow::new(45.0, 0.55, 0.25));
        chain.add_call(ChainRow::new(42.5, 1.05, 0.26));
        chain.add_put(ChainRow::new(40.0, 0.80, 0.30));
        chain
    }

    #[test]
    fn test_rows_by_side() {
        let chain = sample_chain();
        assert_eq!(chain.rows(OptionType::Call).len(), 3);
        assert_eq!(chain.rows(OptionType::Put).len(), 1);
    }

    #[test]
    fn test_display_rows_descending() {
        let chain = sample_chain();
        let strikes: Vec<f64> = chain
            .display_rows(OptionType::Call)
            .iter()
            .map(|r| r.strike)
            .collect();
        assert_eq!(strikes, vec![45.0, 42.5, 40.0]);
    }
}
