//! Yahoo Finance data fetcher
//!
//! Expiration dates, option chains and spot price for a ticker, via Yahoo
//! Finance's unofficial options API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::config::YahooConfig;
use crate::core::{ChainRow, PricerError, PricerResult, QuoteChain};

/// Source of listed option chains
pub trait MarketDataProvider {
    /// Available expiration dates, in listing order
    fn expirations(&self, symbol: &str) -> PricerResult<Vec<NaiveDate>>;

    /// Calls and puts for one expiry
    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PricerResult<QuoteChain>;

    /// Current underlying price
    fn spot(&self, symbol: &str) -> PricerResult<f64>;
}

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(config: &YahooConfig) -> PricerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PricerError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch_options(&self, symbol: &str, date: Option<i64>) -> PricerResult<YahooOptionChainData> {
        let mut url = format!("{}/options/{}", self.base_url, symbol);
        if let Some(ts) = date {
            url.push_str(&format!("?date={}", ts));
        }
        tracing::debug!("GET {}", url);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PricerError::network(e.to_string()))?
            .json()
            .map_err(|e| PricerError::data(format!("Failed to parse options: {}", e)))?;

        response.into_first(symbol)
    }
}

impl MarketDataProvider for YahooClient {
    fn expirations(&self, symbol: &str) -> PricerResult<Vec<NaiveDate>> {
        let data = self.fetch_options(symbol, None)?;
        let expiries = data.expiration_dates();
        tracing::info!("{} expirations available for {}", expiries.len(), symbol);
        Ok(expiries)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PricerResult<QuoteChain> {
        // Yahoo keys expiries by midnight UTC
        let expiry_ts = expiry
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| PricerError::invalid_input(format!("Bad expiry date {}", expiry)))?
            .and_utc()
            .timestamp();

        let data = self.fetch_options(symbol, Some(expiry_ts))?;
        let chain = data.into_chain(symbol, expiry);
        tracing::info!(
            "Chain for {} {}: {} calls, {} puts",
            symbol,
            expiry,
            chain.calls.len(),
            chain.puts.len()
        );
        Ok(chain)
    }

    fn spot(&self, symbol: &str) -> PricerResult<f64> {
        let data = self.fetch_options(symbol, None)?;
        let price = data.quote.regular_market_price;
        if !(price > 0.0) {
            return Err(PricerError::data(format!("No market price for {}", symbol)));
        }
        Ok(price)
    }
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

impl YahooOptionsResponse {
    fn into_first(self, symbol: &str) -> PricerResult<YahooOptionChainData> {
        self.option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| PricerError::data(format!("No options data returned for {}", symbol)))
    }
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    quote: YahooQuoteData,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

impl YahooOptionChainData {
    fn expiration_dates(&self) -> Vec<NaiveDate> {
        self.expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect()
    }

    fn into_chain(self, symbol: &str, expiry: NaiveDate) -> QuoteChain {
        let mut chain = QuoteChain::new(symbol, expiry);

        if let Some(options) = self.options.into_iter().next() {
            for call in options.calls.iter().filter_map(YahooOptionData::to_row) {
                chain.add_call(call);
            }
            for put in options.puts.iter().filter_map(YahooOptionData::to_row) {
                chain.add_put(put);
            }
        }

        chain
    }
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

impl YahooOptionData {
    /// Rows missing any of strike, last price or IV are skipped
    fn to_row(&self) -> Option<ChainRow> {
        match (self.strike, self.last_price, self.implied_volatility) {
            (Some(strike), Some(last), Some(iv)) => Some(ChainRow::new(strike, last, iv)),
            _ => {
                tracing::debug!(
                    "Skipping incomplete contract {}",
                    self.contract_symbol.as_deref().unwrap_or("?")
                );
                None
            }
        }
    }
}
