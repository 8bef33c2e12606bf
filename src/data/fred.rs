//! Risk-free rate from FRED treasury yields
//!
//! The discount rate is the latest constant-maturity treasury yield for the
//! bucket closest to (and not shorter than) the option's time to expiry.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::FredConfig;
use crate::core::{PricerError, PricerResult};

/// Treasury maturity buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaturityBucket {
    OneMonth,
    ThreeMonth,
    SixMonth,
    OneYear,
    TwoYear,
}

impl MaturityBucket {
    /// Bucket for a time to expiry in years
    pub fn for_time(time_to_expiry: f64) -> Self {
        if time_to_expiry <= 1.0 / 12.0 {
            MaturityBucket::OneMonth
        } else if time_to_expiry <= 0.25 {
            MaturityBucket::ThreeMonth
        } else if time_to_expiry <= 0.5 {
            MaturityBucket::SixMonth
        } else if time_to_expiry <= 1.0 {
            MaturityBucket::OneYear
        } else {
            MaturityBucket::TwoYear
        }
    }

    /// FRED series id
    pub fn series_id(&self) -> &'static str {
        match self {
            MaturityBucket::OneMonth => "DGS1MO",
            MaturityBucket::ThreeMonth => "DGS3MO",
            MaturityBucket::SixMonth => "DGS6MO",
            MaturityBucket::OneYear => "DGS1",
            MaturityBucket::TwoYear => "DGS2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaturityBucket::OneMonth => "1-month",
            MaturityBucket::ThreeMonth => "3-month",
            MaturityBucket::SixMonth => "6-month",
            MaturityBucket::OneYear => "1-year",
            MaturityBucket::TwoYear => "2-year",
        }
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.series_id())
    }
}

/// Source of risk-free yields
pub trait RateProvider {
    /// Latest yield for the bucket as a decimal, or `None` if unavailable
    fn latest_yield(&self, bucket: MaturityBucket) -> Option<f64>;
}

/// FRED API client
pub struct FredClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    /// Fails if no API key is configured
    pub fn new(config: &FredConfig) -> PricerResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PricerError::config("FRED API key not configured (set FRED_API_KEY)"))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PricerError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn fetch_latest(&self, bucket: MaturityBucket) -> PricerResult<f64> {
        let url = format!("{}/series/observations", self.base_url);
        let response: FredObservations = self
            .client
            .get(&url)
            .query(&[
                ("series_id", bucket.series_id()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", "1"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PricerError::network(e.to_string()))?
            .json()
            .map_err(|e| PricerError::data(format!("Failed to parse observations: {}", e)))?;

        response.latest_decimal()
    }
}

impl RateProvider for FredClient {
    fn latest_yield(&self, bucket: MaturityBucket) -> Option<f64> {
        match self.fetch_latest(bucket) {
            Ok(rate) => {
                tracing::info!("{} yield: {:.4}", bucket, rate);
                Some(rate)
            }
            Err(e) => {
                tracing::warn!("Could not fetch {} yield: {}", bucket, e);
                None
            }
        }
    }
}

// FRED API response structures

#[derive(Debug, Deserialize)]
struct FredObservations {
    observations: Vec<FredObservation>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    #[allow(dead_code)]
    date: String,
    value: String,
}

impl FredObservations {
    /// Newest observation as a decimal fraction. FRED marks missing values as "."
    fn latest_decimal(&self) -> PricerResult<f64> {
        let obs = self
            .observations
            .first()
            .ok_or_else(|| PricerError::data("No observations returned"))?;

        let percent: f64 = obs
            .value
            .trim()
            .parse()
            .map_err(|_| PricerError::data(format!("Unparseable yield '{}'", obs.value)))?;

        Ok(percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(MaturityBucket::for_time(0.01), MaturityBucket::OneMonth);
        assert_eq!(MaturityBucket::for_time(1.0 / 12.0), MaturityBucket::OneMonth);
        assert_eq!(MaturityBucket::for_time(0.09), MaturityBucket::ThreeMonth);
        assert_eq!(MaturityBucket::for_time(0.25), MaturityBucket::ThreeMonth);
        assert_eq!(MaturityBucket::for_time(0.26), MaturityBucket::SixMonth);
        assert_eq!(MaturityBucket::for_time(0.5), MaturityBucket::SixMonth);
        assert_eq!(MaturityBucket::for_time(1.0), MaturityBucket::OneYear);
        assert_eq!(MaturityBucket::for_time(1.01), MaturityBucket::TwoYear);
        assert_eq!(MaturityBucket::for_time(5.0), MaturityBucket::TwoYear);
    }

    #[test]
    fn test_series_ids() {
        assert_eq!(MaturityBucket::OneMonth.series_id(), "DGS1MO");
        assert_eq!(MaturityBucket::SixMonth.to_string(), "DGS6MO");
        assert_eq!(MaturityBucket::TwoYear.label(), "2-year");
    }

    #[test]
    fn test_parse_latest_yield() {
        let obs: FredObservations = serde_json::from_str(
            r#"{"observations": [{"date": "2025-06-13", "value": "4.38"}]}"#,
        )
        .unwrap();
        assert!((obs.latest_decimal().unwrap() - 0.0438).abs() < 1e-12);
    }

    #[test]
    fn test_missing_value_is_unavailable() {
        let obs: FredObservations =
            serde_json::from_str(r#"{"observations": [{"date": "2025-06-19", "value": "."}]}"#)
                .unwrap();
        assert!(matches!(obs.latest_decimal(), Err(PricerError::Data(_))));

        let empty: FredObservations = serde_json::from_str(r#"{"observations": []}"#).unwrap();
        assert!(empty.latest_decimal().is_err());
    }

    #[test]
    fn test_client_requires_key() {
        assert!(matches!(
            FredClient::new(&FredConfig::default()),
            Err(PricerError::Config(_))
        ));
    }
}
