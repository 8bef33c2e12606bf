//! Option Greeks
//!
//! Sensitivities and in-the-money probability for a single option.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities) plus the risk-neutral ITM probability
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt, annualised
    pub theta: f64,
    /// Vega: dV/dσ per 1% vol move
    pub vega: f64,
    /// Rho: dV/dr per 1% rate move
    pub rho: f64,
    /// Probability of finishing in the money, in [0, 1]
    pub probability_itm: f64,
}

impl Greeks {
    pub fn new(
        delta: f64,
        gamma: f64,
        theta: f64,
        vega: f64,
        rho: f64,
        probability_itm: f64,
    ) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
            probability_itm,
        }
    }

    /// Theta expressed per calendar day
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }
}
