//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (`price`)
//! - Greeks and probability of finishing in the money (`analyze`)
//!
//! Both functions are pure. IEEE arithmetic does not trap, so the inputs
//! that make the closed form undefined (non-positive spot or strike, zero
//! `sigma * sqrt(T)`, anything producing NaN/inf) are reported as typed
//! errors instead of being returned as numbers.
//!
//! `analyze` keeps the conventions of the analysis screen it feeds: its
//! d1/d2 carry no rate drift and rho discounts at a fixed
//! [`ANALYSIS_RHO_RATE`] rather than the supplied risk-free rate. Theta and
//! vega use the same formula for calls and puts.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::{Greeks, MarketInputs, OptionType, PricerError, PricerResult};

/// Discount rate used by `analyze` for rho, independent of the inputs' rate
pub const ANALYSIS_RHO_RATE: f64 = 0.05;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// d1 and d2 with the given drift in the numerator.
///
/// `price` passes the risk-free rate, `analyze` passes zero.
fn d1_d2(inputs: &MarketInputs, drift: f64) -> PricerResult<(f64, f64)> {
    let MarketInputs {
        spot,
        strike,
        time_to_expiry,
        volatility,
        ..
    } = *inputs;

    let positive = |x: f64| x > 0.0;
    if !positive(spot) || !positive(strike) {
        return Err(PricerError::domain(format!(
            "ln(S/K) undefined for spot {} and strike {}",
            spot, strike
        )));
    }

    let vol_sqrt_t = inputs.vol_sqrt_time();
    if vol_sqrt_t == 0.0 {
        return Err(PricerError::division_by_zero(format!(
            "sigma * sqrt(T) is zero (sigma {}, T {})",
            volatility, time_to_expiry
        )));
    }

    let d1 = ((spot / strike).ln() + (drift + 0.5 * volatility * volatility) * time_to_expiry)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    if !d1.is_finite() || !d2.is_finite() {
        return Err(PricerError::floating_point(format!(
            "d1/d2 not finite (sigma {}, T {})",
            volatility, time_to_expiry
        )));
    }

    Ok((d1, d2))
}

fn finite(value: f64, what: &str) -> PricerResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricerError::floating_point(format!("{} is {}", what, value)))
    }
}

/// Black-Scholes d1 parameter
pub fn d1(inputs: &MarketInputs) -> PricerResult<f64> {
    d1_d2(inputs, inputs.risk_free_rate).map(|(d1, _)| d1)
}

/// Black-Scholes d2 parameter
pub fn d2(inputs: &MarketInputs) -> PricerResult<f64> {
    d1_d2(inputs, inputs.risk_free_rate).map(|(_, d2)| d2)
}

/// Black-Scholes European option price.
///
/// The result is not floored at zero.
pub fn price(inputs: &MarketInputs, option_type: OptionType) -> PricerResult<f64> {
    let (d1, d2) = d1_d2(inputs, inputs.risk_free_rate)?;
    let spot = inputs.spot;
    let strike_pv = inputs.strike * inputs.discount_factor();

    let value = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike_pv * norm_cdf(d2),
        OptionType::Put => strike_pv * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };

    finite(value, "price")
}

/// Greeks and probability of expiring in the money.
///
/// The premium argument is the market price being analysed; it does not
/// enter any of the computed quantities. The inputs' risk-free rate is not
/// used either.
pub fn analyze(
    inputs: &MarketInputs,
    _premium: f64,
    option_type: OptionType,
) -> PricerResult<Greeks> {
    let (d1, d2) = d1_d2(inputs, 0.0)?;

    let MarketInputs {
        spot,
        strike,
        time_to_expiry: time,
        volatility: vol,
        ..
    } = *inputs;
    let sqrt_t = time.sqrt();
    let pdf_d1 = norm_pdf(d1);

    let (delta, probability_itm) = match option_type {
        OptionType::Call => (norm_cdf(d1), norm_cdf(d2)),
        OptionType::Put => (-norm_cdf(-d1), norm_cdf(-d2)),
    };

    // Same for call and put
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let theta = -(spot * pdf_d1 * vol) / (2.0 * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t / 100.0;

    let rho_discount = strike * time * (-ANALYSIS_RHO_RATE * time).exp();
    let rho = match option_type {
        OptionType::Call => rho_discount * norm_cdf(d2) / 100.0,
        OptionType::Put => -(rho_discount * norm_cdf(-d2)) / 100.0,
    };

    Ok(Greeks::new(
        finite(delta, "delta")?,
        finite(gamma, "gamma")?,
        finite(theta, "theta")?,
        finite(vega, "vega")?,
        finite(rho, "rho")?,
        finite(probability_itm, "probability ITM")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn atm() -> MarketInputs {
        MarketInputs::new(100.0, 100.0, 1.0, 0.05, 0.20)
    }

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
    }

    #[test]
    fn test_norm_pdf() {
        assert_abs_diff_eq!(norm_pdf(0.0), 0.398_942_280_4, epsilon = 1e-10);
        assert_abs_diff_eq!(norm_pdf(1.5), norm_pdf(-1.5), epsilon = 1e-15);
    }

    #[test]
    fn test_bs_price() {
        let call = price(&atm(), OptionType::Call).unwrap();
        let put = price(&atm(), OptionType::Put).unwrap();

        assert_abs_diff_eq!(call, 10.4506, epsilon = 1e-4);
        assert_abs_diff_eq!(put, 5.5735, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let cases = [
            MarketInputs::new(100.0, 100.0, 1.0, 0.05, 0.20),
            MarketInputs::new(42.0, 50.0, 0.1, 0.01, 0.6),
            MarketInputs::new(310.0, 250.0, 2.0, 0.045, 0.35),
            MarketInputs::new(8.5, 7.0, 0.02, 0.0, 1.2),
        ];

        for inputs in cases {
            let call = price(&inputs, OptionType::Call).unwrap();
            let put = price(&inputs, OptionType::Put).unwrap();
            let parity = inputs.spot - inputs.strike * inputs.discount_factor();
            assert_abs_diff_eq!(call - put, parity, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_d1_d2() {
        let inputs = atm();
        // (0 + 0.07) / 0.2
        assert_abs_diff_eq!(d1(&inputs).unwrap(), 0.35, epsilon = 1e-12);
        assert_abs_diff_eq!(d2(&inputs).unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_price_is_deterministic() {
        let a = price(&atm(), OptionType::Call).unwrap();
        let b = price(&atm(), OptionType::Call).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_zero_vol_is_division_by_zero() {
        let inputs = MarketInputs::new(100.0, 100.0, 1.0, 0.05, 0.0);
        assert!(matches!(
            price(&inputs, OptionType::Call),
            Err(PricerError::DivisionByZero(_))
        ));
        assert!(matches!(
            analyze(&inputs, 1.0, OptionType::Put),
            Err(PricerError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_zero_time_is_division_by_zero() {
        let inputs = MarketInputs::new(100.0, 100.0, 0.0, 0.05, 0.2);
        assert!(matches!(
            price(&inputs, OptionType::Put),
            Err(PricerError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_negative_time_is_floating_point_error() {
        let inputs = MarketInputs::new(100.0, 100.0, -0.5, 0.05, 0.2);
        assert!(matches!(
            price(&inputs, OptionType::Call),
            Err(PricerError::FloatingPoint(_))
        ));
    }

    #[test]
    fn test_non_positive_spot_or_strike_is_domain_error() {
        let bad_spot = MarketInputs::new(0.0, 100.0, 1.0, 0.05, 0.2);
        let bad_strike = MarketInputs::new(100.0, -5.0, 1.0, 0.05, 0.2);
        let nan_spot = MarketInputs::new(f64::NAN, 100.0, 1.0, 0.05, 0.2);

        for inputs in [bad_spot, bad_strike, nan_spot] {
            assert!(matches!(
                price(&inputs, OptionType::Call),
                Err(PricerError::Domain(_))
            ));
            assert!(matches!(
                analyze(&inputs, 0.0, OptionType::Call),
                Err(PricerError::Domain(_))
            ));
        }
    }

    #[test]
    fn test_greeks_atm() {
        let g = analyze(&atm(), 10.0, OptionType::Call).unwrap();

        // d1' = 0.1, d2' = -0.1
        assert_abs_diff_eq!(g.delta, norm_cdf(0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(g.probability_itm, norm_cdf(-0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(g.gamma, norm_pdf(0.1) / 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.theta, -10.0 * norm_pdf(0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(g.vega, norm_pdf(0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(
            g.rho,
            (-0.05_f64).exp() * norm_cdf(-0.1),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_put_greeks() {
        let call = analyze(&atm(), 10.0, OptionType::Call).unwrap();
        let put = analyze(&atm(), 5.0, OptionType::Put).unwrap();

        assert!(put.delta < 0.0);
        assert!(put.rho < 0.0);
        assert_abs_diff_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            call.probability_itm + put.probability_itm,
            1.0,
            epsilon = 1e-12
        );
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.theta, put.theta);
        assert_eq!(call.vega, put.vega);
    }

    #[test]
    fn test_analyze_ignores_rate_and_premium() {
        let low = MarketInputs::new(120.0, 100.0, 0.5, 0.0, 0.3);
        let high = MarketInputs { risk_free_rate: 0.09, ..low };

        let a = analyze(&low, 1.0, OptionType::Call).unwrap();
        let b = analyze(&high, 55.0, OptionType::Call).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deep_moneyness_delta() {
        let deep_itm = MarketInputs::new(200.0, 100.0, 1.0, 0.05, 0.2);
        let deep_otm = MarketInputs::new(50.0, 100.0, 1.0, 0.05, 0.2);

        assert!(analyze(&deep_itm, 0.0, OptionType::Call).unwrap().delta > 0.999);
        assert!(analyze(&deep_otm, 0.0, OptionType::Call).unwrap().delta < 0.001);
    }
}
