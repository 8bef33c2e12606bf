//! Payoff-at-expiry curve for a single long option

use serde::{Deserialize, Serialize};

use crate::core::OptionType;

/// Number of curve samples across the price range
pub const CURVE_SAMPLES: usize = 100;
/// Number of labelled x-axis ticks
pub const AXIS_TICKS: usize = 11;
/// Price range as fractions of the current spot
pub const RANGE_LOW: f64 = 0.5;
pub const RANGE_HIGH: f64 = 1.5;

/// Labelled x-axis position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub price: f64,
    /// e.g. "$45.00 (+10%)"
    pub label: String,
}

/// Profit/loss at expiry of a long call or long put
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffDiagram {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub premium: f64,
    pub days_to_expiry: i64,
    /// (underlying price at expiry, P&L) pairs
    pub points: Vec<[f64; 2]>,
    pub breakeven: f64,
    pub ticks: Vec<AxisTick>,
}

impl PayoffDiagram {
    /// Long position bought at `premium`, over [0.5·spot, 1.5·spot]
    pub fn long(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        premium: f64,
        days_to_expiry: i64,
    ) -> Self {
        let (low, high) = (spot * RANGE_LOW, spot * RANGE_HIGH);

        let points = linspace(low, high, CURVE_SAMPLES)
            .into_iter()
            .map(|s| [s, long_payoff(option_type, s, strike, premium)])
            .collect();

        let breakeven = match option_type {
            OptionType::Call => strike + premium,
            OptionType::Put => strike - premium,
        };

        let ticks = linspace(low, high, AXIS_TICKS)
            .into_iter()
            .map(|price| AxisTick {
                price,
                label: tick_label(price, spot),
            })
            .collect();

        Self {
            option_type,
            spot,
            strike,
            premium,
            days_to_expiry,
            points,
            breakeven,
            ticks,
        }
    }

    /// P&L at an arbitrary expiry price
    pub fn payoff_at(&self, underlying: f64) -> f64 {
        long_payoff(self.option_type, underlying, self.strike, self.premium)
    }

    /// (low, high) of the plotted price range
    pub fn price_range(&self) -> (f64, f64) {
        (self.spot * RANGE_LOW, self.spot * RANGE_HIGH)
    }

    /// (min, max) P&L over the plotted points
    pub fn payoff_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[1]), hi.max(p[1]))
            })
    }

    pub fn title(&self) -> String {
        format!("Payoff Diagram - Long {} Option", self.option_type.title())
    }

    pub fn subtitle(&self) -> String {
        format!("Time to Expiration: {} days", self.days_to_expiry)
    }
}

fn long_payoff(option_type: OptionType, underlying: f64, strike: f64, premium: f64) -> f64 {
    option_type.intrinsic(underlying, strike) - premium
}

fn tick_label(price: f64, spot: f64) -> String {
    let pct = ((price - spot) / spot * 100.0).round();
    // -0 would print as "-0%"
    let pct = if pct == 0.0 { 0.0 } else { pct };
    format!("${:.2} ({:+.0}%)", price, pct)
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace() {
        let xs = linspace(50.0, 150.0, 11);
        assert_eq!(xs.len(), 11);
        assert_eq!(xs[0], 50.0);
        assert_eq!(xs[10], 150.0);
        assert_abs_diff_eq!(xs[5], 100.0, epsilon = 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_long_call_curve() {
        let d = PayoffDiagram::long(OptionType::Call, 100.0, 105.0, 3.0, 30);

        assert_eq!(d.points.len(), CURVE_SAMPLES);
        assert_eq!(d.points[0], [50.0, -3.0]);
        assert_abs_diff_eq!(d.points[99][0], 150.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.points[99][1], 42.0, epsilon = 1e-12);
        assert_eq!(d.breakeven, 108.0);
        assert_abs_diff_eq!(d.payoff_at(d.breakeven), 0.0, epsilon = 1e-12);
        assert_eq!(d.payoff_range(), (-3.0, d.points[99][1]));
    }

    #[test]
    fn test_long_put_curve() {
        let d = PayoffDiagram::long(OptionType::Put, 100.0, 95.0, 2.5, 14);

        assert_eq!(d.points[0], [50.0, 42.5]);
        assert_abs_diff_eq!(d.points[99][1], -2.5, epsilon = 1e-12);
        assert_eq!(d.breakeven, 92.5);
        assert_eq!(d.payoff_at(120.0), -2.5);
    }

    #[test]
    fn test_ticks() {
        let d = PayoffDiagram::long(OptionType::Call, 40.0, 40.0, 1.0, 7);

        assert_eq!(d.ticks.len(), AXIS_TICKS);
        assert_eq!(d.ticks[0].label, "$20.00 (-50%)");
        assert_eq!(d.ticks[5].label, "$40.00 (+0%)");
        assert_eq!(d.ticks[10].label, "$60.00 (+50%)");
    }

    #[test]
    fn test_titles() {
        let d = PayoffDiagram::long(OptionType::Put, 40.0, 40.0, 1.0, 7);
        assert_eq!(d.title(), "Payoff Diagram - Long Put Option");
        assert_eq!(d.subtitle(), "Time to Expiration: 7 days");
        assert_eq!(d.price_range(), (20.0, 60.0));
    }
}
