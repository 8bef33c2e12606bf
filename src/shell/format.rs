//! Text formatting for the interactive shell

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};

use crate::core::{ChainRow, Greeks, MarketInputs, OptionType};
use crate::models::{Valuation, Verdict};

/// One numbered entry in the expiration menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiration {
    /// 1-based menu index
    pub index: usize,
    /// e.g. "June 20th, 2025"
    pub label: String,
    pub date: NaiveDate,
}

/// "June 20th, 2025"
pub fn format_expiration(date: NaiveDate) -> String {
    let day = date.day();
    format!("{} {}{}, {}", date.format("%B"), day, ordinal_suffix(day), date.year())
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn expiration_menu(dates: &[NaiveDate]) -> Vec<Expiration> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &date)| Expiration {
            index: i + 1,
            label: format_expiration(date),
            date,
        })
        .collect()
}

/// Whole calendar days from `today` until `expiry` (negative if past)
pub fn days_to_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Calendar days as a year fraction (365-day year)
pub fn years_from_days(days: i64) -> f64 {
    days as f64 / 365.0
}

/// Numbered chain listing, highest strike first, with a divider at the
/// current price. `rows` must already be in display order.
pub fn chain_listing(
    symbol: &str,
    option_type: OptionType,
    expiry: NaiveDate,
    rows: &[ChainRow],
    spot: f64,
) -> String {
    let mut text = String::new();
    let heading = match option_type {
        OptionType::Call => "Available call options",
        OptionType::Put => "Available put options",
    };
    let _ = writeln!(text, "\n{} for {}: (Current price: ${:.2})", heading, expiry, spot);

    let mut divider_shown = false;
    for (i, row) in rows.iter().enumerate() {
        if !divider_shown && row.strike <= spot {
            let _ = writeln!(
                text,
                "\n{} <- {} current price: ${:.2}\n",
                "\u{2500}".repeat(55),
                symbol,
                spot
            );
            divider_shown = true;
        }
        let _ = writeln!(
            text,
            "[{}] Strike ${:.2} | Last Market Price ${:.2} | IV: {:.2}%",
            i + 1,
            row.strike,
            row.last_price,
            row.implied_volatility * 100.0
        );
    }
    text
}

pub fn greeks_report(greeks: &Greeks) -> String {
    format!(
        "\nOption Greeks:\n\
         \u{0394} Delta: {:.4}\n\
         \u{0393} Gamma: {:.4}\n\
         \u{0398} Theta: {:.4}\n\
         \u{03BD} Vega: {:.4}\n\
         \u{03C1} Rho: {:.4}\n\
         Estimated Probability of Expiring ITM: {:.2}%\n",
        greeks.delta,
        greeks.gamma,
        greeks.theta,
        greeks.vega,
        greeks.rho,
        greeks.probability_itm * 100.0
    )
}

pub fn valuation_report(
    valuation: &Valuation,
    inputs: &MarketInputs,
    option_type: OptionType,
) -> String {
    let mut text = format!(
        "\nCalculated Black-Scholes {} Price: ${:.2}\n",
        option_type.title(),
        valuation.theoretical
    );

    let _ = match valuation.verdict {
        Verdict::Overvalued => writeln!(
            text,
            "This option is overvalued by the market by ${:.2} ({:.2}%).",
            valuation.difference,
            valuation.percent_difference
        ),
        Verdict::Undervalued => writeln!(
            text,
            "This option is undervalued by the market by ${:.2} ({:.2}%).",
            -valuation.difference,
            valuation.percent_difference
        ),
        Verdict::FairlyValued => writeln!(
            text,
            "This option is fairly valued according to the Black-Scholes model."
        ),
    };

    let _ = writeln!(
        text,
        "Underlying: ${:.2}, Strike: ${:.2}, IV: {:.2}%, r: {:.2}%, T: {:.3} years",
        inputs.spot,
        inputs.strike,
        inputs.volatility * 100.0,
        inputs.risk_free_rate * 100.0,
        inputs.time_to_expiry
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_expiration_suffixes() {
        assert_eq!(format_expiration(date(2025, 6, 1)), "June 1st, 2025");
        assert_eq!(format_expiration(date(2025, 6, 2)), "June 2nd, 2025");
        assert_eq!(format_expiration(date(2025, 6, 3)), "June 3rd, 2025");
        assert_eq!(format_expiration(date(2025, 6, 4)), "June 4th, 2025");
        assert_eq!(format_expiration(date(2025, 6, 11)), "June 11th, 2025");
        assert_eq!(format_expiration(date(2025, 6, 12)), "June 12th, 2025");
        assert_eq!(format_expiration(date(2025, 6, 13)), "June 13th, 2025");
        assert_eq!(format_expiration(date(2025, 6, 21)), "June 21st, 2025");
        assert_eq!(format_expiration(date(2025, 6, 22)), "June 22nd, 2025");
        assert_eq!(format_expiration(date(2025, 1, 31)), "January 31st, 2025");
    }

    #[test]
    fn test_expiration_menu_indices() {
        let menu = expiration_menu(&[date(2025, 6, 20), date(2025, 7, 18)]);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].index, 1);
        assert_eq!(menu[1].label, "July 18th, 2025");
    }

    #[test]
    fn test_days_and_years() {
        assert_eq!(days_to_expiry(date(2025, 6, 20), date(2025, 6, 1)), 19);
        assert_eq!(days_to_expiry(date(2025, 6, 1), date(2025, 6, 1)), 0);
        assert!((years_from_days(73) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_chain_listing_divider() {
        let rows = [
            ChainRow::new(46.0, 0.40, 0.25),
            ChainRow::new(45.0, 0.71, 0.2544),
            ChainRow::new(44.0, 1.20, 0.26),
            ChainRow::new(42.0, 2.45, 0.2812),
        ];
        let text = chain_listing("BAC", OptionType::Call, date(2025, 6, 20), &rows, 44.12);

        assert!(text.contains("Available call options for 2025-06-20: (Current price: $44.12)"));
        assert!(text.contains("[2] Strike $45.00 | Last Market Price $0.71 | IV: 25.44%"));

        let lines: Vec<&str> = text.lines().collect();
        let divider = lines
            .iter()
            .position(|l| l.contains("BAC current price: $44.12"))
            .unwrap();
        assert!(lines[divider - 2].starts_with("[2]"));
        assert!(lines[divider + 2].starts_with("[3] Strike $44.00"));
        assert_eq!(text.matches("current price:").count(), 1);
    }

    #[test]
    fn test_chain_listing_all_above_spot_has_no_divider() {
        let rows = [ChainRow::new(60.0, 0.05, 0.4)];
        let text = chain_listing("BAC", OptionType::Put, date(2025, 6, 20), &rows, 44.0);
        assert!(text.contains("Available put options"));
        assert!(!text.contains("BAC current price"));
    }

    #[test]
    fn test_greeks_report() {
        let g = Greeks::new(0.5398, 0.0197, -7.9397, 0.3970, 0.4384, 0.4602);
        let text = greeks_report(&g);
        assert!(text.contains("Delta: 0.5398"));
        assert!(text.contains("Theta: -7.9397"));
        assert!(text.contains("Expiring ITM: 46.02%"));
    }

    #[test]
    fn test_valuation_report() {
        let inputs = MarketInputs::new(100.0, 100.0, 1.0, 0.05, 0.2);
        let text = valuation_report(&Valuation::new(10.45, 9.45), &inputs, OptionType::Call);

        assert!(text.contains("Calculated Black-Scholes Call Price: $10.45"));
        assert!(text.contains("undervalued by the market by $1.00"));
        assert!(text.contains("IV: 20.00%, r: 5.00%, T: 1.000 years"));
    }
}
