//! Analysis menu

use std::str::FromStr;

use crate::core::PricerError;

pub const MENU_TEXT: &str = "\nAvailable Actions:\n\
1. Show Greeks & Probability ITM\n\
2. Calculate Black-Scholes Price\n\
3. Plot Payoff Diagram\n\
4. Try Another Option\n\
5. Exit\n";

pub const MENU_PROMPT: &str = "Choose an action [1-5]: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowGreeks,
    ShowPrice,
    PlotPayoff,
    TryAnother,
    Exit,
}

impl FromStr for MenuAction {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuAction::ShowGreeks),
            "2" => Ok(MenuAction::ShowPrice),
            "3" => Ok(MenuAction::PlotPayoff),
            "4" => Ok(MenuAction::TryAnother),
            "5" => Ok(MenuAction::Exit),
            other => Err(PricerError::invalid_input(format!(
                "'{}' is not a menu choice",
                other
            ))),
        }
    }
}
