//! Interactive session
//!
//! One run of the tool: pick a ticker, expiry, side and contract, then
//! analyse it from the action menu. "Try another option" goes back to
//! contract selection through the `Step` loop rather than by re-entering
//! the session.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};

use super::format::{
    chain_listing, days_to_expiry, expiration_menu, greeks_report, valuation_report,
    years_from_days,
};
use super::menu::{MenuAction, MENU_PROMPT, MENU_TEXT};
use crate::config::DEFAULT_FALLBACK_RATE;
use crate::core::{MarketInputs, OptionType, PricerResult};
use crate::data::{MarketDataProvider, MaturityBucket, RateProvider};
use crate::models::{analyze, value_against_market};
use crate::payoff::{PayoffDiagram, PayoffRenderer};

/// A contract picked from a chain, with everything needed to analyse it
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub symbol: String,
    pub option_type: OptionType,
    pub expiry: NaiveDate,
    pub days_to_expiry: i64,
    pub inputs: MarketInputs,
    /// Last traded price of the contract
    pub premium: f64,
}

/// Where the session goes next
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    PickContract,
    Analyze(Selection),
    Exit,
}

pub struct Session<R, W> {
    input: R,
    out: W,
    market: Box<dyn MarketDataProvider>,
    rates: Box<dyn RateProvider>,
    renderer: Box<dyn PayoffRenderer>,
    fallback_rate: f64,
    today: NaiveDate,
    pending_ticker: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        out: W,
        market: Box<dyn MarketDataProvider>,
        rates: Box<dyn RateProvider>,
        renderer: Box<dyn PayoffRenderer>,
    ) -> Self {
        Self {
            input,
            out,
            market,
            rates,
            renderer,
            fallback_rate: DEFAULT_FALLBACK_RATE,
            today: Local::now().date_naive(),
            pending_ticker: None,
        }
    }

    /// Rate used when the rate provider has nothing
    pub fn with_fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = rate;
        self
    }

    /// Date that days-to-expiry are counted from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Use this ticker for the first contract instead of prompting
    pub fn with_ticker(mut self, ticker: Option<String>) -> Self {
        self.pending_ticker = ticker;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user exits or input ends.
    ///
    /// Only terminal I/O failures are returned; provider and pricing errors
    /// are reported to the user and the session carries on.
    pub fn run(&mut self) -> PricerResult<()> {
        writeln!(self.out, "\nOptions Pricing Tool")?;

        let mut step = Step::PickContract;
        loop {
            step = match step {
                Step::PickContract => self.pick_contract()?,
                Step::Analyze(selection) => self.analysis_menu(&selection)?,
                Step::Exit => break,
            };
        }

        writeln!(self.out, "Exiting Options Pricing Tool. Goodbye!")?;
        self.out.flush()?;
        Ok(())
    }

    /// Prompt and read one line; `None` on end of input
    fn prompt(&mut self, text: &str) -> PricerResult<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a 1-based index into a list of `len` items
    fn prompt_index(&mut self, text: &str, len: usize) -> PricerResult<Option<Option<usize>>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        let index = line
            .parse::<usize>()
            .ok()
            .filter(|&i| i >= 1 && i <= len)
            .map(|i| i - 1);
        Ok(Some(index))
    }

    fn say(&mut self, text: impl AsRef<str>) -> PricerResult<()> {
        writeln!(self.out, "{}", text.as_ref())?;
        Ok(())
    }

    fn pick_contract(&mut self) -> PricerResult<Step> {
        let ticker = match self.pending_ticker.take() {
            Some(ticker) => ticker,
            None => match self.prompt("Enter stock ticker (e.g., AAPL, BAC): ")? {
                Some(line) => line,
                None => return Ok(Step::Exit),
            },
        };
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            self.say("Please enter a ticker symbol.")?;
            return Ok(Step::PickContract);
        }

        let dates = match self.market.expirations(&ticker) {
            Ok(dates) if !dates.is_empty() => dates,
            Ok(_) => {
                self.say(format!("No listed options found for {}.", ticker))?;
                return Ok(Step::PickContract);
            }
            Err(e) => {
                tracing::warn!("Expiration lookup failed for {}: {}", ticker, e);
                self.say(format!("Error fetching data for {}: {}", ticker, e))?;
                return Ok(Step::PickContract);
            }
        };

        let menu = expiration_menu(&dates);
        self.say(format!("\nAvailable expiration dates for {}:", ticker))?;
        for entry in &menu {
            self.say(format!("[{}] {}", entry.index, entry.label))?;
        }

        let prompt = format!("Choose an expiration date [1-{}]: ", menu.len());
        let Some(choice) = self.prompt_index(&prompt, menu.len())? else {
            return Ok(Step::Exit);
        };
        let Some(choice) = choice else {
            self.say("Invalid selection.")?;
            return Ok(Step::PickContract);
        };
        let expiration = &menu[choice];
        let expiry = expiration.date;
        self.say(format!("\nYou selected: {} ({})", expiration.label, expiry))?;

        let days = days_to_expiry(expiry, self.today);
        if days <= 0 {
            self.say("This expiration has no time left to price; choose a later date.")?;
            return Ok(Step::PickContract);
        }
        let time = years_from_days(days);
        self.say(format!("Time to expiration: {} days ({:.3} years)", days, time))?;

        let bucket = MaturityBucket::for_time(time);
        let rate = match self.rates.latest_yield(bucket) {
            Some(rate) => {
                self.say(format!("Risk-free rate (from {}): {:.4}", bucket, rate))?;
                rate
            }
            None => {
                tracing::warn!(
                    "{} yield unavailable, using fallback rate {}",
                    bucket,
                    self.fallback_rate
                );
                let rate = self.fallback_rate;
                self.say(format!(
                    "Risk-free rate ({} unavailable, using fallback): {:.4}",
                    bucket, rate
                ))?;
                rate
            }
        };

        let chain = match self.market.option_chain(&ticker, expiry) {
            Ok(chain) => chain,
            Err(e) => {
                tracing::warn!("Chain lookup failed for {} {}: {}", ticker, expiry, e);
                self.say(format!("Could not retrieve options: {}", e))?;
                return Ok(Step::PickContract);
            }
        };

        let Some(kind) = self.prompt("Choose option type [call/put]: ")? else {
            return Ok(Step::Exit);
        };
        let option_type = match kind.parse::<OptionType>() {
            Ok(option_type) => option_type,
            Err(_) => {
                self.say("Invalid option type. Please choose 'call' or 'put'.")?;
                return Ok(Step::PickContract);
            }
        };

        let rows = chain.display_rows(option_type);
        if rows.is_empty() {
            self.say(format!("No {} options listed for {}.", option_type, expiry))?;
            return Ok(Step::PickContract);
        }

        let spot = match self.market.spot(&ticker) {
            Ok(spot) => spot,
            Err(e) => {
                tracing::warn!("Spot lookup failed for {}: {}", ticker, e);
                self.say(format!("Could not retrieve current price: {}", e))?;
                return Ok(Step::PickContract);
            }
        };

        let listing = chain_listing(&ticker, option_type, expiry, &rows, spot);
        write!(self.out, "{}", listing)?;

        let prompt = format!("Choose a {} option [#]: ", option_type);
        let Some(pick) = self.prompt_index(&prompt, rows.len())? else {
            return Ok(Step::Exit);
        };
        let Some(pick) = pick else {
            self.say("Invalid option selection.")?;
            return Ok(Step::PickContract);
        };

        let row = rows[pick];
        if !(row.strike > 0.0 && row.implied_volatility > 0.0 && spot > 0.0) {
            self.say("This contract has no usable strike or implied volatility.")?;
            return Ok(Step::PickContract);
        }

        tracing::info!(
            "Selected {} {} {} strike {} (IV {:.4}, premium {})",
            ticker,
            expiry,
            option_type,
            row.strike,
            row.implied_volatility,
            row.last_price
        );

        Ok(Step::Analyze(Selection {
            symbol: ticker,
            option_type,
            expiry,
            days_to_expiry: days,
            inputs: MarketInputs::new(spot, row.strike, time, rate, row.implied_volatility),
            premium: row.last_price,
        }))
    }

    fn analysis_menu(&mut self, selection: &Selection) -> PricerResult<Step> {
        loop {
            write!(self.out, "{}", MENU_TEXT)?;
            let Some(line) = self.prompt(MENU_PROMPT)? else {
                return Ok(Step::Exit);
            };

            match line.parse::<MenuAction>() {
                Ok(MenuAction::ShowGreeks) => self.show_greeks(selection)?,
                Ok(MenuAction::ShowPrice) => self.show_price(selection)?,
                Ok(MenuAction::PlotPayoff) => self.plot_payoff(selection)?,
                Ok(MenuAction::TryAnother) => {
                    self.say("Returning to choose another option.")?;
                    return Ok(Step::PickContract);
                }
                Ok(MenuAction::Exit) => return Ok(Step::Exit),
                Err(_) => self.say("Invalid action. Choose a number from 1 to 5.")?,
            }
        }
    }

    fn show_greeks(&mut self, selection: &Selection) -> PricerResult<()> {
        match analyze(&selection.inputs, selection.premium, selection.option_type) {
            Ok(greeks) => self.say(greeks_report(&greeks)),
            Err(e) => {
                tracing::warn!("Greeks failed for {:?}: {}", selection.inputs, e);
                self.say(format!("Could not compute Greeks: {}", e))
            }
        }
    }

    fn show_price(&mut self, selection: &Selection) -> PricerResult<()> {
        match value_against_market(&selection.inputs, selection.premium, selection.option_type) {
            Ok(valuation) => self.say(valuation_report(
                &valuation,
                &selection.inputs,
                selection.option_type,
            )),
            Err(e) => {
                tracing::warn!("Pricing failed for {:?}: {}", selection.inputs, e);
                self.say(format!("Could not compute a price: {}", e))
            }
        }
    }

    fn plot_payoff(&mut self, selection: &Selection) -> PricerResult<()> {
        let diagram = PayoffDiagram::long(
            selection.option_type,
            selection.inputs.spot,
            selection.inputs.strike,
            selection.premium,
            selection.days_to_expiry,
        );

        if let Err(e) = self.renderer.render(&diagram) {
            tracing::warn!("Payoff rendering failed: {}", e);
            self.say(format!("Could not draw payoff diagram: {}", e))?;
        }
        Ok(())
    }
}
