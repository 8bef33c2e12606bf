//! Example: Black-Scholes pricing and analysis without network access
//!
//! Run with: cargo run --example basic_pricing

use bs_options::prelude::*;

fn main() -> PricerResult<()> {
    // Option parameters
    let spot = 500.0;
    let strike = 505.0;
    let time = 0.25; // 3 months
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility
    let premium = 18.75; // observed last price

    let inputs = MarketInputs::new(spot, strike, time, rate, vol);

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call_price = bs_price(&inputs, OptionType::Call)?;
    let put_price = bs_price(&inputs, OptionType::Put)?;
    println!("Call Price: ${:.4}", call_price);
    println!("Put Price:  ${:.4}", put_price);

    // Put-call parity: C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.2e}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    let greeks = analyze(&inputs, premium, OptionType::Call)?;
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} (per day: {:.4})", greeks.theta, greeks.theta_per_day());
    println!("Vega:   {:.4}", greeks.vega);
    println!("Rho:    {:.4}", greeks.rho);
    println!("P(ITM): {:.2}%", greeks.probability_itm * 100.0);

    println!("\n=== Market vs Model ===\n");
    let valuation = value_against_market(&inputs, premium, OptionType::Call)?;
    println!(
        "Premium ${:.2} vs model ${:.2}: {:?} by {:.2}%",
        valuation.market, valuation.theoretical, valuation.verdict, valuation.percent_difference
    );

    // Unknown kinds are rejected at parse time
    match "straddle".parse::<OptionType>() {
        Ok(kind) => println!("Parsed {}", kind),
        Err(e) => println!("\n{}", e),
    }

    let diagram = PayoffDiagram::long(OptionType::Call, spot, strike, premium, 91);
    AsciiRenderer::new(std::io::stdout()).render(&diagram)?;

    Ok(())
}
