//! Terminal rendering of payoff diagrams

use std::io::Write;

use super::diagram::PayoffDiagram;
use super::PayoffRenderer;
use crate::core::PricerResult;

const CURVE: char = '*';
const ZERO: char = '-';
const MARKER: char = ':';

/// Character-grid plot written to any `Write`
pub struct AsciiRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_size(out, 64, 18)
    }

    pub fn with_size(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(11),
            height: height.max(5),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn grid(&self, diagram: &PayoffDiagram) -> (Vec<Vec<char>>, f64, f64) {
        let (x_lo, x_hi) = diagram.price_range();
        let (p_lo, p_hi) = diagram.payoff_range();
        let y_lo = p_lo.min(0.0);
        let mut y_hi = p_hi.max(0.0);
        if y_hi - y_lo < f64::EPSILON {
            y_hi = y_lo + 1.0;
        }

        let (w, h) = (self.width, self.height);
        let mut grid = vec![vec![' '; w]; h];
        let row_of = |y: f64| (((y_hi - y) / (y_hi - y_lo)) * (h - 1) as f64).round() as usize;
        let col_of = |x: f64| {
            if x < x_lo || x > x_hi {
                None
            } else {
                Some((((x - x_lo) / (x_hi - x_lo)) * (w - 1) as f64).round() as usize)
            }
        };

        let zero_row = row_of(0.0);
        for cell in grid[zero_row].iter_mut() {
            *cell = ZERO;
        }

        for x in [diagram.strike, diagram.spot, diagram.breakeven] {
            if let Some(col) = col_of(x) {
                for row in grid.iter_mut() {
                    row[col] = MARKER;
                }
            }
        }

        for col in 0..w {
            let x = x_lo + (x_hi - x_lo) * col as f64 / (w - 1) as f64;
            let row = row_of(diagram.payoff_at(x)).min(h - 1);
            grid[row][col] = CURVE;
        }

        (grid, y_lo, y_hi)
    }
}

impl<W: Write> PayoffRenderer for AsciiRenderer<W> {
    fn render(&mut self, diagram: &PayoffDiagram) -> PricerResult<()> {
        let (grid, y_lo, y_hi) = self.grid(diagram);

        writeln!(self.out, "\n{}", diagram.title())?;
        writeln!(self.out, "({})", diagram.subtitle())?;
        writeln!(self.out, "Profit / Loss ($)")?;

        let last = grid.len() - 1;
        for (i, row) in grid.iter().enumerate() {
            let label = match i {
                0 => format!("{:>9.2}", y_hi),
                _ if i == last => format!("{:>9.2}", y_lo),
                _ => " ".repeat(9),
            };
            let line: String = row.iter().collect();
            writeln!(self.out, "{} |{}", label, line)?;
        }

        let first = &diagram.ticks[0];
        let middle = &diagram.ticks[diagram.ticks.len() / 2];
        let end = &diagram.ticks[diagram.ticks.len() - 1];
        writeln!(self.out, "{} +{}", " ".repeat(9), "-".repeat(self.width))?;
        writeln!(
            self.out,
            "{}  {}  ...  {}  ...  {}",
            " ".repeat(9),
            first.label,
            middle.label,
            end.label
        )?;
        writeln!(self.out, "Stock Price at Expiration ($)")?;
        writeln!(
            self.out,
            "Strike ${:.2} | Current Price ${:.2} | Breakeven ${:.2}   ('{}' markers)",
            diagram.strike, diagram.spot, diagram.breakeven, MARKER
        )?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;

    fn render_to_string(diagram: &PayoffDiagram) -> String {
        let mut renderer = AsciiRenderer::with_size(Vec::new(), 40, 10);
        renderer.render(diagram).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_render_call() {
        let d = PayoffDiagram::long(OptionType::Call, 100.0, 105.0, 3.0, 30);
        let text = render_to_string(&d);

        assert!(text.contains("Payoff Diagram - Long Call Option"));
        assert!(text.contains("(Time to Expiration: 30 days)"));
        assert!(text.contains("Breakeven $108.00"));
        assert!(text.contains("$50.00 (-50%)"));
        assert!(text.contains(CURVE));

        let plot_rows = text.lines().filter(|l| l.contains(" |")).count();
        assert_eq!(plot_rows, 10 + 1); // grid rows plus the legend line
    }

    #[test]
    fn test_curve_hits_top_and_bottom_rows() {
        let d = PayoffDiagram::long(OptionType::Put, 100.0, 100.0, 5.0, 10);
        let renderer = AsciiRenderer::with_size(Vec::new(), 30, 8);
        let (grid, y_lo, y_hi) = renderer.grid(&d);

        assert_eq!(y_lo, -5.0);
        assert_eq!(y_hi, 45.0);
        // Deep ITM on the left edge, max loss on the right edge
        assert_eq!(grid[0][0], CURVE);
        assert_eq!(grid[7][29], CURVE);
    }

    #[test]
    fn test_flat_payoff_does_not_divide_by_zero() {
        // Strike far above the plotted range: P&L is -premium everywhere
        let d = PayoffDiagram::long(OptionType::Call, 10.0, 100.0, 0.0, 3);
        let text = render_to_string(&d);
        assert!(text.contains(CURVE));
    }
}
