//! Payoff diagrams
//!
//! `PayoffDiagram` computes the curve; a `PayoffRenderer` draws it, either
//! into the terminal or (with the `gui` feature) into a native window.

pub mod diagram;
pub mod ascii;
#[cfg(feature = "gui")]
pub mod window;

pub use diagram::*;
pub use ascii::AsciiRenderer;
#[cfg(feature = "gui")]
pub use window::WindowRenderer;

use crate::core::PricerResult;

/// A surface payoff diagrams can be drawn on
pub trait PayoffRenderer {
    fn render(&mut self, diagram: &PayoffDiagram) -> PricerResult<()>;
}
