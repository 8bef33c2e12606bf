//! Native window rendering of payoff diagrams

use eframe::egui;
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints, VLine};

use super::diagram::PayoffDiagram;
use super::PayoffRenderer;
use crate::core::{OptionType, PricerError, PricerResult};

/// Opens a window per diagram and blocks until it is closed
#[derive(Debug, Default)]
pub struct WindowRenderer;

impl PayoffRenderer for WindowRenderer {
    fn render(&mut self, diagram: &PayoffDiagram) -> PricerResult<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([900.0, 600.0])
                .with_title(diagram.title()),
            ..Default::default()
        };

        let app = PayoffApp {
            diagram: diagram.clone(),
        };

        tracing::debug!("Opening payoff window: {}", diagram.title());
        eframe::run_native(
            "Payoff Diagram",
            options,
            Box::new(move |_cc| Box::new(app)),
        )
        .map_err(|e| PricerError::render(e.to_string()))
    }
}

struct PayoffApp {
    diagram: PayoffDiagram,
}

impl eframe::App for PayoffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let d = &self.diagram;

        egui::TopBottomPanel::bottom("ticks").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for tick in &d.ticks {
                    ui.label(&tick.label);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(d.title());
            ui.label(d.subtitle());
            ui.separator();

            let (name, color) = match d.option_type {
                OptionType::Call => ("Long Call P&L", egui::Color32::from_rgb(0, 160, 0)),
                OptionType::Put => ("Long Put P&L", egui::Color32::from_rgb(139, 0, 0)),
            };

            Plot::new("payoff")
                .x_axis_label("Stock Price at Expiration ($)")
                .y_axis_label("Profit / Loss ($)")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.hline(
                        HLine::new(0.0)
                            .color(egui::Color32::GRAY)
                            .style(LineStyle::Dashed { length: 6.0 }),
                    );

                    plot_ui.line(
                        Line::new(PlotPoints::new(d.points.clone()))
                            .name(name)
                            .color(color)
                            .width(2.0),
                    );

                    plot_ui.vline(
                        VLine::new(d.strike)
                            .name(format!("Strike Price (${:.2})", d.strike))
                            .color(egui::Color32::RED)
                            .style(LineStyle::Dashed { length: 5.0 }),
                    );

                    plot_ui.vline(
                        VLine::new(d.spot)
                            .name(format!("Current Price (${:.2})", d.spot))
                            .color(egui::Color32::LIGHT_BLUE)
                            .style(LineStyle::Dotted { spacing: 4.0 }),
                    );

                    plot_ui.vline(
                        VLine::new(d.breakeven)
                            .name(format!("Breakeven (${:.2})", d.breakeven))
                            .color(egui::Color32::from_rgb(160, 32, 240))
                            .style(LineStyle::Dashed { length: 10.0 }),
                    );
                });
        });
    }
}
