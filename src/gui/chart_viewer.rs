//! Chart Viewer Widget
//! Central panel showing the chart picked by the layout toggle and the
//! details row for the athlete chart.

use crate::charts::{AthleteSummary, ChartPlotter};
use crate::dashboard::{DashboardView, Layout};
use egui::{Color32, RichText};

const CARD_WIDTH: f32 = 960.0;
const DETAIL_WIDTH: f32 = 150.0;

#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the active chart. Returns the date of a clicked athlete point.
    pub fn show(&mut self, ui: &mut egui::Ui, layout: Layout, view: &DashboardView) -> Option<String> {
        let mut clicked = None;

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_max_width(CARD_WIDTH);
                match layout {
                    Layout::SingleAthlete => {
                        let title = view
                            .athlete_chart
                            .athlete
                            .clone()
                            .unwrap_or_else(|| "No athlete selected".to_string());
                        ui.label(RichText::new(title).size(18.0).strong());
                        ui.add_space(8.0);
                        if view.athlete_chart.is_empty() {
                            Self::no_data(ui);
                        }
                        clicked = ChartPlotter::draw_athlete_chart(ui, &view.athlete_chart);
                        ui.add_space(10.0);
                        Self::draw_details(ui, &view.athlete_chart.summary);
                    }
                    Layout::Nations => {
                        ui.label(RichText::new("Average FIS Points by Nation").size(18.0).strong());
                        ui.add_space(8.0);
                        if view.nation_chart.iter().all(|s| s.points.is_empty()) {
                            Self::no_data(ui);
                        }
                        ChartPlotter::draw_nation_chart(ui, &view.nation_chart);
                    }
                }
            });

        clicked
    }

    fn no_data(ui: &mut egui::Ui) {
        ui.label(RichText::new("No Data").size(14.0).color(Color32::GRAY));
    }

    /// Details row under the athlete chart.
    fn draw_details(ui: &mut egui::Ui, summary: &AthleteSummary) {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let number = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_default();

        let fields = [
            ("Location:", text(&summary.location)),
            ("Category:", text(&summary.category)),
            ("National best:", text(&summary.national_best)),
            ("Position:", text(&summary.position)),
            ("Best:", number(summary.best)),
            ("Average:", number(summary.average)),
        ];

        ui.horizontal_wrapped(|ui| {
            for (label, value) in fields {
                egui::Frame::none()
                    .stroke(egui::Stroke::new(1.0, Color32::LIGHT_GRAY))
                    .rounding(5.0)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.set_width(DETAIL_WIDTH);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(label).size(13.0).strong());
                            ui.label(RichText::new(value).size(12.0).monospace());
                        });
                    });
            }
        });
    }
}
