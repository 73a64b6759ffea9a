//! Chart Plotter Module
//! Draws the athlete and nation charts using egui_plot.

use super::{AthleteChart, NationSeries};
use crate::data::DATE_FORMAT;
use chrono::NaiveDate;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points};

/// Athlete line colour
pub const ATHLETE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
/// National best overlay colour
pub const NATIONAL_BEST_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 500.0;

/// Days between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn get_nation_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Format an epoch-day x value as `DD-MM-YYYY`.
    pub fn day_label(day: f64) -> String {
        NaiveDate::from_num_days_from_ce_opt(day.round() as i32 + UNIX_EPOCH_DAYS_FROM_CE)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Split a series at missing values into drawable runs.
    pub fn segments(points: &[(f64, Option<f64>)]) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for &(x, y) in points {
            match y {
                Some(y) => current.push([x, y]),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn hover_label(name: &str, value: &PlotPoint) -> String {
        let date = Self::day_label(value.x);
        if name.is_empty() {
            format!("{}\n{:.2}", date, value.y)
        } else {
            format!("{}\n{}\n{:.2}", name, date, value.y)
        }
    }

    /// Draw the athlete chart. Returns the date of the point nearest a click.
    pub fn draw_athlete_chart(ui: &mut egui::Ui, chart: &AthleteChart) -> Option<String> {
        let athlete_label = chart.athlete.clone().unwrap_or_default();

        let response = Plot::new("athlete_chart")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("FIS Points")
            .x_axis_formatter(|mark, _range| Self::day_label(mark.value))
            .label_formatter(|name, value| Self::hover_label(name, value))
            .show(ui, |plot_ui| {
                let series: Vec<(f64, Option<f64>)> = chart
                    .series
                    .iter()
                    .map(|p| (p.day as f64, p.points))
                    .collect();
                for segment in Self::segments(&series) {
                    plot_ui.line(
                        Line::new(PlotPoints::from(segment.clone()))
                            .color(ATHLETE_COLOR)
                            .width(2.0)
                            .name(&athlete_label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(segment))
                            .radius(4.0)
                            .color(ATHLETE_COLOR)
                            .name(&athlete_label),
                    );
                }

                let overlay: Vec<[f64; 2]> = chart
                    .national_best
                    .iter()
                    .filter_map(|p| p.points.map(|y| [p.day as f64, y]))
                    .collect();
                if !overlay.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(overlay))
                            .color(NATIONAL_BEST_COLOR)
                            .width(1.5)
                            .name("National Best"),
                    );
                }
            });

        if !response.response.clicked() {
            return None;
        }
        let pos = response.response.interact_pointer_pos()?;
        let clicked_x = response.transform.value_from_position(pos).x;

        chart
            .series
            .iter()
            .min_by(|a, b| {
                let da = (a.day as f64 - clicked_x).abs();
                let db = (b.day as f64 - clicked_x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.date.clone())
    }

    /// Draw one line per nation with gaps where the average is missing.
    pub fn draw_nation_chart(ui: &mut egui::Ui, series: &[NationSeries]) {
        Plot::new("nation_chart")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Average FIS Points")
            .x_axis_formatter(|mark, _range| Self::day_label(mark.value))
            .label_formatter(|name, value| Self::hover_label(name, value))
            .show(ui, |plot_ui| {
                for (i, nation) in series.iter().enumerate() {
                    let color = Self::get_nation_color(i);
                    let points: Vec<(f64, Option<f64>)> = nation
                        .points
                        .iter()
                        .map(|p| (p.day as f64, p.mean))
                        .collect();

                    for segment in Self::segments(&points) {
                        plot_ui.line(
                            Line::new(PlotPoints::from(segment.clone()))
                                .color(color)
                                .width(2.0)
                                .name(&nation.nation),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from(segment))
                                .radius(3.5)
                                .color(color)
                                .name(&nation.nation),
                        );
                    }
                }
            });
    }
}
