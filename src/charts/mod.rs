//! Charts module - chart data builders and plotting

mod athlete;
mod nations;
mod plotter;

pub use athlete::{build_athlete_chart, AthleteChart, AthleteSummary, SeriesPoint};
pub use nations::{build_nation_chart, NationPoint, NationSeries};
pub use plotter::ChartPlotter;
