//! Multi-nation chart data: mean FIS points per date for each selected nation.

use crate::data::{race_results, Dataset, RaceResult, FIS_POINTS, NAME, NATION};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationPoint {
    pub date: String,
    pub day: i32,
    /// `None` when the nation has no numeric result that day; drawn as a gap.
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationSeries {
    pub nation: String,
    pub points: Vec<NationPoint>,
}

/// Build one series per nation, in selection order.
///
/// With an athlete selected the dates are that athlete's race dates, whatever
/// their nation; otherwise every date the nation has a numeric result.
pub fn build_nation_chart(
    dataset: &Dataset,
    nations: &[String],
    athlete: Option<&str>,
) -> PolarsResult<Vec<NationSeries>> {
    let athlete_dates = match athlete {
        Some(name) => Some(distinct_dates(&race_results(
            &dataset
                .frame()
                .clone()
                .lazy()
                .filter(col(NAME).eq(lit(name)))
                .collect()?,
        )?)),
        None => None,
    };

    nations
        .par_iter()
        .map(|nation| nation_series(dataset, nation, athlete_dates.as_deref()))
        .collect()
}

fn nation_series(
    dataset: &Dataset,
    nation: &str,
    athlete_dates: Option<&[(String, i32)]>,
) -> PolarsResult<NationSeries> {
    let results = race_results(
        &dataset
            .frame()
            .clone()
            .lazy()
            .filter(col(NATION).eq(lit(nation)).and(col(FIS_POINTS).is_not_null()))
            .collect()?,
    )?;

    let dates = match athlete_dates {
        Some(dates) => dates.to_vec(),
        None => distinct_dates(&results),
    };

    let mut points: Vec<NationPoint> = dates
        .into_iter()
        .map(|(date, day)| {
            let mean = StatsCalculator::mean_points(results.iter().filter(|r| r.date == date));
            NationPoint { date, day, mean }
        })
        .collect();
    points.sort_by_key(|p| p.day);

    log::debug!("Nation {}: {} dates from {} results", nation, points.len(), results.len());

    Ok(NationSeries {
        nation: nation.to_string(),
        points,
    })
}

/// Distinct (date label, epoch day) pairs in order of first appearance.
fn distinct_dates(results: &[RaceResult]) -> Vec<(String, i32)> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter(|r| seen.insert(r.date.as_str()))
        .map(|r| (r.date.clone(), r.day))
        .collect()
}
