//! Single-athlete chart data: points over time, the national-best overlay and
//! the details summary for a clicked race.

use crate::data::{filter_athlete, race_results, AthleteFilter, Dataset, RaceResult, DATE_FORMAT, GENDER, NATION};
use crate::stats::StatsCalculator;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// One plotted result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub date: String,
    pub day: i32,
    pub points: Option<f64>,
}

impl From<&RaceResult> for SeriesPoint {
    fn from(result: &RaceResult) -> Self {
        Self {
            name: result.name.clone(),
            date: result.date.clone(),
            day: result.day,
            points: result.fis_points,
        }
    }
}

/// Details panel under the athlete chart. `None` renders as an empty field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AthleteSummary {
    pub location: Option<String>,
    pub position: Option<String>,
    /// Largest FIS points over the filtered results.
    pub best: Option<f64>,
    /// Mean over all filtered results, or from the clicked date onwards.
    pub average: Option<f64>,
    pub category: Option<String>,
    pub national_best: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AthleteChart {
    pub athlete: Option<String>,
    pub series: Vec<SeriesPoint>,
    pub national_best: Vec<SeriesPoint>,
    pub summary: AthleteSummary,
}

impl AthleteChart {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Build the single-athlete chart for the current selections.
///
/// `clicked_date` is the `DD-MM-YYYY` label of a point picked on the chart.
/// With no athlete selected, or no rows left after filtering, the chart is
/// empty and every summary field is missing.
pub fn build_athlete_chart(
    dataset: &Dataset,
    filter: &AthleteFilter,
    clicked_date: Option<&str>,
) -> PolarsResult<AthleteChart> {
    let Some(athlete) = filter.name.clone() else {
        return Ok(AthleteChart::default());
    };

    let person = race_results(&filter_athlete(dataset, filter)?)?;
    if person.is_empty() {
        return Ok(AthleteChart::default());
    }

    let overall = StatsCalculator::compute_points_stats(person.iter().map(|r| r.fis_points));
    let national_best = national_best_series(dataset, &person)?;

    let mut summary = AthleteSummary {
        best: overall.max,
        average: overall.mean,
        ..Default::default()
    };

    if let Some(date) = clicked_date {
        let on_date: Vec<&RaceResult> = person.iter().filter(|r| r.date == date).collect();
        summary.location = joined(on_date.iter().map(|r| r.location.as_str()));
        summary.position = joined(on_date.iter().map(|r| r.position.as_str()));
        summary.category = joined(on_date.iter().map(|r| r.category.as_str()));
        summary.national_best = joined(
            national_best
                .iter()
                .filter(|p| p.date == date)
                .map(|p| p.name.as_str()),
        );
        summary.average = match NaiveDate::parse_from_str(date, DATE_FORMAT) {
            Ok(clicked) => {
                let from_day = epoch_day(clicked);
                StatsCalculator::mean_points(person.iter().filter(|r| r.day >= from_day))
            }
            Err(e) => {
                log::warn!("Ignoring clicked date '{}': {}", date, e);
                None
            }
        };
    }

    let mut series: Vec<SeriesPoint> = person.iter().map(SeriesPoint::from).collect();
    series.sort_by_key(|p| p.day);

    Ok(AthleteChart {
        athlete: Some(athlete),
        series,
        national_best,
        summary,
    })
}

/// For every date the athlete raced, the same-nation same-gender result with
/// the largest FIS points that day.
///
/// The pick is by largest value, although FIS points are lower-is-better.
pub fn national_best_series(dataset: &Dataset, person: &[RaceResult]) -> PolarsResult<Vec<SeriesPoint>> {
    let Some(first) = person.first() else {
        return Ok(Vec::new());
    };

    let compatriots = race_results(
        &dataset
            .frame()
            .clone()
            .lazy()
            .filter(
                col(NATION)
                    .eq(lit(first.nation.as_str()))
                    .and(col(GENDER).eq(lit(first.gender.as_str()))),
            )
            .collect()?,
    )?;

    let mut seen = HashSet::new();
    let mut overlay: Vec<SeriesPoint> = person
        .iter()
        .filter(|r| seen.insert(r.date.as_str()))
        .filter_map(|r| {
            StatsCalculator::largest_points(compatriots.iter().filter(|c| c.date == r.date))
                .map(SeriesPoint::from)
        })
        .collect();
    overlay.sort_by_key(|p| p.day);

    Ok(overlay)
}

/// Days since 1970-01-01.
pub fn epoch_day(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

/// Distinct values joined for display, `None` when there are none.
fn joined<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    let distinct: Vec<&str> = values.filter(|v| seen.insert(*v)).collect();
    if distinct.is_empty() {
        None
    } else {
        Some(distinct.join(", "))
    }
}
