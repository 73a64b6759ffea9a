//! Statistics Calculator Module
//! Aggregates over FIS points. Missing points never take part in an aggregate.

use crate::data::RaceResult;

/// Aggregates for a set of results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointsStats {
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute mean and max over the numeric values, skipping missing ones.
    pub fn compute_points_stats<I>(values: I) -> PointsStats
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        let n = values.len();
        if n == 0 {
            return PointsStats::default();
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        PointsStats {
            mean: Some(mean),
            max: Some(max),
        }
    }

    /// Mean points of the results, `None` when none carry points.
    pub fn mean_points<'a, I>(results: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a RaceResult>,
    {
        Self::compute_points_stats(results.into_iter().map(|r| r.fis_points)).mean
    }

    /// The result with the largest points, first one on ties.
    pub fn largest_points<'a, I>(results: I) -> Option<&'a RaceResult>
    where
        I: IntoIterator<Item = &'a RaceResult>,
    {
        let mut best: Option<(&RaceResult, f64)> = None;
        for result in results {
            let Some(points) = result.fis_points else {
                continue;
            };
            match best {
                Some((_, top)) if points <= top => {}
                _ => best = Some((result, points)),
            }
        }
        best.map(|(result, _)| result)
    }
}
