//! Data module - results table loading, filtering and dropdown options

mod filter;
mod loader;
mod options;

pub use filter::{filter_athlete, AthleteFilter, DisciplineBucket};
pub use loader::{DatasetLoader, LoaderError};
pub use options::{category_options, location_options, name_options};

use polars::prelude::*;

pub const NAME: &str = "Name";
pub const NATION: &str = "Nation";
pub const GENDER: &str = "Gender";
pub const DISCIPLINE: &str = "Discipline";
pub const CATEGORY: &str = "Category";
pub const LOCATION: &str = "Location";
pub const DATE: &str = "Date";
pub const POSITION: &str = "Position";
pub const FIS_POINTS: &str = "FIS Points";
/// Derived column holding `Date` parsed as a calendar date.
pub const DATE_PARSED: &str = "Date Parsed";

/// Columns every results CSV must provide, in table order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    NAME, NATION, GENDER, DISCIPLINE, CATEGORY, LOCATION, DATE, POSITION, FIS_POINTS,
];

pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const QUALIFICATION: &str = "Qualification";

/// One athlete's result in one race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub name: String,
    pub nation: String,
    pub gender: String,
    pub discipline: String,
    pub category: String,
    pub location: String,
    pub date: String,
    /// Days since 1970-01-01, used as the chart x coordinate.
    pub day: i32,
    pub position: String,
    pub fis_points: Option<f64>,
}

/// Immutable results table shared by every view for the process lifetime.
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Read-only access to the underlying table.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn nations(&self) -> PolarsResult<Vec<String>> {
        distinct_strings(&self.df, NATION)
    }
}

/// Distinct non-null values of a text column, in order of first appearance.
pub fn distinct_strings(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
    let ca = df.column(column)?.str()?;
    let mut seen = std::collections::HashSet::new();
    Ok(ca
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(|v| v.to_string())
        .collect())
}

/// Keep rows whose `column` equals any of `values`.
pub(crate) fn is_any_of(column: &str, values: &[String]) -> Expr {
    values
        .iter()
        .map(|v| col(column).eq(lit(v.as_str())))
        .reduce(|acc, e| acc.or(e))
        .unwrap_or_else(|| lit(false))
}

/// Convert a (filtered) results frame into typed rows.
pub fn race_results(df: &DataFrame) -> PolarsResult<Vec<RaceResult>> {
    let names = df.column(NAME)?.str()?;
    let nations = df.column(NATION)?.str()?;
    let genders = df.column(GENDER)?.str()?;
    let disciplines = df.column(DISCIPLINE)?.str()?;
    let categories = df.column(CATEGORY)?.str()?;
    let locations = df.column(LOCATION)?.str()?;
    let dates = df.column(DATE)?.str()?;
    let positions = df.column(POSITION)?.str()?;
    let days = df.column(DATE_PARSED)?.cast(&DataType::Int32)?;
    let days = days.i32()?;
    let points = df.column(FIS_POINTS)?.f64()?;

    let text = |v: Option<&str>| v.unwrap_or_default().to_string();

    Ok((0..df.height())
        .map(|i| RaceResult {
            name: text(names.get(i)),
            nation: text(nations.get(i)),
            gender: text(genders.get(i)),
            discipline: text(disciplines.get(i)),
            category: text(categories.get(i)),
            location: text(locations.get(i)),
            date: text(dates.get(i)),
            day: days.get(i).unwrap_or_default(),
            position: text(positions.get(i)),
            fis_points: points.get(i).filter(|v| !v.is_nan()),
        })
        .collect())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Dataset, DatasetLoader};
    use std::path::Path;

    pub const HEADER: &str =
        "Name,Nation,Gender,Discipline,Category,Location,Date,Position,FIS Points";

    pub fn write_csv(dir: &Path, file: &str, rows: &[&str]) {
        let mut body = String::from(HEADER);
        body.push('\n');
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        std::fs::write(dir.join(file), body).unwrap();
    }

    /// Load a dataset from rows written to a single temporary CSV.
    pub fn dataset(rows: &[&str]) -> Dataset {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "results.csv", rows);
        DatasetLoader::new(dir.path()).load().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::dataset;
    use super::*;

    #[test]
    fn test_results_carry_epoch_days() {
        let ds = dataset(&["Alpha Anna,Czechia,F,Slalom,World Cup,Levi,02-01-1970,3,10.5"]);
        let rows = race_results(ds.frame()).unwrap();
        assert_eq!(rows[0].day, 1);
        assert_eq!(rows[0].date, "02-01-1970");
        assert_eq!(rows[0].fis_points, Some(10.5));
    }

    #[test]
    fn test_distinct_keeps_first_appearance_order() {
        let ds = dataset(&[
            "Beta Bob,Austria,M,Slalom,FIS,Levi,01-01-2023,1,20.0",
            "Alpha Anna,Czechia,F,Slalom,FIS,Levi,01-01-2023,1,10.0",
            "Beta Bob,Austria,M,Slalom,FIS,Zagreb,02-01-2023,1,21.0",
        ]);
        assert_eq!(distinct_strings(ds.frame(), NAME).unwrap(), vec!["Beta Bob", "Alpha Anna"]);
        assert_eq!(ds.nations().unwrap(), vec!["Austria", "Czechia"]);
        assert_eq!(distinct_strings(ds.frame(), LOCATION).unwrap(), vec!["Levi", "Zagreb"]);
    }
}
