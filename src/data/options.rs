//! Cascading dropdown options.
//! Each resolver narrows one dropdown by the upstream selections and falls back
//! to the whole table when nothing matches, so a dropdown is never empty.

use super::{distinct_strings, is_any_of, Dataset, CATEGORY, LOCATION, NAME, NATION};
use polars::prelude::*;

/// Distinct `column` values of `subset`, or of the whole table when `subset` is empty.
fn options_or_all(dataset: &Dataset, subset: Option<DataFrame>, column: &str) -> PolarsResult<Vec<String>> {
    match subset {
        Some(df) if df.height() > 0 => distinct_strings(&df, column),
        _ => distinct_strings(dataset.frame(), column),
    }
}

/// Rows matching each value in turn, concatenated in selection order.
fn rows_for_each(dataset: &Dataset, column: &str, values: &[String]) -> PolarsResult<Option<DataFrame>> {
    if values.is_empty() {
        return Ok(None);
    }
    let frames: Vec<LazyFrame> = values
        .iter()
        .map(|v| {
            dataset
                .frame()
                .clone()
                .lazy()
                .filter(col(column).eq(lit(v.as_str())))
        })
        .collect();
    Ok(Some(concat(frames, UnionArgs::default())?.collect()?))
}

/// Athlete names for the selected nations.
pub fn name_options(dataset: &Dataset, nations: &[String]) -> PolarsResult<Vec<String>> {
    let subset = rows_for_each(dataset, NATION, nations)?;
    options_or_all(dataset, subset, NAME)
}

/// Categories raced by the selected athlete(s).
pub fn category_options(dataset: &Dataset, names: &[String]) -> PolarsResult<Vec<String>> {
    let subset = rows_for_each(dataset, NAME, names)?;
    options_or_all(dataset, subset, CATEGORY)
}

/// Locations for the selected athlete, narrowed by categories when any are chosen.
pub fn location_options(
    dataset: &Dataset,
    name: Option<&str>,
    categories: &[String],
) -> PolarsResult<Vec<String>> {
    let Some(name) = name else {
        return options_or_all(dataset, None, LOCATION);
    };

    let mut subset = dataset
        .frame()
        .clone()
        .lazy()
        .filter(col(NAME).eq(lit(name)));
    if !categories.is_empty() {
        subset = subset.filter(is_any_of(CATEGORY, categories));
    }
    options_or_all(dataset, Some(subset.collect()?), LOCATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::dataset;

    fn sample() -> Dataset {
        dataset(&[
            "Alpha Anna,Czechia,F,Slalom,World Cup,Levi,12-11-2022,3,10.0",
            "Beta Bob,Austria,M,Slalom,FIS,Zagreb,04-01-2023,1,20.0",
            "Alpha Anna,Czechia,F,Slalom,European Cup,Lech,27-11-2022,4,11.0",
            "Gamma Gus,Czechia,M,Giant Slalom,FIS,Soelden,23-10-2022,5,25.0",
            "Delta Dan,Norway,M,Slalom,National Championship,Oslo,01-03-2023,2,30.0",
        ])
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_names_for_nations_in_selection_order() {
        let ds = sample();
        let names = name_options(&ds, &strings(&["Austria", "Czechia"])).unwrap();
        assert_eq!(names, vec!["Beta Bob", "Alpha Anna", "Gamma Gus"]);
    }

    #[test]
    fn test_names_fall_back_to_all() {
        let ds = sample();
        let all = distinct_strings(ds.frame(), NAME).unwrap();
        assert_eq!(name_options(&ds, &[]).unwrap(), all);
        assert_eq!(name_options(&ds, &strings(&["Atlantis"])).unwrap(), all);
    }

    #[test]
    fn test_categories_for_name() {
        let ds = sample();
        let categories = category_options(&ds, &strings(&["Alpha Anna"])).unwrap();
        assert_eq!(categories, vec!["World Cup", "European Cup"]);
    }

    #[test]
    fn test_categories_without_name_fall_back_to_all() {
        let ds = sample();
        let categories = category_options(&ds, &[]).unwrap();
        assert!(!categories.is_empty());
        assert_eq!(categories, distinct_strings(ds.frame(), CATEGORY).unwrap());
    }

    #[test]
    fn test_locations_for_name_and_categories() {
        let ds = sample();
        assert_eq!(
            location_options(&ds, Some("Alpha Anna"), &[]).unwrap(),
            vec!["Levi", "Lech"]
        );
        assert_eq!(
            location_options(&ds, Some("Alpha Anna"), &strings(&["European Cup"])).unwrap(),
            vec!["Lech"]
        );
    }

    #[test]
    fn test_locations_fall_back_when_nothing_matches() {
        let ds = sample();
        let all = distinct_strings(ds.frame(), LOCATION).unwrap();
        assert_eq!(
            location_options(&ds, Some("Alpha Anna"), &strings(&["FIS"])).unwrap(),
            all
        );
        assert_eq!(location_options(&ds, None, &strings(&["FIS"])).unwrap(), all);
    }
}
