//! Filter Engine
//! Narrows the results table to one athlete's rows for the current selections.

use super::{is_any_of, Dataset, CATEGORY, DISCIPLINE, LOCATION, NAME};
use polars::prelude::*;

const SLALOM_DISCIPLINES: [&str; 2] = ["Parallel Slalom", "Slalom"];
const GIANT_SLALOM_DISCIPLINES: [&str; 3] = ["Parallel GS", "Parallel Giant Slalom", "Giant Slalom"];

/// Discipline slider stops: 0 = SL, 5 = ALL, 10 = GS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisciplineBucket {
    Slalom,
    #[default]
    All,
    GiantSlalom,
}

impl DisciplineBucket {
    pub const SLIDER_SL: i64 = 0;
    pub const SLIDER_ALL: i64 = 5;
    pub const SLIDER_GS: i64 = 10;

    /// Any value other than the two outer stops means no discipline filter.
    pub fn from_slider(value: i64) -> Self {
        match value {
            Self::SLIDER_SL => DisciplineBucket::Slalom,
            Self::SLIDER_GS => DisciplineBucket::GiantSlalom,
            _ => DisciplineBucket::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisciplineBucket::Slalom => "SL",
            DisciplineBucket::All => "ALL",
            DisciplineBucket::GiantSlalom => "GS",
        }
    }

    /// Disciplines kept by this bucket, `None` when unfiltered.
    pub fn disciplines(self) -> Option<&'static [&'static str]> {
        match self {
            DisciplineBucket::Slalom => Some(&SLALOM_DISCIPLINES),
            DisciplineBucket::GiantSlalom => Some(&GIANT_SLALOM_DISCIPLINES),
            DisciplineBucket::All => None,
        }
    }
}

/// Selections that narrow the single-athlete view.
#[derive(Debug, Clone, Default)]
pub struct AthleteFilter {
    pub name: Option<String>,
    pub location: Option<String>,
    pub discipline: DisciplineBucket,
    pub categories: Vec<String>,
}

/// Filter the table down to one athlete's rows.
///
/// Name, then discipline bucket, then location (only when it leaves rows),
/// then categories (only when the list is non-empty). Absent selections
/// leave the set unchanged. The shared table is never modified.
pub fn filter_athlete(dataset: &Dataset, filter: &AthleteFilter) -> PolarsResult<DataFrame> {
    let mut person = dataset.frame().clone();

    if let Some(name) = &filter.name {
        person = person.lazy().filter(col(NAME).eq(lit(name.as_str()))).collect()?;
    }

    if let Some(disciplines) = filter.discipline.disciplines() {
        let disciplines: Vec<String> = disciplines.iter().map(|d| d.to_string()).collect();
        person = person
            .lazy()
            .filter(is_any_of(DISCIPLINE, &disciplines))
            .collect()?;
    }

    if let Some(location) = &filter.location {
        let at_location = person
            .clone()
            .lazy()
            .filter(col(LOCATION).eq(lit(location.as_str())))
            .collect()?;
        if at_location.height() > 0 {
            person = at_location;
        } else {
            log::debug!("Location '{}' has no rows for this selection, ignoring", location);
        }
    }

    if !filter.categories.is_empty() {
        person = person
            .lazy()
            .filter(is_any_of(CATEGORY, &filter.categories))
            .collect()?;
    }

    Ok(person)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::dataset;
    use crate::data::{distinct_strings, race_results};

    fn sample() -> Dataset {
        dataset(&[
            "Xavier X,Czechia,M,Slalom,World Cup,Levi,12-11-2022,3,10.0",
            "Xavier X,Czechia,M,Parallel Slalom,World Cup,Lech,27-11-2022,4,11.0",
            "Xavier X,Czechia,M,Giant Slalom,European Cup,Levi,13-11-2022,8,20.0",
            "Xavier X,Czechia,M,Parallel GS,FIS,Lech,28-11-2022,2,21.0",
            "Xavier X,Czechia,M,Parallel Giant Slalom,FIS,Zagreb,05-01-2023,1,22.0",
            "Xavier X,Czechia,M,Super G,FIS,Zagreb,06-01-2023,9,30.0",
        ])
    }

    fn named(name: &str) -> AthleteFilter {
        AthleteFilter {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_slider_mapping() {
        assert_eq!(DisciplineBucket::from_slider(0), DisciplineBucket::Slalom);
        assert_eq!(DisciplineBucket::from_slider(5), DisciplineBucket::All);
        assert_eq!(DisciplineBucket::from_slider(10), DisciplineBucket::GiantSlalom);
        assert_eq!(DisciplineBucket::from_slider(7), DisciplineBucket::All);
    }

    #[test]
    fn test_all_bucket_returns_every_row() {
        let ds = sample();
        let rows = filter_athlete(&ds, &named("Xavier X")).unwrap();
        assert_eq!(rows.height(), ds.height());
    }

    #[test]
    fn test_slalom_bucket() {
        let ds = sample();
        let filter = AthleteFilter {
            discipline: DisciplineBucket::Slalom,
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(
            distinct_strings(&rows, DISCIPLINE).unwrap(),
            vec!["Slalom", "Parallel Slalom"]
        );
    }

    #[test]
    fn test_giant_slalom_bucket() {
        let ds = sample();
        let filter = AthleteFilter {
            discipline: DisciplineBucket::GiantSlalom,
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(rows.height(), 3);
        for row in race_results(&rows).unwrap() {
            assert!(GIANT_SLALOM_DISCIPLINES.contains(&row.discipline.as_str()));
        }
    }

    #[test]
    fn test_unknown_name_is_empty() {
        let ds = sample();
        let rows = filter_athlete(&ds, &named("Nobody")).unwrap();
        assert_eq!(rows.height(), 0);
    }

    #[test]
    fn test_absent_name_is_no_op() {
        let ds = sample();
        let rows = filter_athlete(&ds, &AthleteFilter::default()).unwrap();
        assert_eq!(rows.height(), ds.height());
    }

    #[test]
    fn test_location_applies_when_present() {
        let ds = sample();
        let filter = AthleteFilter {
            location: Some("Levi".to_string()),
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(rows.height(), 2);
    }

    #[test]
    fn test_unknown_location_falls_back() {
        let ds = sample();
        let filter = AthleteFilter {
            location: Some("Aspen".to_string()),
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(rows.height(), ds.height());
    }

    #[test]
    fn test_location_outside_bucket_falls_back() {
        let ds = sample();
        let filter = AthleteFilter {
            location: Some("Zagreb".to_string()),
            discipline: DisciplineBucket::Slalom,
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(rows.height(), 2);
    }

    #[test]
    fn test_categories() {
        let ds = sample();
        let filter = AthleteFilter {
            categories: vec!["FIS".to_string(), "European Cup".to_string()],
            ..named("Xavier X")
        };
        let rows = filter_athlete(&ds, &filter).unwrap();
        assert_eq!(rows.height(), 4);
        assert!(!distinct_strings(&rows, CATEGORY)
            .unwrap()
            .contains(&"World Cup".to_string()));
    }

    #[test]
    fn test_filters_do_not_touch_shared_table() {
        let ds = sample();
        let before = ds.height();
        let filter = AthleteFilter {
            location: Some("Levi".to_string()),
            discipline: DisciplineBucket::Slalom,
            categories: vec!["World Cup".to_string()],
            ..named("Xavier X")
        };
        filter_athlete(&ds, &filter).unwrap();
        assert_eq!(ds.height(), before);
    }
}
