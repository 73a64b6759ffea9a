//! Dashboard state and event dispatch.
//! Every input change maps to a fixed set of outputs, recomputed synchronously
//! from the shared table and the current selections.

use crate::charts::{build_athlete_chart, build_nation_chart, AthleteChart, NationSeries};
use crate::data::{category_options, location_options, name_options, AthleteFilter, Dataset, DisciplineBucket};
use polars::prelude::PolarsResult;
use std::sync::Arc;

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    SingleAthlete,
    Nations,
}

/// Current values of every input widget.
#[derive(Debug, Clone)]
pub struct Selections {
    pub nations: Vec<String>,
    pub name: Option<String>,
    /// Discipline slider value (0, 5 or 10).
    pub discipline: i64,
    pub categories: Vec<String>,
    pub location: Option<String>,
    pub clicked_date: Option<String>,
    pub layout: Layout,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            nations: Vec::new(),
            name: None,
            discipline: DisciplineBucket::SLIDER_ALL,
            categories: Vec::new(),
            location: None,
            clicked_date: None,
            layout: Layout::default(),
        }
    }
}

impl Selections {
    pub fn new(nations: Vec<String>, name: Option<String>) -> Self {
        Self {
            nations,
            name,
            ..Default::default()
        }
    }

    pub fn athlete_filter(&self) -> AthleteFilter {
        AthleteFilter {
            name: self.name.clone(),
            location: self.location.clone(),
            discipline: DisciplineBucket::from_slider(self.discipline),
            categories: self.categories.clone(),
        }
    }

    fn names(&self) -> Vec<String> {
        self.name.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    NationsChanged,
    NameChanged,
    DisciplineChanged,
    CategoriesChanged,
    LocationChanged,
    PointClicked,
    LayoutChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    NameOptions,
    CategoryOptions,
    LocationOptions,
    AthleteChart,
    NationChart,
}

/// Outputs that depend on the input behind `event`.
pub fn affected_outputs(event: DashboardEvent) -> &'static [Output] {
    match event {
        DashboardEvent::NationsChanged => &[Output::NameOptions, Output::NationChart],
        DashboardEvent::NameChanged => &[
            Output::CategoryOptions,
            Output::LocationOptions,
            Output::AthleteChart,
            Output::NationChart,
        ],
        DashboardEvent::DisciplineChanged => &[Output::AthleteChart],
        DashboardEvent::CategoriesChanged => &[Output::LocationOptions, Output::AthleteChart],
        DashboardEvent::LocationChanged => &[Output::AthleteChart],
        DashboardEvent::PointClicked => &[Output::AthleteChart],
        DashboardEvent::LayoutChanged => &[],
    }
}

const ALL_OUTPUTS: [Output; 5] = [
    Output::NameOptions,
    Output::CategoryOptions,
    Output::LocationOptions,
    Output::AthleteChart,
    Output::NationChart,
];

/// Derived values shown by the widgets and charts.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub name_options: Vec<String>,
    pub category_options: Vec<String>,
    pub location_options: Vec<String>,
    pub athlete_chart: AthleteChart,
    pub nation_chart: Vec<NationSeries>,
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    pub selections: Selections,
    pub view: DashboardView,
}

impl Dashboard {
    /// Create the dashboard and compute every output once.
    pub fn new(dataset: Arc<Dataset>, selections: Selections) -> PolarsResult<Self> {
        let mut dashboard = Self {
            dataset,
            selections,
            view: DashboardView::default(),
        };
        for output in ALL_OUTPUTS {
            dashboard.refresh(output)?;
        }
        Ok(dashboard)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Recompute the outputs affected by `event`.
    pub fn handle(&mut self, event: DashboardEvent) -> PolarsResult<()> {
        log::debug!("Dashboard event {:?}", event);

        // A click refers to a point of the previous athlete's chart.
        if event == DashboardEvent::NameChanged {
            self.selections.clicked_date = None;
        }

        for &output in affected_outputs(event) {
            self.refresh(output)?;
        }
        Ok(())
    }

    fn refresh(&mut self, output: Output) -> PolarsResult<()> {
        let dataset = &self.dataset;
        let selections = &self.selections;
        match output {
            Output::NameOptions => {
                self.view.name_options = name_options(dataset, &selections.nations)?;
            }
            Output::CategoryOptions => {
                self.view.category_options = category_options(dataset, &selections.names())?;
            }
            Output::LocationOptions => {
                self.view.location_options =
                    location_options(dataset, selections.name.as_deref(), &selections.categories)?;
            }
            Output::AthleteChart => {
                self.view.athlete_chart = build_athlete_chart(
                    dataset,
                    &selections.athlete_filter(),
                    selections.clicked_date.as_deref(),
                )?;
            }
            Output::NationChart => {
                self.view.nation_chart =
                    build_nation_chart(dataset, &selections.nations, selections.name.as_deref())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::dataset;
    use crate::data::{distinct_strings, CATEGORY};

    fn sample() -> Arc<Dataset> {
        Arc::new(dataset(&[
            "Xavier X,Czechia,M,Slalom,World Cup,Levi,12-11-2022,3,10.0",
            "Xavier X,Czechia,M,Giant Slalom,FIS,Soelden,23-10-2022,8,20.0",
            "Olaf O,Norway,M,Slalom,European Cup,Levi,12-11-2022,1,5.0",
        ]))
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(
            sample(),
            Selections::new(vec!["Czechia".to_string()], Some("Xavier X".to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_outputs() {
        let dash = dashboard();
        assert_eq!(dash.view.name_options, vec!["Xavier X"]);
        assert_eq!(dash.view.category_options, vec!["World Cup", "FIS"]);
        assert_eq!(dash.view.location_options, vec!["Levi", "Soelden"]);
        assert_eq!(dash.view.athlete_chart.series.len(), 2);
        assert_eq!(dash.view.nation_chart.len(), 1);
    }

    #[test]
    fn test_default_selections_filter_nothing() {
        let filter = Selections::default().athlete_filter();
        assert_eq!(filter.discipline, DisciplineBucket::All);
        assert!(filter.name.is_none());
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn test_layout_refreshes_nothing() {
        assert!(affected_outputs(DashboardEvent::LayoutChanged).is_empty());
    }

    #[test]
    fn test_nations_change_updates_names_and_nation_chart() {
        let mut dash = dashboard();
        dash.selections.nations = vec!["Czechia".to_string(), "Norway".to_string()];
        dash.handle(DashboardEvent::NationsChanged).unwrap();
        assert_eq!(dash.view.name_options, vec!["Xavier X", "Olaf O"]);
        assert_eq!(dash.view.nation_chart.len(), 2);
    }

    #[test]
    fn test_discipline_change_only_touches_athlete_chart() {
        let mut dash = dashboard();
        dash.selections.discipline = DisciplineBucket::SLIDER_GS;
        dash.handle(DashboardEvent::DisciplineChanged).unwrap();
        assert_eq!(dash.view.athlete_chart.series.len(), 1);
        assert_eq!(dash.view.location_options, vec!["Levi", "Soelden"]);
    }

    #[test]
    fn test_click_then_name_change_clears_click() {
        let mut dash = dashboard();
        dash.selections.clicked_date = Some("12-11-2022".to_string());
        dash.handle(DashboardEvent::PointClicked).unwrap();
        assert_eq!(
            dash.view.athlete_chart.summary.location.as_deref(),
            Some("Levi")
        );

        dash.selections.name = Some("Olaf O".to_string());
        dash.handle(DashboardEvent::NameChanged).unwrap();
        assert_eq!(dash.selections.clicked_date, None);
        assert_eq!(dash.view.athlete_chart.summary.location, None);
        assert_eq!(dash.view.category_options, vec!["European Cup"]);
    }

    #[test]
    fn test_categories_narrow_locations() {
        let mut dash = dashboard();
        dash.selections.categories = vec!["FIS".to_string()];
        dash.handle(DashboardEvent::CategoriesChanged).unwrap();
        assert_eq!(dash.view.location_options, vec!["Soelden"]);
        assert_eq!(dash.view.athlete_chart.series.len(), 1);
    }

    #[test]
    fn test_cleared_name_empties_athlete_chart() {
        let mut dash = dashboard();
        dash.selections.name = None;
        dash.handle(DashboardEvent::NameChanged).unwrap();
        assert!(dash.view.athlete_chart.is_empty());
        assert_eq!(
            dash.view.category_options,
            distinct_strings(dash.dataset().frame(), CATEGORY).unwrap()
        );
    }
}
