//! FIS Points Explorer - Ski Racing Results Dashboard
//!
//! Loads every results CSV from a directory and explores FIS points by athlete,
//! nation, discipline, category and location.

mod charts;
mod dashboard;
mod data;
mod gui;
mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard::{Dashboard, Selections};
use data::{AthleteFilter, Dataset, DatasetLoader, DisciplineBucket};
use eframe::egui;
use gui::DashboardApp;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_NATION: &str = "Czechia";
const DEFAULT_NAME: &str = "Tulach Jaroslav";

#[derive(Parser)]
#[command(name = "fis-dashboard")]
#[command(about = "Explore ski racing results (FIS points)", long_about = None)]
struct Cli {
    /// Directory holding the results CSV files
    #[arg(long, env = "FIS_DATA_DIR", default_value = "AthletesCSV")]
    data_dir: PathBuf,

    /// Initially selected nations in the dashboard window
    #[arg(long = "nation", default_value = DEFAULT_NATION)]
    nations: Vec<String>,

    /// Initially selected athlete in the dashboard window
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dashboard window (default)
    Gui,

    /// Print the single-athlete chart data as JSON
    Athlete {
        #[arg(long)]
        name: String,

        /// Discipline slider value: 0 = SL, 5 = ALL, 10 = GS
        #[arg(long, default_value_t = DisciplineBucket::SLIDER_ALL)]
        discipline: i64,

        #[arg(long = "category")]
        categories: Vec<String>,

        #[arg(long)]
        location: Option<String>,

        /// Date of a clicked point (DD-MM-YYYY)
        #[arg(long)]
        clicked_date: Option<String>,
    },

    /// Print the per-nation average chart data as JSON
    Nations {
        #[arg(long = "nation", required = true)]
        nations: Vec<String>,

        /// Use this athlete's race dates
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the dropdown options for the given selections as JSON
    Options {
        #[arg(long = "nation")]
        nations: Vec<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "category")]
        categories: Vec<String>,
    },
}

#[derive(Serialize)]
struct DropdownOptions {
    names: Vec<String>,
    categories: Vec<String>,
    locations: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let dataset = DatasetLoader::new(&cli.data_dir)
        .load()
        .with_context(|| format!("Failed to load results from {}", cli.data_dir.display()))?;

    match cli.command {
        None | Some(Commands::Gui) => run_gui(dataset, cli.nations, cli.name),
        Some(Commands::Athlete {
            name,
            discipline,
            categories,
            location,
            clicked_date,
        }) => {
            let filter = AthleteFilter {
                name: Some(name),
                location,
                discipline: DisciplineBucket::from_slider(discipline),
                categories,
            };
            let chart = charts::build_athlete_chart(&dataset, &filter, clicked_date.as_deref())?;
            print_json(&chart)
        }
        Some(Commands::Nations { nations, name }) => {
            let chart = charts::build_nation_chart(&dataset, &nations, name.as_deref())?;
            print_json(&chart)
        }
        Some(Commands::Options {
            nations,
            name,
            categories,
        }) => {
            let names: Vec<String> = name.iter().cloned().collect();
            let options = DropdownOptions {
                names: data::name_options(&dataset, &nations)?,
                categories: data::category_options(&dataset, &names)?,
                locations: data::location_options(&dataset, name.as_deref(), &categories)?,
            };
            print_json(&options)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_gui(dataset: Dataset, nations: Vec<String>, name: String) -> Result<()> {
    let name = Some(name).filter(|n| !n.is_empty());
    let dashboard = Dashboard::new(Arc::new(dataset), Selections::new(nations, name))
        .context("Failed to build initial dashboard view")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("FIS Points Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FIS Points Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_flags_without_subcommand() {
        let cli = Cli::try_parse_from([
            "fis-dashboard",
            "--nation",
            "Norway",
            "--nation",
            "Austria",
            "--name",
            "Olaf O",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.nations, vec!["Norway", "Austria"]);
        assert_eq!(cli.name, "Olaf O");
    }

    #[test]
    fn test_gui_defaults() {
        let cli = Cli::try_parse_from(["fis-dashboard", "gui"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Gui)));
        assert_eq!(cli.nations, vec![DEFAULT_NATION]);
        assert_eq!(cli.name, DEFAULT_NAME);
    }

    #[test]
    fn test_subcommand_keeps_its_own_name() {
        let cli = Cli::try_parse_from(["fis-dashboard", "athlete", "--name", "Olaf O"]).unwrap();
        match cli.command {
            Some(Commands::Athlete { name, discipline, .. }) => {
                assert_eq!(name, "Olaf O");
                assert_eq!(discipline, DisciplineBucket::SLIDER_ALL);
            }
            _ => panic!("expected athlete subcommand"),
        }
    }
}
