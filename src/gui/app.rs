//! FIS Points Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::dashboard::{Dashboard, DashboardEvent};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        let nations = match dashboard.dataset().nations() {
            Ok(nations) => nations,
            Err(e) => {
                log::error!("Failed to list nations: {}", e);
                Vec::new()
            }
        };
        let mut control_panel = ControlPanel::new(nations);
        control_panel.set_status(&format!("Loaded {} results", dashboard.dataset().height()));

        Self {
            dashboard,
            control_panel,
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Recompute the outputs that depend on the changed input
    fn dispatch(&mut self, event: DashboardEvent) {
        match self.dashboard.handle(event) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Loaded {} results", self.dashboard.dataset().height()));
            }
            Err(e) => {
                log::error!("Failed to update dashboard after {:?}: {}", event, e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        &mut self.dashboard.selections,
                        &self.dashboard.view,
                    );

                    match action {
                        ControlPanelAction::Changed(event) => self.dispatch(event),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let layout = self.dashboard.selections.layout;
                if let Some(date) = self.chart_viewer.show(ui, layout, &self.dashboard.view) {
                    self.dashboard.selections.clicked_date = Some(date);
                    self.dispatch(DashboardEvent::PointClicked);
                }
            });
        });
    }
}
