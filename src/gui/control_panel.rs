//! Control Panel Widget
//! Left side panel with the layout toggle and the cascading filters.

use crate::dashboard::{DashboardEvent, DashboardView, Layout, Selections};
use crate::data::DisciplineBucket;
use egui::{Color32, ComboBox, RichText, ScrollArea};

const ANY_LOCATION: &str = "Any location";

/// Left side control panel. Edits the selections in place and reports what changed.
pub struct ControlPanel {
    pub nations: Vec<String>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            nations: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new(nations: Vec<String>) -> Self {
        Self {
            nations,
            ..Default::default()
        }
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selections: &mut Selections,
        view: &DashboardView,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.add_space(5.0);
        ui.label(RichText::new("Welcome").size(22.0).color(Color32::from_rgb(100, 149, 237)));
        ui.label(RichText::new("to an Athlete dashboard!").size(18.0));
        ui.add_space(5.0);
        ui.label(
            RichText::new(
                "Follow your nation, check on how athletes are performing \
                 and keep up with race results from one simple dashboard.",
            )
            .size(11.0)
            .color(Color32::GRAY),
        );
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Layout Section =====
        ui.horizontal(|ui| {
            if ui
                .selectable_value(&mut selections.layout, Layout::SingleAthlete, "Single Athlete")
                .clicked()
            {
                action = ControlPanelAction::Changed(DashboardEvent::LayoutChanged);
            }
            if ui
                .selectable_value(&mut selections.layout, Layout::Nations, "Nations")
                .clicked()
            {
                action = ControlPanelAction::Changed(DashboardEvent::LayoutChanged);
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Nation Section =====
        ui.label(RichText::new("🏳 Nations").size(14.0).strong());
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("nations")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for nation in &self.nations {
                            let mut checked = selections.nations.contains(nation);
                            if ui.checkbox(&mut checked, nation).changed() {
                                if checked {
                                    selections.nations.push(nation.clone());
                                } else {
                                    selections.nations.retain(|n| n != nation);
                                }
                                action = ControlPanelAction::Changed(DashboardEvent::NationsChanged);
                            }
                        }
                    });
            });

        ui.add_space(10.0);

        let label_width = 80.0;
        let combo_width = 200.0;

        // ===== Athlete =====
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Athlete:"));
            ComboBox::from_id_salt("name")
                .width(combo_width)
                .selected_text(selections.name.clone().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for name in &view.name_options {
                        let selected = selections.name.as_deref() == Some(name.as_str());
                        if ui.selectable_label(selected, name).clicked() && !selected {
                            selections.name = Some(name.clone());
                            action = ControlPanelAction::Changed(DashboardEvent::NameChanged);
                        }
                    }
                });
            if selections.name.is_some() && ui.small_button("✖").clicked() {
                selections.name = None;
                action = ControlPanelAction::Changed(DashboardEvent::NameChanged);
            }
        });

        ui.add_space(10.0);

        // ===== Discipline =====
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Discipline:"));
            let slider = egui::Slider::new(
                &mut selections.discipline,
                DisciplineBucket::SLIDER_SL..=DisciplineBucket::SLIDER_GS,
            )
            .step_by((DisciplineBucket::SLIDER_ALL - DisciplineBucket::SLIDER_SL) as f64)
            .custom_formatter(|v, _| DisciplineBucket::from_slider(v as i64).label().to_string());
            if ui.add(slider).changed() {
                action = ControlPanelAction::Changed(DashboardEvent::DisciplineChanged);
            }
        });

        ui.add_space(10.0);

        // ===== Category =====
        ui.label(RichText::new("🏆 Categories").size(14.0).strong());
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("categories")
                    .max_height(100.0)
                    .show(ui, |ui| {
                        for category in &view.category_options {
                            let mut checked = selections.categories.contains(category);
                            if ui.checkbox(&mut checked, category).changed() {
                                if checked {
                                    selections.categories.push(category.clone());
                                } else {
                                    selections.categories.retain(|c| c != category);
                                }
                                action =
                                    ControlPanelAction::Changed(DashboardEvent::CategoriesChanged);
                            }
                        }
                    });
            });
        if !selections.categories.is_empty() && ui.small_button("Clear All").clicked() {
            selections.categories.clear();
            action = ControlPanelAction::Changed(DashboardEvent::CategoriesChanged);
        }

        ui.add_space(10.0);

        // ===== Location =====
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Location:"));
            ComboBox::from_id_salt("location")
                .width(combo_width)
                .selected_text(selections.location.as_deref().unwrap_or(ANY_LOCATION))
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(selections.location.is_none(), ANY_LOCATION)
                        .clicked()
                        && selections.location.is_some()
                    {
                        selections.location = None;
                        action = ControlPanelAction::Changed(DashboardEvent::LocationChanged);
                    }
                    for location in &view.location_options {
                        let selected = selections.location.as_deref() == Some(location.as_str());
                        if ui.selectable_label(selected, location).clicked() && !selected {
                            selections.location = Some(location.clone());
                            action = ControlPanelAction::Changed(DashboardEvent::LocationChanged);
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    Changed(DashboardEvent),
}
