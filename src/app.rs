use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::{AppState, Section};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovementLabApp {
    pub state: AppState,
}

impl MovementLabApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MovementLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.weak("🔍 Movement Lab — Fitness Intelligence for Young Athletes");
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &mut self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("📊 Movement Lab Fitness Dashboard").size(26.0));
    ui.label(RichText::new("Empowering young athletes with data-driven insights").italics());
    ui.separator();

    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("Could not load the dataset.\n\n{err}"))
                    .color(egui::Color32::RED),
            );
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for section in Section::ALL {
            ui.selectable_value(&mut state.section, section, section.title());
        }
    });
    ui.separator();

    let section = state.section;
    let mut download = false;
    let Some(snap) = &state.snapshot else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match section {
            Section::Overview => {
                ui.heading("Student Fitness Overview");
                tables::metric_cards(ui, &snap.summary);
                ui.add_space(8.0);
                plot::chart(ui, "bmi_histogram", &snap.charts.bmi_histogram);
            }
            Section::StrengthFlexibility => {
                ui.heading("Strength and Flexibility Analysis");
                plot::chart(ui, "flexibility", &snap.charts.flexibility);
                plot::chart(ui, "strength", &snap.charts.strength);
                plot::chart(ui, "relative_strength", &snap.charts.relative_strength);
                ui.heading("Detailed Metrics");
                tables::detail_table(ui, &snap.view);
            }
            Section::Throws => {
                ui.heading("Medicine Ball Overhead Throw Performance");
                plot::chart(ui, "throws", &snap.charts.throws);
                plot::chart(ui, "trials", &snap.charts.trials);
            }
            Section::DataExplorer => {
                ui.heading("Raw Data Explorer");
                tables::explorer_table(ui, &snap.view);
                ui.add_space(8.0);
                download = ui.button("📥 Download Filtered Data as CSV").clicked();
            }
        });

    if download {
        panels::save_file_dialog(state);
    }
}
