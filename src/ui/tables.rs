use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::metrics::{format_metric, Summary};
use crate::data::model::{self, Record, Table};

// ---------------------------------------------------------------------------
// Overview metric cards
// ---------------------------------------------------------------------------

pub fn metric_cards(ui: &mut Ui, summary: &Summary) {
    let cards = [
        ("Total Students", summary.count.to_string()),
        ("Avg BMI", format_metric(summary.avg_bmi, 1)),
        ("Avg Relative Grip", format_metric(summary.avg_rel_grip, 2)),
        (
            "Max Squat (reps)",
            summary
                .max_squat_reps
                .map_or_else(|| "—".to_string(), |v| v.to_string()),
        ),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).weak());
                ui.label(RichText::new(value).size(28.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Tabular views
// ---------------------------------------------------------------------------

/// A displayed column: header, value accessor, fixed decimals.
struct DisplayColumn {
    header: &'static str,
    value: fn(&Record) -> Option<f64>,
    decimals: usize,
}

const DETAIL_COLUMNS: [DisplayColumn; 4] = [
    DisplayColumn {
        header: model::FLEXIBILITY,
        value: |r| r.flexibility_cm,
        decimals: 1,
    },
    DisplayColumn {
        header: model::UB_STRENGTH,
        value: |r| r.ub_strength_kg,
        decimals: 1,
    },
    DisplayColumn {
        header: model::WEIGHT,
        value: |r| r.weight_kg,
        decimals: 1,
    },
    DisplayColumn {
        header: "Rel_Strength_perKg",
        value: Record::relative_strength,
        decimals: 3,
    },
];

const EXPLORER_COLUMNS: [DisplayColumn; 10] = [
    DisplayColumn {
        header: model::HEIGHT,
        value: |r| r.height_cm,
        decimals: 1,
    },
    DisplayColumn {
        header: model::WEIGHT,
        value: |r| r.weight_kg,
        decimals: 1,
    },
    DisplayColumn {
        header: model::BMI,
        value: |r| r.bmi,
        decimals: 2,
    },
    DisplayColumn {
        header: model::REL_GRIP,
        value: |r| r.rel_grip_per_kg,
        decimals: 3,
    },
    DisplayColumn {
        header: model::UB_STRENGTH,
        value: |r| r.ub_strength_kg,
        decimals: 1,
    },
    DisplayColumn {
        header: model::SQUAT_REPS,
        value: |r| r.squat_reps,
        decimals: 0,
    },
    DisplayColumn {
        header: model::FLEXIBILITY,
        value: |r| r.flexibility_cm,
        decimals: 1,
    },
    DisplayColumn {
        header: model::THROW_BEST,
        value: |r| r.throw_best_m,
        decimals: 2,
    },
    DisplayColumn {
        header: model::THROW_MEAN,
        value: |r| r.throw_mean_m,
        decimals: 2,
    },
    DisplayColumn {
        header: model::THROW_TRIALS,
        value: |r| r.throw_trials,
        decimals: 0,
    },
];

/// Name, flexibility and strength figures, sorted by name.
pub fn detail_table(ui: &mut Ui, view: &Table) {
    record_table(ui, &view.sorted_by_name(), &DETAIL_COLUMNS, false);
}

/// Every column of the filtered view, including the derived category.
pub fn explorer_table(ui: &mut Ui, view: &Table) {
    record_table(ui, view, &EXPLORER_COLUMNS, true);
}

fn record_table(ui: &mut Ui, view: &Table, columns: &[DisplayColumn], with_category: bool) {
    if view.is_empty() {
        ui.weak("No students match the current filters.");
        return;
    }

    let extra = usize::from(with_category);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(70.0), columns.len() + extra)
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(model::NAME);
            });
            for c in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(c.header);
                });
            }
            if with_category {
                header.col(|ui: &mut Ui| {
                    ui.strong(model::BMI_CATEGORY);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, view.len(), |mut row| {
                let record = &view.records[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&record.name);
                });
                for c in columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(format_metric((c.value)(record), c.decimals));
                    });
                }
                if with_category {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.bmi_category.map_or("—", |c| c.label()));
                    });
                }
            });
        });
}
