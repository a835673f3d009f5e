use std::f32::consts::{PI, TAU};

use eframe::egui::{self, Align2, Color32, FontId, RichText, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::charts::{Axis, BarDatum, ChartBody, ChartSpec, DotSeries, HistogramBin, Slice};

// ---------------------------------------------------------------------------
// ChartSpec renderer
// ---------------------------------------------------------------------------

/// Draw a chart description: title, then the plot or a placeholder.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec) {
    ui.label(RichText::new(&spec.title).strong().size(16.0));

    match &spec.body {
        ChartBody::Empty => placeholder(ui, spec.height),
        ChartBody::Histogram { bins, color } => histogram(ui, id, spec, bins, (*color).into()),
        ChartBody::Bars { bars, .. } => bars_chart(ui, id, spec, bars),
        ChartBody::Dots { series } => dots(ui, id, spec, series),
        ChartBody::Donut { hole, slices } => donut(ui, spec.height, *hole, slices),
    }
    ui.add_space(12.0);
}

fn placeholder(ui: &mut Ui, height: f32) {
    let height = height.min(120.0);
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("No data for the current filters");
        });
    });
}

macro_rules! base_plot {
    ($id:expr, $spec:expr) => {
        Plot::new($id.to_owned())
            .height($spec.height)
            .x_axis_label($spec.x_axis.title.clone())
            .y_axis_label($spec.y_axis.title.clone())
            .allow_scroll(false)
            .allow_drag(true)
            .allow_zoom(true)
            .allow_boxed_zoom(true)
    };
}

/// Tick labels for a categorical axis: only integer positions get a label.
fn category_formatter(axis: &Axis) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    let categories = axis.categories.clone();
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        categories.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn decimals_formatter(decimals: usize) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| format!("{:.decimals$}", mark.value)
}

fn histogram(ui: &mut Ui, id: &str, spec: &ChartSpec, bins: &[HistogramBin], color: Color32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .fill(color)
                .name(format!("{:.1} – {:.1}", b.start, b.end))
        })
        .collect();

    base_plot!(id, spec).show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(color).name("Count"));
    });
}

fn bars_chart(ui: &mut Ui, id: &str, spec: &ChartSpec, data: &[BarDatum]) {
    let max = data.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let label_offset = max * 0.02;

    let mut plot = base_plot!(id, spec).x_axis_formatter(category_formatter(&spec.x_axis));
    if let Some(decimals) = spec.y_axis.tick_decimals {
        plot = plot.y_axis_formatter(decimals_formatter(decimals));
    }

    let positioned: Vec<(f64, &BarDatum)> = data.iter().map(|b| (b.slot as f64, b)).collect();

    plot.show(ui, |plot_ui| {
        let bars: Vec<Bar> = positioned
            .iter()
            .map(|(x, b)| {
                Bar::new(*x, b.value)
                    .width(0.7)
                    .fill(b.color)
                    .name(&b.category)
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(bars));

        for (x, b) in &positioned {
            let anchor = if b.value >= 0.0 {
                Align2::CENTER_BOTTOM
            } else {
                Align2::CENTER_TOP
            };
            let y = b.value + label_offset.copysign(b.value);
            plot_ui.text(
                Text::new(PlotPoint::new(*x, y), RichText::new(&b.label).size(11.0))
                    .anchor(anchor),
            );
        }
    });
}

fn dots(ui: &mut Ui, id: &str, spec: &ChartSpec, series: &[DotSeries]) {
    base_plot!(id, spec)
        .legend(Legend::default())
        .y_axis_formatter(category_formatter(&spec.y_axis))
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s
                    .points
                    .iter()
                    .map(|p| [p.value, p.slot as f64])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(s.marker_size / 2.0)
                        .color(s.color)
                        .name(&s.name),
                );
            }
        });
}

fn donut(ui: &mut Ui, height: f32, hole: f32, slices: &[Slice]) {
    ui.horizontal(|ui: &mut Ui| {
        let radius = height / 2.0 - 10.0;
        let (rect, _response) =
            ui.allocate_exact_size(egui::vec2(radius * 2.0, radius * 2.0), egui::Sense::hover());
        let center = rect.center();
        let painter = ui.painter();

        let mut start_angle = -PI / 2.0;
        for slice in slices {
            let sweep = slice.fraction as f32 * TAU;
            if sweep < 0.001 {
                continue;
            }
            let color: Color32 = slice.color.into();
            let n_points = ((sweep / (PI / 32.0)).ceil() as usize).max(3);

            // One convex wedge per step keeps every polygon convex.
            for j in 0..n_points {
                let a0 = start_angle + (j as f32 / n_points as f32) * sweep;
                let a1 = start_angle + ((j + 1) as f32 / n_points as f32) * sweep;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + egui::vec2(a0.cos(), a0.sin()) * radius,
                        center + egui::vec2(a1.cos(), a1.sin()) * radius,
                    ],
                    color,
                    Stroke::NONE,
                ));
            }

            let mid = start_angle + sweep / 2.0;
            let label_pos = center + egui::vec2(mid.cos(), mid.sin()) * radius * (1.0 + hole) / 2.0;
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.fraction * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
            start_angle += sweep;
        }

        painter.add(Shape::circle_filled(
            center,
            radius * hole,
            ui.visuals().extreme_bg_color,
        ));

        // Legend
        ui.vertical(|ui: &mut Ui| {
            for slice in slices {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(Color32::from(slice.color)));
                    ui.label(format!("{}  ({})", slice.label, slice.count));
                });
            }
        });
    });
}
