use std::cmp::Ordering;

use super::{
    Axis, BarDatum, ChartBody, ChartSpec, DotPoint, DotSeries, HistogramBin, Slice, ValueFormat,
    DEFAULT_HEIGHT,
};
use crate::color::{self, SequentialScale};
use crate::data::model::{Record, Table};

pub const HISTOGRAM_BINS: usize = 10;
const BAR_TICK_ANGLE: f32 = 45.0;
const THROW_ROW_HEIGHT: f32 = 30.0;
const THROW_MARKER_SIZE: f32 = 10.0;
const DONUT_HOLE: f32 = 0.4;

// ---------------------------------------------------------------------------
// Overview: BMI histogram
// ---------------------------------------------------------------------------

pub fn bmi_histogram(view: &Table) -> ChartSpec {
    let values: Vec<f64> = view.iter().filter_map(|r| r.bmi).collect();
    let body = match histogram_bins(&values, HISTOGRAM_BINS) {
        bins if bins.is_empty() => ChartBody::Empty,
        bins => ChartBody::Histogram {
            bins,
            color: color::COBALT,
        },
    };
    ChartSpec {
        title: "BMI Distribution".into(),
        x_axis: Axis::numeric("BMI"),
        y_axis: Axis::numeric("Count"),
        height: DEFAULT_HEIGHT,
        body,
    }
}

/// `n` equal-width bins spanning `[min, max]`; the last bin is closed.
///
/// When every value is equal the bins span a unit interval centred on it.
pub fn histogram_bins(values: &[f64], n: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let (start, span) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, 1.0)
    } else {
        (min, max - min)
    };
    let width = span / n as f64;

    let mut counts = vec![0usize; n];
    for v in values {
        let idx = (((v - start) / width).floor() as usize).min(n - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + i as f64 * width,
            end: start + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Strength & flexibility: per-student bars
// ---------------------------------------------------------------------------

struct BarIntent {
    title: &'static str,
    y_title: &'static str,
    scale: SequentialScale,
    format: ValueFormat,
    tick_decimals: Option<usize>,
    value: fn(&Record) -> Option<f64>,
}

pub fn flexibility_bars(view: &Table) -> ChartSpec {
    bar_chart(
        view,
        &BarIntent {
            title: "Flexibility (cm)",
            y_title: "Flexibility (cm)",
            scale: SequentialScale::Blues,
            format: ValueFormat::new(1, Some("cm")),
            tick_decimals: None,
            value: |r| r.flexibility_cm,
        },
    )
}

pub fn strength_bars(view: &Table) -> ChartSpec {
    bar_chart(
        view,
        &BarIntent {
            title: "Absolute Upper Body Strength (kg)",
            y_title: "Strength (kg)",
            scale: SequentialScale::Reds,
            format: ValueFormat::new(1, Some("kg")),
            tick_decimals: None,
            value: |r| r.ub_strength_kg,
        },
    )
}

pub fn relative_strength_bars(view: &Table) -> ChartSpec {
    bar_chart(
        view,
        &BarIntent {
            title: "Relative Strength (UB Strength / Body Weight)",
            y_title: "Relative Strength (kg/kg)",
            scale: SequentialScale::Greens,
            format: ValueFormat::new(3, None),
            tick_decimals: Some(3),
            value: Record::relative_strength,
        },
    )
}

fn bar_chart(view: &Table, intent: &BarIntent) -> ChartSpec {
    let sorted = view.sorted_by_name();
    let present: Vec<(usize, &str, f64)> = sorted
        .iter()
        .enumerate()
        .filter_map(|(slot, r)| (intent.value)(r).map(|v| (slot, r.name.as_str(), v)))
        .collect();

    let mut x_axis = Axis::categorical("Name", sorted.names());
    x_axis.tick_angle = BAR_TICK_ANGLE;
    let mut y_axis = Axis::numeric(intent.y_title);
    y_axis.tick_decimals = intent.tick_decimals;

    let body = match (
        present.iter().map(|(_, _, v)| *v).reduce(f64::min),
        present.iter().map(|(_, _, v)| *v).reduce(f64::max),
    ) {
        (Some(min), Some(max)) => ChartBody::Bars {
            bars: present
                .iter()
                .map(|&(slot, name, value)| BarDatum {
                    slot,
                    category: name.to_string(),
                    value,
                    color: intent.scale.for_value(value, min, max),
                    label: intent.format.format(value),
                })
                .collect(),
            scale: intent.scale,
        },
        _ => ChartBody::Empty,
    };

    ChartSpec {
        title: intent.title.into(),
        x_axis,
        y_axis,
        height: DEFAULT_HEIGHT,
        body,
    }
}

// ---------------------------------------------------------------------------
// Throw performance: best vs mean per student
// ---------------------------------------------------------------------------

/// Height that leaves room for one label per student.
pub fn throw_chart_height(rows: usize) -> f32 {
    (rows as f32 * THROW_ROW_HEIGHT).max(DEFAULT_HEIGHT)
}

pub fn throw_comparison(view: &Table) -> ChartSpec {
    // Ascending by best + mean so the strongest throwers end up on top.
    let mut rows: Vec<&Record> = view.iter().collect();
    let total = |r: &Record| r.throw_best_m.unwrap_or(0.0) + r.throw_mean_m.unwrap_or(0.0);
    rows.sort_by(|a, b| {
        total(*a)
            .partial_cmp(&total(*b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let series = |name: &str, color, value: fn(&Record) -> Option<f64>| DotSeries {
        name: name.into(),
        color,
        marker_size: THROW_MARKER_SIZE,
        points: rows
            .iter()
            .enumerate()
            .filter_map(|(slot, r)| {
                value(r).map(|v| DotPoint {
                    slot,
                    category: r.name.clone(),
                    value: v,
                })
            })
            .collect(),
    };
    let best = series("Best Throw", color::BLUE, |r| r.throw_best_m);
    let mean = series("Mean Throw", color::LIGHT_BLUE, |r| r.throw_mean_m);

    let body = if best.points.is_empty() && mean.points.is_empty() {
        ChartBody::Empty
    } else {
        ChartBody::Dots {
            series: vec![best, mean],
        }
    };

    ChartSpec {
        title: "Best vs Mean Overhead Throw (m)".into(),
        x_axis: Axis::numeric("Distance (m)"),
        y_axis: Axis::categorical("Student", rows.iter().map(|r| r.name.clone()).collect()),
        height: throw_chart_height(view.len()),
        body,
    }
}

// ---------------------------------------------------------------------------
// Trial counts: donut of distinct values
// ---------------------------------------------------------------------------

pub fn trial_composition(view: &Table) -> ChartSpec {
    let mut values: Vec<f64> = view.iter().filter_map(|r| r.throw_trials).collect();
    values.sort_by(f64::total_cmp);

    let mut groups: Vec<(f64, usize)> = Vec::new();
    for v in values {
        match groups.last_mut() {
            Some((last, n)) if *last == v => *n += 1,
            _ => groups.push((v, 1)),
        }
    }
    // Largest share first, ties by value.
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.total_cmp(&b.0)));

    let total: usize = groups.iter().map(|(_, n)| n).sum();
    let slices: Vec<Slice> = groups
        .into_iter()
        .enumerate()
        .map(|(i, (value, count))| Slice {
            label: trial_label(value),
            count,
            fraction: count as f64 / total as f64,
            color: color::DISCRETE[i % color::DISCRETE.len()],
        })
        .collect();

    let body = if slices.is_empty() {
        ChartBody::Empty
    } else {
        ChartBody::Donut {
            hole: DONUT_HOLE,
            slices,
        }
    };

    ChartSpec {
        title: "Number of Trials Conducted".into(),
        x_axis: Axis::default(),
        y_axis: Axis::default(),
        height: DEFAULT_HEIGHT,
        body,
    }
}

fn trial_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn student(name: &str, f: impl FnOnce(&mut Record)) -> Record {
        let mut r = Record::named(name);
        f(&mut r);
        r
    }

    fn view() -> Table {
        Table::new(vec![
            student("Zoe", |r| {
                r.bmi = Some(17.0);
                r.flexibility_cm = Some(30.04);
                r.ub_strength_kg = Some(20.0);
                r.weight_kg = Some(40.0);
                r.throw_best_m = Some(5.0);
                r.throw_mean_m = Some(4.5);
                r.throw_trials = Some(3.0);
            }),
            student("Amir", |r| {
                r.bmi = Some(27.0);
                r.flexibility_cm = Some(10.0);
                r.ub_strength_kg = Some(36.0);
                r.weight_kg = Some(72.0);
                r.throw_best_m = Some(3.0);
                r.throw_mean_m = Some(2.0);
                r.throw_trials = Some(2.0);
            }),
            student("Lena", |r| {
                r.bmi = Some(22.0);
                r.throw_best_m = Some(4.0);
                r.throw_trials = Some(3.0);
            }),
        ])
    }

    #[test]
    fn test_every_builder_handles_empty_view() {
        let empty = Table::default();
        for spec in [
            bmi_histogram(&empty),
            flexibility_bars(&empty),
            strength_bars(&empty),
            relative_strength_bars(&empty),
            throw_comparison(&empty),
            trial_composition(&empty),
        ] {
            assert!(spec.is_empty(), "{} should be empty", spec.title);
            assert!(!spec.title.is_empty());
        }
    }

    #[test]
    fn test_histogram_has_ten_bins_covering_all_values() {
        let spec = bmi_histogram(&view());
        let ChartBody::Histogram { bins, color } = spec.body else {
            panic!("expected histogram");
        };
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].start, 17.0);
        assert!((bins[9].end - 27.0).abs() < 1e-9);
        assert_eq!(bins[9].count, 1);
        assert_eq!(color, Rgb::from_hex(0x0047AB));
    }

    #[test]
    fn test_histogram_single_value() {
        let bins = histogram_bins(&[22.0, 22.0], 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(bins[0].start < 22.0 && bins[9].end > 22.0);
    }

    #[test]
    fn test_bars_sorted_by_name_with_labels() {
        let spec = flexibility_bars(&view());
        assert_eq!(spec.x_axis.categories, vec!["Amir", "Lena", "Zoe"]);
        assert_eq!(spec.x_axis.tick_angle, 45.0);
        let ChartBody::Bars { bars, scale } = spec.body else {
            panic!("expected bars");
        };
        assert_eq!(scale, SequentialScale::Blues);
        let names: Vec<_> = bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Amir", "Zoe"]);
        assert_eq!(bars[0].label, "10.0 cm");
        assert_eq!(bars[1].label, "30.0 cm");
        assert_eq!(bars[0].color, SequentialScale::Blues.at(0.0));
        assert_eq!(bars[1].color, SequentialScale::Blues.at(1.0));
    }

    #[test]
    fn test_relative_strength_three_decimals() {
        let spec = relative_strength_bars(&view());
        assert_eq!(spec.y_axis.tick_decimals, Some(3));
        let ChartBody::Bars { bars, .. } = spec.body else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].label, "0.500");
        assert_eq!(bars[0].category, "Amir");
    }

    #[test]
    fn test_strength_kg_label() {
        let ChartBody::Bars { bars, scale } = strength_bars(&view()).body else {
            panic!("expected bars");
        };
        assert_eq!(scale, SequentialScale::Reds);
        assert_eq!(bars[1].label, "20.0 kg");
    }

    #[test]
    fn test_bars_without_values_are_empty() {
        let t = Table::new(vec![Record::named("A")]);
        assert!(flexibility_bars(&t).is_empty());
    }

    #[test]
    fn test_throw_order_and_height() {
        let spec = throw_comparison(&view());
        assert_eq!(spec.y_axis.categories, vec!["Lena", "Amir", "Zoe"]);
        assert_eq!(spec.height, 400.0);
        let ChartBody::Dots { series } = spec.body else {
            panic!("expected dots");
        };
        assert_eq!(series[0].name, "Best Throw");
        assert_eq!(series[0].points.len(), 3);
        assert_eq!(series[1].points.len(), 2);
        assert_eq!(series[0].marker_size, 10.0);
    }

    #[test]
    fn test_throw_height_grows_with_rows() {
        assert_eq!(throw_chart_height(0), 400.0);
        assert_eq!(throw_chart_height(13), 400.0);
        assert_eq!(throw_chart_height(20), 600.0);
    }

    #[test]
    fn test_trial_donut() {
        let spec = trial_composition(&view());
        let ChartBody::Donut { hole, slices } = spec.body else {
            panic!("expected donut");
        };
        assert_eq!(hole, 0.4);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "3");
        assert_eq!(slices[0].count, 2);
        assert!((slices[0].fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(slices[1].label, "2");
        assert_ne!(slices[0].color, slices[1].color);
    }

    #[test]
    fn test_spec_serialises_as_plain_value() {
        let json = serde_json::to_value(trial_composition(&view())).unwrap();
        assert_eq!(json["body"]["kind"], "donut");
        assert_eq!(json["title"], "Number of Trials Conducted");
        let empty = serde_json::to_value(bmi_histogram(&Table::default())).unwrap();
        assert_eq!(empty["body"]["kind"], "empty");
    }

    #[test]
    fn test_duplicate_names_get_their_own_slots() {
        let t = Table::new(vec![
            student("Sam", |r| {
                r.flexibility_cm = Some(12.0);
                r.throw_best_m = Some(3.0);
            }),
            student("Sam", |r| {
                r.flexibility_cm = Some(20.0);
                r.throw_best_m = Some(5.0);
            }),
        ]);

        let bars = flexibility_bars(&t);
        assert_eq!(bars.x_axis.categories, vec!["Sam", "Sam"]);
        let ChartBody::Bars { bars, .. } = bars.body else {
            panic!("expected bars");
        };
        let slots: Vec<_> = bars.iter().map(|b| b.slot).collect();
        assert_eq!(slots, vec![0, 1]);

        let ChartBody::Dots { series } = throw_comparison(&t).body else {
            panic!("expected dots");
        };
        let slots: Vec<_> = series[0].points.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn test_bar_slots_skip_missing_values() {
        let ChartBody::Bars { bars, .. } = flexibility_bars(&view()).body else {
            panic!("expected bars");
        };
        // Lena (slot 1) has no flexibility value.
        let slots: Vec<_> = bars.iter().map(|b| b.slot).collect();
        assert_eq!(slots, vec![0, 2]);
    }
}
