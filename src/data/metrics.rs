use super::model::Table;

/// Headline numbers for the overview panel. `None` means undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub avg_bmi: Option<f64>,
    pub avg_rel_grip: Option<f64>,
    pub max_squat_reps: Option<i64>,
}

pub fn summarize(view: &Table) -> Summary {
    Summary {
        count: view.len(),
        avg_bmi: mean(view.iter().filter_map(|r| r.bmi)),
        avg_rel_grip: mean(view.iter().filter_map(|r| r.rel_grip_per_kg)),
        max_squat_reps: max(view.iter().filter_map(|r| r.squat_reps)).map(|v| v.trunc() as i64),
    }
}

/// Arithmetic mean over the present values; `None` when there are none.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::max)
}

/// Render an optional metric, "—" when undefined.
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.decimals$}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn with_squats(reps: &[Option<f64>]) -> Table {
        Table::new(
            reps.iter()
                .enumerate()
                .map(|(i, r)| {
                    let mut rec = Record::named(format!("S{i}"));
                    rec.squat_reps = *r;
                    rec
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_view_is_undefined_not_zero() {
        let s = summarize(&Table::default());
        assert_eq!(s.count, 0);
        assert_eq!(s.avg_bmi, None);
        assert_eq!(s.avg_rel_grip, None);
        assert_eq!(s.max_squat_reps, None);
    }

    #[test]
    fn test_max_skips_missing() {
        let s = summarize(&with_squats(&[Some(5.0), None, Some(8.0)]));
        assert_eq!(s.count, 3);
        assert_eq!(s.max_squat_reps, Some(8));
    }

    #[test]
    fn test_max_truncates() {
        let s = summarize(&with_squats(&[Some(41.9)]));
        assert_eq!(s.max_squat_reps, Some(41));
    }

    #[test]
    fn test_mean_over_present_values() {
        let mut a = Record::named("A");
        a.bmi = Some(20.0);
        a.rel_grip_per_kg = Some(0.5);
        let mut b = Record::named("B");
        b.bmi = Some(24.0);
        let s = summarize(&Table::new(vec![a, b, Record::named("C")]));
        assert_eq!(s.avg_bmi, Some(22.0));
        assert_eq!(s.avg_rel_grip, Some(0.5));
    }

    #[test]
    fn test_field_absent_everywhere_is_undefined() {
        let s = summarize(&with_squats(&[None, None]));
        assert_eq!(s.count, 2);
        assert_eq!(s.max_squat_reps, None);
        assert_eq!(s.avg_bmi, None);
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(22.04), 1), "22.0");
        assert_eq!(format_metric(None, 2), "—");
    }
}
