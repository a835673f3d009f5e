use crate::charts::builder;
use crate::charts::ChartSpec;
use crate::data::filter::{filter, FilterParams};
use crate::data::metrics::{summarize, Summary};
use crate::data::model::Table;

/// Every chart shown on the dashboard, one per intent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub bmi_histogram: ChartSpec,
    pub flexibility: ChartSpec,
    pub strength: ChartSpec,
    pub relative_strength: ChartSpec,
    pub throws: ChartSpec,
    pub trials: ChartSpec,
}

impl ChartSet {
    pub fn build(view: &Table) -> Self {
        ChartSet {
            bmi_histogram: builder::bmi_histogram(view),
            flexibility: builder::flexibility_bars(view),
            strength: builder::strength_bars(view),
            relative_strength: builder::relative_strength_bars(view),
            throws: builder::throw_comparison(view),
            trials: builder::trial_composition(view),
        }
    }
}

/// Result of one interaction: `(table, params) → (view, metrics, charts)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub view: Table,
    pub summary: Summary,
    pub charts: ChartSet,
}

impl Snapshot {
    pub fn compute(table: &Table, params: &FilterParams) -> Self {
        let view = filter(table, params);
        log::debug!(
            "Refiltered: {}/{} students selected, category {}, {} rows in view",
            params.names.len(),
            table.len(),
            params.category,
            view.len()
        );
        let summary = summarize(&view);
        let charts = ChartSet::build(&view);
        Snapshot {
            view,
            summary,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::CategoryFilter;
    use crate::data::model::{BmiCategory, Record};

    fn table() -> Table {
        let rows = [("Ava", 17.0, 30.0), ("Ben", 22.0, 35.0), ("Cy", 23.0, 28.0)];
        Table::new(
            rows.iter()
                .map(|&(name, bmi, reps)| {
                    let mut r = Record::named(name);
                    r.bmi = Some(bmi);
                    r.bmi_category = BmiCategory::from_bmi(bmi);
                    r.squat_reps = Some(reps);
                    r
                })
                .collect(),
        )
    }

    #[test]
    fn test_snapshot_for_category() {
        let t = table();
        let params = FilterParams {
            category: CategoryFilter::Only(BmiCategory::Normal),
            ..FilterParams::select_all(&t)
        };
        let snap = Snapshot::compute(&t, &params);
        assert_eq!(snap.summary.count, 2);
        assert_eq!(snap.summary.max_squat_reps, Some(35));
        assert!(!snap.charts.bmi_histogram.is_empty());
    }

    #[test]
    fn test_snapshot_for_empty_selection() {
        let t = table();
        let params = FilterParams::default();
        let snap = Snapshot::compute(&t, &params);
        assert!(snap.view.is_empty());
        assert_eq!(snap.summary, Summary::default());
        assert!(snap.charts.bmi_histogram.is_empty());
        assert!(snap.charts.trials.is_empty());
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let t = table();
        let params = FilterParams::select_all(&t);
        assert_eq!(Snapshot::compute(&t, &params), Snapshot::compute(&t, &params));
    }
}
