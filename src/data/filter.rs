use std::collections::BTreeSet;
use std::fmt;

use super::model::{BmiCategory, Table};

// ---------------------------------------------------------------------------
// Filter parameters chosen in the sidebar
// ---------------------------------------------------------------------------

/// The category selector: either no restriction or one concrete band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(BmiCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: Option<BmiCategory>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}

/// Selected identities plus the category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub names: BTreeSet<String>,
    pub category: CategoryFilter,
}

impl FilterParams {
    /// Everything selected, category "All": the initial sidebar state.
    pub fn select_all(table: &Table) -> Self {
        FilterParams {
            names: table.iter().map(|r| r.name.clone()).collect(),
            category: CategoryFilter::All,
        }
    }

    pub fn toggle_name(&mut self, name: &str) {
        if !self.names.remove(name) {
            self.names.insert(name.to_string());
        }
    }

    /// Drop selections that no longer exist after a reload.
    pub fn retain_present(&mut self, table: &Table) {
        let present: BTreeSet<&str> = table.iter().map(|r| r.name.as_str()).collect();
        self.names.retain(|n| present.contains(n.as_str()));
        if let CategoryFilter::Only(c) = self.category {
            if !table.categories().contains(&c) {
                self.category = CategoryFilter::All;
            }
        }
    }
}

/// Options for the category selector: "All" then every band present in the table.
pub fn category_options(table: &Table) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(table.categories().into_iter().map(CategoryFilter::Only))
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows whose name is selected and whose category passes, in source order.
///
/// An empty name set yields an empty view regardless of the category.
pub fn filter(table: &Table, params: &FilterParams) -> Table {
    let records = table
        .iter()
        .filter(|r| params.names.contains(&r.name) && params.category.matches(r.bmi_category))
        .cloned()
        .collect();
    Table::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use proptest::prelude::*;

    fn student(name: &str, cat: Option<BmiCategory>) -> Record {
        let mut r = Record::named(name);
        r.bmi_category = cat;
        r
    }

    fn table() -> Table {
        Table::new(vec![
            student("Zoe", Some(BmiCategory::Normal)),
            student("Amir", Some(BmiCategory::Obese)),
            student("Lena", Some(BmiCategory::Normal)),
            student("Omar", None),
        ])
    }

    #[test]
    fn test_select_all_returns_full_table_in_order() {
        let t = table();
        let view = filter(&t, &FilterParams::select_all(&t));
        assert_eq!(view, t);
    }

    #[test]
    fn test_empty_selection_is_empty_for_every_category() {
        let t = table();
        for category in category_options(&t) {
            let params = FilterParams {
                names: BTreeSet::new(),
                category,
            };
            assert!(filter(&t, &params).is_empty());
        }
    }

    #[test]
    fn test_category_restricts_rows() {
        let t = table();
        let params = FilterParams {
            category: CategoryFilter::Only(BmiCategory::Normal),
            ..FilterParams::select_all(&t)
        };
        assert_eq!(filter(&t, &params).names(), vec!["Zoe", "Lena"]);
    }

    #[test]
    fn test_uncategorised_rows_only_match_all() {
        let t = table();
        let mut params = FilterParams::select_all(&t);
        params.names = ["Omar".to_string()].into();
        assert_eq!(filter(&t, &params).len(), 1);
        params.category = CategoryFilter::Only(BmiCategory::Normal);
        assert!(filter(&t, &params).is_empty());
    }

    #[test]
    fn test_category_options() {
        let opts = category_options(&table());
        assert_eq!(
            opts,
            vec![
                CategoryFilter::All,
                CategoryFilter::Only(BmiCategory::Normal),
                CategoryFilter::Only(BmiCategory::Obese),
            ]
        );
        assert_eq!(opts[0].to_string(), "All");
    }

    #[test]
    fn test_toggle_and_retain() {
        let t = table();
        let mut params = FilterParams::select_all(&t);
        params.toggle_name("Zoe");
        assert!(!params.names.contains("Zoe"));
        params.toggle_name("Zoe");
        assert!(params.names.contains("Zoe"));

        params.category = CategoryFilter::Only(BmiCategory::Obese);
        let smaller = Table::new(vec![student("Zoe", Some(BmiCategory::Normal))]);
        params.retain_present(&smaller);
        assert_eq!(params.names.len(), 1);
        assert_eq!(params.category, CategoryFilter::All);
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent_subset(mask in proptest::collection::vec(any::<bool>(), 4), cat in 0usize..5) {
            let t = table();
            let names = t
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(r, _)| r.name.clone())
                .collect();
            let category = match cat {
                0 => CategoryFilter::All,
                i => CategoryFilter::Only(BmiCategory::ALL[i - 1]),
            };
            let params = FilterParams { names, category };
            let once = filter(&t, &params);
            let twice = filter(&once, &params);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.iter().all(|r| t.records.contains(r)));
        }
    }
}
