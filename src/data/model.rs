use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const NAME: &str = "Name";
pub const HEIGHT: &str = "Height_cm";
pub const WEIGHT: &str = "Weight_kg";
pub const BMI: &str = "BMI";
pub const REL_GRIP: &str = "Rel_Grip_perKg";
pub const UB_STRENGTH: &str = "UB_Strength_kg";
pub const SQUAT_REPS: &str = "LB_Squat_1min_reps";
pub const FLEXIBILITY: &str = "Flexibility_cm";
pub const THROW_BEST: &str = "MB_OH_Best_m";
pub const THROW_MEAN: &str = "MB_OH_Mean_m";
pub const THROW_TRIALS: &str = "MB_OH_Trials";
pub const BMI_CATEGORY: &str = "BMI_Category";

/// Source columns in declared order. `BMI_Category` is appended on load.
pub const SOURCE_COLUMNS: [&str; 11] = [
    NAME,
    HEIGHT,
    WEIGHT,
    BMI,
    REL_GRIP,
    UB_STRENGTH,
    SQUAT_REPS,
    FLEXIBILITY,
    THROW_BEST,
    THROW_MEAN,
    THROW_TRIALS,
];

// ---------------------------------------------------------------------------
// BmiCategory – derived once at load time
// ---------------------------------------------------------------------------

/// Four right-closed BMI bands over `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Bucket a BMI value. Anything outside `(0, 100]` (and NaN) has no category.
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if bmi > 0.0 && bmi <= 18.5 {
            Some(BmiCategory::Underweight)
        } else if bmi > 18.5 && bmi <= 25.0 {
            Some(BmiCategory::Normal)
        } else if bmi > 25.0 && bmi <= 30.0 {
            Some(BmiCategory::Overweight)
        } else if bmi > 30.0 && bmi <= 100.0 {
            Some(BmiCategory::Obese)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Missing-value tokens
// ---------------------------------------------------------------------------

/// Cell contents read as "no value", on top of an empty cell.
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_token(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// A numeric cell: empty or a missing token gives `None`, anything else must parse.
fn measure<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let Some(cell) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if is_missing_token(&cell) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid number '{cell}': {e}")))
}

// ---------------------------------------------------------------------------
// Record – one student
// ---------------------------------------------------------------------------

/// One row of the testing sheet. Every measure may be missing.
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Height_cm", default, deserialize_with = "measure")]
    pub height_cm: Option<f64>,
    #[serde(rename = "Weight_kg", default, deserialize_with = "measure")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "BMI", default, deserialize_with = "measure")]
    pub bmi: Option<f64>,
    #[serde(rename = "Rel_Grip_perKg", default, deserialize_with = "measure")]
    pub rel_grip_per_kg: Option<f64>,
    #[serde(rename = "UB_Strength_kg", default, deserialize_with = "measure")]
    pub ub_strength_kg: Option<f64>,
    #[serde(rename = "LB_Squat_1min_reps", default, deserialize_with = "measure")]
    pub squat_reps: Option<f64>,
    #[serde(rename = "Flexibility_cm", default, deserialize_with = "measure")]
    pub flexibility_cm: Option<f64>,
    #[serde(rename = "MB_OH_Best_m", default, deserialize_with = "measure")]
    pub throw_best_m: Option<f64>,
    #[serde(rename = "MB_OH_Mean_m", default, deserialize_with = "measure")]
    pub throw_mean_m: Option<f64>,
    #[serde(rename = "MB_OH_Trials", default, deserialize_with = "measure")]
    pub throw_trials: Option<f64>,
    /// Always recomputed from `bmi`; an incoming column of the same name is ignored.
    #[serde(rename = "BMI_Category", skip_deserializing)]
    pub bmi_category: Option<BmiCategory>,
}

impl Record {
    /// A record with only the identity set.
    pub fn named(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            height_cm: None,
            weight_kg: None,
            bmi: None,
            rel_grip_per_kg: None,
            ub_strength_kg: None,
            squat_reps: None,
            flexibility_cm: None,
            throw_best_m: None,
            throw_mean_m: None,
            throw_trials: None,
            bmi_category: None,
        }
    }

    /// Upper-body strength per kg of body mass.
    pub fn relative_strength(&self) -> Option<f64> {
        let strength = self.ub_strength_kg?;
        let weight = self.weight_kg?;
        (weight > 0.0).then(|| strength / weight)
    }

    /// BMI from height (cm) and weight (kg).
    pub fn computed_bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        (height_m > 0.0).then(|| weight / (height_m * height_m))
    }

    fn measures(&self) -> [Option<f64>; 10] {
        [
            self.height_cm,
            self.weight_kg,
            self.bmi,
            self.rel_grip_per_kg,
            self.ub_strength_kg,
            self.squat_reps,
            self.flexibility_cm,
            self.throw_best_m,
            self.throw_mean_m,
            self.throw_trials,
        ]
    }

    pub(crate) fn measures_mut(&mut self) -> [&mut Option<f64>; 10] {
        [
            &mut self.height_cm,
            &mut self.weight_kg,
            &mut self.bmi,
            &mut self.rel_grip_per_kg,
            &mut self.ub_strength_kg,
            &mut self.squat_reps,
            &mut self.flexibility_cm,
            &mut self.throw_best_m,
            &mut self.throw_mean_m,
            &mut self.throw_trials,
        ]
    }
}

// Floats hashed by bit pattern, enough to fingerprint a view for the export cache.
impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        for m in self.measures() {
            m.map(f64::to_bits).hash(state);
        }
        self.bmi_category.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset, or any filtered view of it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Identities in row order.
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    /// Derived categories that occur at least once, in band order.
    pub fn categories(&self) -> BTreeSet<BmiCategory> {
        self.records.iter().filter_map(|r| r.bmi_category).collect()
    }

    /// Copy of the table ordered by identity (stable for duplicates).
    pub fn sorted_by_name(&self) -> Table {
        let mut records = self.records.clone();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Table { records }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
