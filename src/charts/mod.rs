//! Declarative chart descriptions.
//!
//! Builders turn a filtered view into a [`ChartSpec`]: a plain value holding
//! axes, series, labels and colours. Nothing here knows about egui; the
//! renderer in `ui::plot` draws whatever it is handed.
//!
//! ```text
//!   Table (view) ──► builder ──► ChartSpec ──► ui::plot (egui_plot / painter)
//! ```

pub mod builder;

use serde::Serialize;

use crate::color::{Rgb, SequentialScale};

pub const DEFAULT_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub height: f32,
    pub body: ChartBody,
}

impl ChartSpec {
    /// Whether there is nothing to draw (the renderer shows a placeholder).
    pub fn is_empty(&self) -> bool {
        matches!(self.body, ChartBody::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    pub title: String,
    /// Tick label rotation in degrees.
    pub tick_angle: f32,
    /// Fixed decimals for numeric tick labels; renderer default when `None`.
    pub tick_decimals: Option<usize>,
    /// Ordered category labels for a categorical axis, empty for a numeric one.
    pub categories: Vec<String>,
}

impl Axis {
    pub fn numeric(title: impl Into<String>) -> Self {
        Axis {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn categorical(title: impl Into<String>, categories: Vec<String>) -> Self {
        Axis {
            title: title.into(),
            categories,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Empty,
    Histogram {
        bins: Vec<HistogramBin>,
        color: Rgb,
    },
    Bars {
        bars: Vec<BarDatum>,
        scale: SequentialScale,
    },
    Dots {
        series: Vec<DotSeries>,
    },
    Donut {
        /// Radius of the cut-out as a fraction of the outer radius.
        hole: f32,
        slices: Vec<Slice>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    /// Index into the x axis categories; names may repeat, slots do not.
    pub slot: usize,
    pub category: String,
    pub value: f64,
    pub color: Rgb,
    /// Text drawn just above the bar.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotSeries {
    pub name: String,
    pub color: Rgb,
    pub marker_size: f32,
    pub points: Vec<DotPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotPoint {
    /// Index into the y axis categories.
    pub slot: usize,
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub color: Rgb,
}

/// Fixed-precision number with an optional unit, e.g. `12.5 cm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    pub decimals: usize,
    pub unit: Option<&'static str>,
}

impl ValueFormat {
    pub const fn new(decimals: usize, unit: Option<&'static str>) -> Self {
        ValueFormat { decimals, unit }
    }

    pub fn format(self, value: f64) -> String {
        let decimals = self.decimals;
        match self.unit {
            Some(unit) => format!("{value:.decimals$} {unit}"),
            None => format!("{value:.decimals$}"),
        }
    }
}
