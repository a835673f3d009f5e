//! Movement Lab: an egui dashboard over a student fitness-testing sheet.
//!
//! Each interaction runs one pure pass: the cached [`data::model::Table`] and
//! the sidebar's [`data::filter::FilterParams`] go into
//! [`pipeline::Snapshot::compute`], which yields the filtered view, the
//! overview metrics and a declarative [`charts::ChartSpec`] per chart.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod ui;
