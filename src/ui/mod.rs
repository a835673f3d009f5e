//! egui rendering of the application state.

pub mod panels;
pub mod plot;
pub mod tables;
