use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn the source file into a usable [`Table`](crate::data::model::Table).
///
/// Fatal for the current render cycle: the dashboard is replaced by the error
/// message and no partial table is ever shown.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
