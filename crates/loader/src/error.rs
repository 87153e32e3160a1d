use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV source not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read CSV source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error on line {line} of {source_name}: {message}")]
    Row {
        source_name: String,
        line: usize,
        message: String,
    },
}
