//! Error types for reading Markdown sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before conversion starts. Conversion itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Couldn't open file or doesn't exist: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
