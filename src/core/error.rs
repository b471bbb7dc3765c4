//! Errors raised by the case store

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the backing file
///
/// A missing case is not an error; lookups report it as `None`.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("data file {path:?} is not a valid case list: {source}")]
    #[diagnostic(
        code(sav::store::data_format),
        help("the file must hold a JSON array of case records with all ten fields")
    )]
    DataFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot access data file {path:?}: {source}")]
    #[diagnostic(
        code(sav::store::io),
        help("check that the directory exists and is writable")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no case ID left to assign in {path:?}: the highest ID is already {}", u64::MAX)]
    #[diagnostic(
        code(sav::store::id_exhausted),
        help("a record holds the largest possible case ID; fix or renumber it by hand")
    )]
    IdExhausted { path: PathBuf },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn data_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::DataFormat {
            path: path.into(),
            source,
        }
    }
}
