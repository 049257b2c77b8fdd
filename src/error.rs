//! Errors raised at the input boundary.
//!
//! The extraction builders themselves never fail; they report degraded
//! results through warnings. Only reading and parsing the documents that feed
//! them can error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed sources document: {0}")]
    MalformedSources(#[from] serde_json::Error),

    #[error("Sources document must be an array or an object with a `sources` array")]
    UnexpectedSourcesShape,

    #[error("Source #{index} has an empty sourceId")]
    MissingSourceId { index: usize },
}
