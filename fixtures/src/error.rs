use crate::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when generating fixtures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{category} record {index}: {source}")]
    Record {
        category: Category,
        index: usize,
        #[source]
        source: amino_codec::Error,
    },
    #[error("failed to build registry: {0}")]
    Registry(#[source] amino_codec::Error),
    #[error("invalid zone offset: {0}s")]
    InvalidZone(i32),
    #[error("failed to render {category}: {source}")]
    Render {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{category} fixtures at {} are stale", .path.display())]
    Stale { category: Category, path: PathBuf },
}
