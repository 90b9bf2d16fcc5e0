use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog itself could not be listed; nothing can be generated.
    #[error("unable to enumerate stored procedures")]
    Enumerate(#[source] SourceError),

    #[error("failed to read catalog snapshot '{path}'")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write catalog snapshot '{path}'")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog snapshot '{path}'")]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
