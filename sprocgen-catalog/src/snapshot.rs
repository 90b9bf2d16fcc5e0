//! Catalog snapshots: dump a probed catalog to JSON and replay it later.
//!
//! A snapshot decouples generation from server access: probe once with a
//! live connection, commit the JSON, and regenerate offline from it.

use std::path::Path;

use crate::{descriptor::ProcedureSignature, error::CatalogError};

/// Read a catalog snapshot from a JSON file.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<ProcedureSignature>, CatalogError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::SnapshotRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::SnapshotFormat {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a catalog snapshot as pretty-printed JSON.
pub fn write(path: impl AsRef<Path>, signatures: &[ProcedureSignature]) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let json =
        serde_json::to_string_pretty(signatures).map_err(|e| CatalogError::SnapshotFormat {
            path: path.to_path_buf(),
            source: e,
        })?;
    std::fs::write(path, json).map_err(|e| CatalogError::SnapshotWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
