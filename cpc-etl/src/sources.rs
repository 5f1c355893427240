//! Raw source file loading
//!
//! Missing or unreadable source files never stop a merge: they are reported
//! and the source contributes no records.

use serde_json::Value;
use std::path::Path;
use tracing::{error, warn};

/// Outcome of reading one source file
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Top-level array of raw records
    Loaded(Vec<Value>),
    /// File does not exist
    Missing,
    /// File exists but is not a JSON array (or could not be read)
    Malformed(String),
}

/// Read and parse a source file
pub fn load_source(path: &Path) -> SourceData {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Source file not found");
            return SourceData::Missing;
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read source file");
            return SourceData::Malformed(e.to_string());
        }
    };

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(records) => SourceData::Loaded(records),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error decoding JSON from source file");
            SourceData::Malformed(e.to_string())
        }
    }
}
