//! Catalog serialization and atomic write

use cpc_common::{Project, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render projects as a pretty-printed JSON array (2-space indent, UTF-8)
pub fn render_catalog(projects: &[Project]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(projects)?;
    json.push('\n');
    Ok(json)
}

/// Write the catalog via a temp file in the same directory, then rename
pub fn write_catalog(projects: &[Project], output: &Path) -> Result<()> {
    let json = render_catalog(projects)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(output);
    debug!(temp = %temp_path.display(), "Writing catalog to temp file");
    if let Err(e) = std::fs::write(&temp_path, json.as_bytes()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&temp_path, output) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path_for(output: &Path) -> PathBuf {
    let mut name = output.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    output.with_file_name(name)
}
