//! Request files.
//!
//! A request file replaces the web form: `[patient]` and `[clinical]` tables
//! plus one table per gene tagged with `mode = "markers"` or
//! `mode = "diplotype"`. Genes left out fall back to their default input.

use std::path::Path;

use anyhow::{Context, Result, bail};

use pgx_model::ClassificationRequest;

/// Loads a request from a `.toml` or `.json` file.
pub fn load_request(path: &Path) -> Result<ClassificationRequest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read request {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => parse_toml_request(&contents)
            .with_context(|| format!("parse request {}", path.display())),
        Some("json") => parse_json_request(&contents)
            .with_context(|| format!("parse request {}", path.display())),
        _ => bail!(
            "unsupported request file {} (expected .toml or .json)",
            path.display()
        ),
    }
}

pub fn parse_toml_request(contents: &str) -> Result<ClassificationRequest> {
    Ok(toml::from_str(contents)?)
}

pub fn parse_json_request(contents: &str) -> Result<ClassificationRequest> {
    Ok(serde_json::from_str(contents)?)
}
