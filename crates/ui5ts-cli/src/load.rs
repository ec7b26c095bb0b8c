//! Reading `api.json` documents from disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use ui5ts_generator::ApiDocument;

pub fn read_document(path: &Path) -> anyhow::Result<ApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let document =
        ApiDocument::from_json(&content).with_context(|| format!("parse {}", path.display()))?;
    debug!(
        "{}: library {}, {} symbols",
        path.display(),
        document.library,
        document.symbols.len()
    );
    Ok(document)
}

/// Read every document, in the order given.
pub fn read_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<ApiDocument>> {
    paths.iter().map(|path| read_document(path)).collect()
}
