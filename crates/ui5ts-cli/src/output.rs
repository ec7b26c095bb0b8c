//! Writing generated files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;
use ui5ts_generator::{ExportStub, GeneratorOutput, INDEX_FILE};

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// One file per root declaration, plus `index.d.ts`.
pub fn write_definitions(dir: &Path, output: &GeneratorOutput) -> anyhow::Result<()> {
    for file in &output.definitions {
        write_file(&dir.join(&file.file_name), &file.content)?;
    }
    write_file(&dir.join(INDEX_FILE), &output.index)
}

pub fn write_exports(dir: &Path, stubs: &[ExportStub]) -> anyhow::Result<()> {
    for stub in stubs {
        write_file(&dir.join(&stub.path), &stub.content)?;
    }
    Ok(())
}
