//! TypeScript declaration generator for UI5 API documentation.
//!
//! This crate turns the symbols of UI5 `api.json` documents into `.d.ts`
//! declarations:
//! - Type strings are parsed into deduplicated [`types::TypeSet`]s
//! - Dotted names are grouped into a forest of [`nodes::DeclarationNode`]s
//! - Methods whose optional parameters precede required ones are expanded
//!   into valid overloads
//! - Overrides are reconciled across each class hierarchy
//!
//! # Example
//!
//! ```ignore
//! use ui5ts_generator::{ApiDocument, Generator, GeneratorConfig};
//!
//! let document = ApiDocument::from_json(&json)?;
//! let output = Generator::new(GeneratorConfig::default()).generate(vec![document])?;
//! for file in &output.definitions {
//!     println!("{}: {} bytes", file.file_name, file.content.len());
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod exports;
pub mod nodes;
pub mod overloads;
pub mod overrides;
pub mod tree;
pub mod types;
pub mod writer;

use tracing::info;

pub use api::{ApiDocument, Symbol, SymbolKind};
pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use exports::ExportStub;
pub use tree::build_forest;

use writer::{DeclWriter, NEWLINE};

/// One `.d.ts` file per root declaration.
#[derive(Debug, Clone)]
pub struct DefinitionFile {
    /// Full name of the root declaration, e.g. `sap`.
    pub full_name: String,
    /// `<full_name>.d.ts`
    pub file_name: String,
    pub content: String,
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    /// Version of the first document that declares one.
    pub version: Option<String>,
    pub definitions: Vec<DefinitionFile>,
    /// Body of `index.d.ts`: one reference per definitions file.
    pub index: String,
    pub exports: Vec<ExportStub>,
}

pub const INDEX_FILE: &str = "index.d.ts";

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate declarations for a set of documents, usually one per library.
    pub fn generate(&self, documents: Vec<ApiDocument>) -> Result<GeneratorOutput> {
        let version = documents.iter().find_map(|d| d.version.clone());

        let mut symbols = Vec::new();
        for document in documents {
            let additions = self.config.additions.get(&document.library);
            let added = additions.map_or(0, Vec::len);
            info!(
                "library {}: {} symbols, {} added",
                document.library,
                document.symbols.len(),
                added
            );
            symbols.extend(document.symbols);
            if let Some(additions) = additions {
                symbols.extend(additions.iter().cloned());
            }
        }

        let exports = exports::export_stubs(&symbols);
        let forest = build_forest(&self.config, &symbols)?;

        let mut definitions: Vec<DefinitionFile> = Vec::with_capacity(forest.len());
        for node in &forest {
            let mut w = DeclWriter::new(self.config.indentation());
            node.render(&mut w);
            let file_name = format!("{}.d.ts", node.full_name());
            match definitions.iter_mut().find(|d| d.file_name == file_name) {
                // Duplicate root declarations merge into one file.
                Some(existing) => existing.content.push_str(&w.finish()),
                None => definitions.push(DefinitionFile {
                    full_name: node.full_name().to_string(),
                    file_name,
                    content: w.finish(),
                }),
            }
        }

        let index = definitions
            .iter()
            .map(|d| format!("/// <reference path=\"./{}\" />", d.file_name))
            .collect::<Vec<_>>()
            .join(NEWLINE);

        info!(
            "generated {} definition files and {} export stubs",
            definitions.len(),
            exports.len()
        );

        Ok(GeneratorOutput {
            version,
            definitions,
            index,
            exports,
        })
    }
}
