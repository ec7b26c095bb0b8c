use crate::api::{Symbol, SymbolKind};
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::writer::DeclWriter;

use super::{DeclarationNode, NodeHeader, Property};

/// A documented object shape: `type Name = { .. };`.
#[derive(Debug, Clone)]
pub struct Typedef {
    pub header: NodeHeader,
    pub properties: Vec<Property>,
    pub children: Vec<DeclarationNode>,
}

impl Typedef {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &Symbol,
        depth: usize,
        children: Vec<DeclarationNode>,
    ) -> Result<Self> {
        if let Some(method) = symbol.methods.first() {
            return Err(GeneratorError::InvalidKindForMember {
                owner: symbol.name.clone(),
                kind: SymbolKind::Typedef,
                member: "method",
                name: method.name.clone(),
            });
        }
        let header = NodeHeader::new(symbol, depth);
        let properties =
            Property::build_all(config, &symbol.properties, &header.full_name, SymbolKind::Typedef);
        Ok(Typedef {
            header,
            properties,
            children,
        })
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        let header = &self.header;
        header.doc(w);
        let start = format!("{}type {} =", header.keyword(), header.name);
        if self.properties.is_empty() {
            w.line(header.depth, &format!("{} any;", start));
        } else {
            w.line(header.depth, &format!("{} {{", start));
            for property in &self.properties {
                property.render(w, header.depth + 1);
            }
            w.line(header.depth, "};");
        }
        header.sibling_namespace(w, &self.children);
    }
}
