use crate::api::{Symbol, SymbolKind};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::writer::DeclWriter;

use super::{DeclarationNode, Method, NodeHeader, Property};

/// An interface: members render without modifiers.
#[derive(Debug, Clone)]
pub struct Interface {
    pub header: NodeHeader,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub children: Vec<DeclarationNode>,
}

impl Interface {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &Symbol,
        depth: usize,
        children: Vec<DeclarationNode>,
    ) -> Result<Self> {
        let header = NodeHeader::new(symbol, depth);
        let properties =
            Property::build_all(config, &symbol.properties, &header.full_name, SymbolKind::Interface);
        let methods =
            Method::build_all(config, &symbol.methods, &header.full_name, SymbolKind::Interface)?;
        Ok(Interface {
            header,
            properties,
            methods,
            children,
        })
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        let header = &self.header;
        header.doc(w);
        w.line(
            header.depth,
            &format!("{}interface {} {{", header.keyword(), header.name),
        );
        for property in &self.properties {
            property.render(w, header.depth + 1);
        }
        for method in &self.methods {
            method.render(w, header.depth + 1);
        }
        w.line(header.depth, "}");
        header.sibling_namespace(w, &self.children);
    }
}
