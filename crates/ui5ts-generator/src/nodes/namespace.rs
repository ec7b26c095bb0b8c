use crate::api::{Symbol, SymbolKind};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::writer::DeclWriter;

use super::{DeclarationNode, Method, NodeHeader, Property};

#[derive(Debug, Clone)]
pub struct Namespace {
    pub header: NodeHeader,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub children: Vec<DeclarationNode>,
    /// Set from `namespace_as_type`: rendered as `type Name = ..;`.
    as_type: Option<String>,
}

impl Namespace {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &Symbol,
        depth: usize,
        children: Vec<DeclarationNode>,
    ) -> Result<Self> {
        let header = NodeHeader::new(symbol, depth);
        let mut property_symbols = symbol.properties.clone();
        if let Some(extra) = config.additional_properties.get(&header.full_name) {
            property_symbols.extend(extra.iter().cloned());
        }
        let properties =
            Property::build_all(config, &property_symbols, &header.full_name, SymbolKind::Namespace);
        let methods =
            Method::build_all(config, &symbol.methods, &header.full_name, SymbolKind::Namespace)?;
        let as_type = config
            .replacements
            .specific
            .namespace_as_type
            .lookup(&header.full_name, &header.name)
            .cloned();

        Ok(Namespace {
            header,
            properties,
            methods,
            children,
            as_type,
        })
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        let header = &self.header;
        header.doc(w);

        if let Some(ty) = &self.as_type {
            w.line(
                header.depth,
                &format!("{}type {} = {};", header.keyword(), header.name, ty),
            );
            header.sibling_namespace(w, &self.children);
            return;
        }

        header.open_namespace(w);
        let inner = header.depth + 1;
        for property in &self.properties {
            property.render(w, inner);
        }
        for method in &self.methods {
            method.render(w, inner);
        }
        for child in &self.children {
            child.render(w);
        }
        w.line(header.depth, "}");
    }
}
