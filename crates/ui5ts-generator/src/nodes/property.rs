//! Properties of namespaces, classes, interfaces and typedefs.

use tracing::debug;

use crate::api::{Deprecation, PropertySymbol, SymbolKind, Visibility};
use crate::config::GeneratorConfig;
use crate::types::{TypeSet, ANY};
use crate::writer::DeclWriter;

use super::Member;

#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub full_name: String,
    pub types: TypeSet,
    pub visibility: Visibility,
    pub is_static: bool,
    pub optional: bool,
    description: String,
    deprecated: Option<Deprecation>,
    owner_kind: SymbolKind,
}

impl Property {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &PropertySymbol,
        owner: &str,
        owner_kind: SymbolKind,
    ) -> Self {
        let full_name = format!("{}.{}", owner, symbol.name);
        let raw = config
            .replacements
            .specific
            .property_type
            .lookup(&full_name, &symbol.name)
            .map(String::as_str)
            .or(symbol.ty.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(ANY);

        Property {
            name: symbol.name.clone(),
            types: TypeSet::parse(&config.replacements.replace_types(raw, &full_name)),
            visibility: symbol.visibility,
            is_static: symbol.is_static,
            optional: symbol.optional,
            description: symbol.description.clone().unwrap_or_default(),
            deprecated: symbol.deprecated.clone(),
            owner_kind,
            full_name,
        }
    }

    /// Build the properties of a symbol, dropping ignored static ones.
    pub fn build_all(
        config: &GeneratorConfig,
        symbols: &[PropertySymbol],
        owner: &str,
        owner_kind: SymbolKind,
    ) -> Vec<Property> {
        let mut properties = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let property = Property::new(config, symbol, owner, owner_kind);
            if property.is_static
                && config
                    .ignore
                    .static_properties
                    .matches(&property.full_name, &property.name)
            {
                debug!("ignoring static property {}", property.full_name);
                continue;
            }
            properties.push(property);
        }
        properties
    }

    fn prefix(&self) -> String {
        match self.owner_kind {
            SymbolKind::Namespace => "var ".to_string(),
            SymbolKind::Class => {
                let modifier = if self.is_static { "static " } else { "" };
                format!("{} {}", self.visibility.keyword(), modifier)
            }
            SymbolKind::Interface | SymbolKind::Typedef | SymbolKind::Enum => String::new(),
        }
    }

    pub fn render(&self, w: &mut DeclWriter<'_>, depth: usize) {
        let tags: Vec<String> = self.deprecated.iter().map(Deprecation::doc_tag).collect();
        w.doc_block(depth, &self.description, &tags);

        let optional = if self.optional && self.owner_kind != SymbolKind::Namespace {
            "?"
        } else {
            ""
        };
        w.line(
            depth,
            &format!("{}{}{}: {};", self.prefix(), self.name, optional, self.types),
        );
    }
}

impl Member for Property {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}
