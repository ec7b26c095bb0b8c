use crate::api::{Symbol, SymbolKind};
use crate::error::{GeneratorError, Result};
use crate::writer::DeclWriter;

use super::{DeclarationNode, EnumMember, NodeHeader};

/// A string-valued enum. The members come from the symbol's properties.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub header: NodeHeader,
    pub members: Vec<EnumMember>,
}

impl Enumeration {
    pub fn new(symbol: &Symbol, depth: usize, children: Vec<DeclarationNode>) -> Result<Self> {
        if let Some(method) = symbol.methods.first() {
            return Err(GeneratorError::InvalidKindForMember {
                owner: symbol.name.clone(),
                kind: SymbolKind::Enum,
                member: "method",
                name: method.name.clone(),
            });
        }
        if let Some(child) = children.first() {
            return Err(GeneratorError::InvalidKindForMember {
                owner: symbol.name.clone(),
                kind: SymbolKind::Enum,
                member: "nested declaration",
                name: child.full_name().to_string(),
            });
        }
        Ok(Enumeration {
            header: NodeHeader::new(symbol, depth),
            members: symbol.properties.iter().map(EnumMember::new).collect(),
        })
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        let header = &self.header;
        header.doc(w);
        w.line(
            header.depth,
            &format!("{}enum {} {{", header.keyword(), header.name),
        );
        for member in &self.members {
            member.render(w, header.depth + 1);
        }
        w.line(header.depth, "}");
    }
}
