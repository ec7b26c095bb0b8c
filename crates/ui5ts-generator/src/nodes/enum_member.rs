use crate::api::{Deprecation, PropertySymbol};
use crate::writer::DeclWriter;

/// One member of a string-valued enum: `Name = "Name",`.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    description: String,
    deprecated: Option<Deprecation>,
}

impl EnumMember {
    pub fn new(symbol: &PropertySymbol) -> Self {
        EnumMember {
            name: symbol.name.clone(),
            description: symbol.description.clone().unwrap_or_default(),
            deprecated: symbol.deprecated.clone(),
        }
    }

    pub fn render(&self, w: &mut DeclWriter<'_>, depth: usize) {
        let tags: Vec<String> = self.deprecated.iter().map(Deprecation::doc_tag).collect();
        w.doc_block(depth, &self.description, &tags);
        w.line(depth, &format!("{} = \"{}\",", self.name, self.name));
    }
}
