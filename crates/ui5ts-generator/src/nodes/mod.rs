//! Declaration nodes.
//!
//! One node is built per symbol, after its children. Each kind owns its
//! members and renders itself; [`DeclarationNode`] is the closed set of kinds
//! the tree is made of.

mod class;
mod enum_member;
mod enumeration;
mod interface;
mod method;
mod namespace;
mod parameter;
mod property;
mod typedef;

use std::cmp::Ordering;

use crate::api::{Deprecation, Symbol, SymbolKind, Visibility};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::writer::DeclWriter;

pub use class::Class;
pub use enum_member::EnumMember;
pub use enumeration::Enumeration;
pub use interface::Interface;
pub use method::{Method, ReturnValue, CONSTRUCTOR};
pub use namespace::Namespace;
pub use parameter::Parameter;
pub use property::Property;
pub use typedef::Typedef;

/// Common view of class members, for ordering.
pub trait Member {
    fn name(&self) -> &str;
    fn is_static(&self) -> bool;
    fn visibility(&self) -> Visibility;
}

/// Static members first, then by visibility, then the constructor, then by
/// name.
pub fn member_order<M: Member>(a: &M, b: &M) -> Ordering {
    b.is_static()
        .cmp(&a.is_static())
        .then_with(|| a.visibility().rank().cmp(&b.visibility().rank()))
        .then_with(|| (b.name() == CONSTRUCTOR).cmp(&(a.name() == CONSTRUCTOR)))
        .then_with(|| a.name().cmp(b.name()))
}

/// A node of the declaration tree.
#[derive(Debug, Clone)]
pub enum DeclarationNode {
    Namespace(Namespace),
    Class(Class),
    Interface(Interface),
    Enum(Enumeration),
    Typedef(Typedef),
}

impl DeclarationNode {
    /// Build the node for `symbol` at nesting `depth`, owning `children`.
    pub fn build(
        config: &GeneratorConfig,
        symbol: &Symbol,
        depth: usize,
        children: Vec<DeclarationNode>,
    ) -> Result<Self> {
        let node = match symbol.kind {
            SymbolKind::Namespace => {
                DeclarationNode::Namespace(Namespace::new(config, symbol, depth, children)?)
            }
            SymbolKind::Class => DeclarationNode::Class(Class::new(config, symbol, depth, children)?),
            SymbolKind::Interface => {
                DeclarationNode::Interface(Interface::new(config, symbol, depth, children)?)
            }
            SymbolKind::Enum => DeclarationNode::Enum(Enumeration::new(symbol, depth, children)?),
            SymbolKind::Typedef => {
                DeclarationNode::Typedef(Typedef::new(config, symbol, depth, children)?)
            }
        };
        Ok(node)
    }

    fn header(&self) -> &NodeHeader {
        match self {
            DeclarationNode::Namespace(n) => &n.header,
            DeclarationNode::Class(n) => &n.header,
            DeclarationNode::Interface(n) => &n.header,
            DeclarationNode::Enum(n) => &n.header,
            DeclarationNode::Typedef(n) => &n.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn full_name(&self) -> &str {
        &self.header().full_name
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            DeclarationNode::Namespace(_) => SymbolKind::Namespace,
            DeclarationNode::Class(_) => SymbolKind::Class,
            DeclarationNode::Interface(_) => SymbolKind::Interface,
            DeclarationNode::Enum(_) => SymbolKind::Enum,
            DeclarationNode::Typedef(_) => SymbolKind::Typedef,
        }
    }

    pub fn children(&self) -> &[DeclarationNode] {
        match self {
            DeclarationNode::Namespace(n) => &n.children,
            DeclarationNode::Class(n) => &n.children,
            DeclarationNode::Interface(n) => &n.children,
            DeclarationNode::Enum(_) => &[],
            DeclarationNode::Typedef(n) => &n.children,
        }
    }

    pub fn children_mut(&mut self) -> &mut [DeclarationNode] {
        match self {
            DeclarationNode::Namespace(n) => &mut n.children,
            DeclarationNode::Class(n) => &mut n.children,
            DeclarationNode::Interface(n) => &mut n.children,
            DeclarationNode::Enum(_) => &mut [],
            DeclarationNode::Typedef(n) => &mut n.children,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            DeclarationNode::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match self {
            DeclarationNode::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        match self {
            DeclarationNode::Namespace(n) => n.render(w),
            DeclarationNode::Class(n) => n.render(w),
            DeclarationNode::Interface(n) => n.render(w),
            DeclarationNode::Enum(n) => n.render(w),
            DeclarationNode::Typedef(n) => n.render(w),
        }
    }
}

/// Identity and documentation shared by every node kind.
#[derive(Debug, Clone)]
pub struct NodeHeader {
    /// Last segment of the dotted name.
    pub name: String,
    pub full_name: String,
    pub depth: usize,
    pub description: String,
    pub deprecated: Option<Deprecation>,
}

impl NodeHeader {
    fn new(symbol: &Symbol, depth: usize) -> Self {
        NodeHeader {
            name: symbol.basename().to_string(),
            full_name: symbol.name.clone(),
            depth,
            description: symbol.description.clone().unwrap_or_default(),
            deprecated: symbol.deprecated.clone(),
        }
    }

    /// `declare ` at the root of a file, `export ` inside a namespace.
    fn keyword(&self) -> &'static str {
        if self.depth == 0 {
            "declare "
        } else {
            "export "
        }
    }

    fn doc(&self, w: &mut DeclWriter<'_>) {
        let tags: Vec<String> = self.deprecated.iter().map(Deprecation::doc_tag).collect();
        w.doc_block(self.depth, &self.description, &tags);
    }

    fn open_namespace(&self, w: &mut DeclWriter<'_>) {
        let keyword = if self.depth == 0 { "declare " } else { "" };
        w.line(self.depth, &format!("{}namespace {} {{", keyword, self.name));
    }

    /// Nested declarations of a class, interface or typedef go into a
    /// namespace of the same name next to it.
    fn sibling_namespace(&self, w: &mut DeclWriter<'_>, children: &[DeclarationNode]) {
        if children.is_empty() {
            return;
        }
        self.open_namespace(w);
        for child in children {
            child.render(w);
        }
        w.line(self.depth, "}");
    }
}
