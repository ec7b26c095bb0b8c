//! Methods, functions and constructors.
//!
//! A [`Method`] keeps the documented parameter list as its canonical form.
//! The call signatures it renders come from [`crate::overloads::synthesize`]
//! and are computed once, at construction.

use tracing::debug;

use crate::api::{Deprecation, MethodSymbol, SymbolKind, Visibility};
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::overloads::synthesize;
use crate::types::{TypeSet, ANY, THIS, VOID};
use crate::writer::DeclWriter;

use super::{Member, Parameter};

pub const CONSTRUCTOR: &str = "constructor";

const COMPATIBILITY_NOTE: &str = "Compatibility overload for an override that does not follow \
the TypeScript override rules. Prefer one of the signatures above.";

#[derive(Debug, Clone)]
pub struct ReturnValue {
    pub types: TypeSet,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub full_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_value: ReturnValue,
    /// Redundant override of an ancestor method; not emitted.
    pub ignore: bool,
    /// The catch-all `(...args: any[]): any` overload is appended.
    pub needs_compatibility_overload: bool,
    description: String,
    deprecated: Option<Deprecation>,
    owner_kind: SymbolKind,
    /// Listed in the `ignore` configuration; never emitted.
    excluded: bool,
    signatures: Vec<Vec<Parameter>>,
}

impl Method {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &MethodSymbol,
        owner: &str,
        owner_kind: SymbolKind,
    ) -> Result<Self> {
        if matches!(owner_kind, SymbolKind::Enum | SymbolKind::Typedef) {
            return Err(GeneratorError::InvalidKindForMember {
                owner: owner.to_string(),
                kind: owner_kind,
                member: "method",
                name: symbol.name.clone(),
            });
        }

        let name = symbol.name.as_str();
        let full_name = format!("{}.{}", owner, name);
        let specific = &config.replacements.specific;

        let is_static = symbol.is_static && !specific.method_remove_static.matches(&full_name, name);
        let visibility = specific
            .method_visibility
            .lookup(&full_name, name)
            .copied()
            .unwrap_or(symbol.visibility);

        let parameters = symbol
            .parameters
            .iter()
            .map(|p| Parameter::new(config, p, &full_name))
            .collect::<Result<Vec<_>>>()?;

        let is_constructor = name == CONSTRUCTOR && owner_kind == SymbolKind::Class;
        let return_description = symbol
            .return_value
            .as_ref()
            .and_then(|r| r.description.clone())
            .unwrap_or_default();
        let raw_return = if is_constructor {
            VOID.to_string()
        } else {
            let documented = specific
                .method_return_type
                .lookup(&full_name, name)
                .map(String::as_str)
                .or_else(|| symbol.return_value.as_ref().and_then(|r| r.ty.as_deref()))
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(if return_description.is_empty() { VOID } else { ANY });
            config.replacements.replace_types(documented, &full_name)
        };

        let returns_this = owner_kind == SymbolKind::Class
            && !is_static
            && !is_constructor
            && raw_return == owner
            && !specific.method_return_type_not_this.matches(&full_name, name);
        let return_types = if returns_this {
            TypeSet::parse(THIS)
        } else {
            TypeSet::parse(&raw_return)
        };

        let mut excluded = config.ignore.methods.matches(&full_name, name);
        if is_static && owner_kind == SymbolKind::Class {
            excluded |= config.ignore.static_methods.matches(&full_name, name);
        }
        if excluded {
            debug!("ignoring method {}", full_name);
        }

        let synthesis = synthesize(&parameters)?;
        let needs_compatibility_overload = synthesis.needs_compatibility_overload
            || specific.method_overrides_not_compatible.matches(&full_name, name);

        Ok(Method {
            name: name.to_string(),
            visibility,
            is_static,
            parameters,
            return_value: ReturnValue {
                types: return_types,
                description: return_description,
            },
            ignore: false,
            needs_compatibility_overload,
            description: symbol.description.clone().unwrap_or_default(),
            deprecated: symbol.deprecated.clone(),
            owner_kind,
            excluded,
            signatures: synthesis.signatures,
            full_name,
        })
    }

    /// Build the methods of a symbol.
    pub fn build_all(
        config: &GeneratorConfig,
        symbols: &[MethodSymbol],
        owner: &str,
        owner_kind: SymbolKind,
    ) -> Result<Vec<Method>> {
        symbols
            .iter()
            .map(|m| Method::new(config, m, owner, owner_kind))
            .collect()
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR && self.owner_kind == SymbolKind::Class
    }

    /// Whether any signature is emitted at all.
    pub fn is_emitted(&self) -> bool {
        !self.ignore && !self.excluded
    }

    /// Same name and pairwise equivalent parameters, with `return_types`
    /// standing in for this method's own return types.
    pub fn is_identical_to(&self, other: &Method, return_types: &TypeSet) -> bool {
        self.name == other.name
            && *return_types == other.return_value.types
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.is_equivalent(b))
    }

    fn prefix(&self) -> String {
        match self.owner_kind {
            SymbolKind::Namespace => "function ".to_string(),
            SymbolKind::Class => {
                let modifier = if self.is_static { "static " } else { "" };
                format!("{} {}", self.visibility.keyword(), modifier)
            }
            SymbolKind::Interface | SymbolKind::Enum | SymbolKind::Typedef => String::new(),
        }
    }

    pub fn render(&self, w: &mut DeclWriter<'_>, depth: usize) {
        if !self.is_emitted() {
            return;
        }

        for parameters in &self.signatures {
            self.render_signature(w, depth, &self.description, parameters, &self.return_value);
        }

        if self.needs_compatibility_overload {
            let rest = [Parameter::rest_any(&self.full_name)];
            let returns = ReturnValue {
                types: TypeSet::parse(ANY),
                description: String::new(),
            };
            self.render_signature(w, depth, COMPATIBILITY_NOTE, &rest, &returns);
        }
    }

    fn render_signature(
        &self,
        w: &mut DeclWriter<'_>,
        depth: usize,
        description: &str,
        parameters: &[Parameter],
        returns: &ReturnValue,
    ) {
        let mut tags: Vec<String> = parameters.iter().map(Parameter::doc_tag).collect();
        if !self.is_constructor() && !returns.types.is_void() {
            let tag = format!("@returns {{{}}} {}", returns.types, returns.description);
            tags.push(tag.trim_end().to_string());
        }
        if let Some(deprecated) = &self.deprecated {
            tags.push(deprecated.doc_tag());
        }
        w.doc_block(depth, description, &tags);

        let params = parameters
            .iter()
            .map(Parameter::render)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = if self.is_constructor() {
            String::new()
        } else {
            format!(": {}", returns.types)
        };
        w.line(depth, &format!("{}{}({}){};", self.prefix(), self.name, params, ret));
        w.blank_line();
    }
}

impl Member for Method {
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
