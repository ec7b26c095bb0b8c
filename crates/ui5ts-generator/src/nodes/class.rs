use std::borrow::Cow;

use tracing::warn;

use crate::api::{MethodSymbol, Symbol, SymbolKind};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::writer::DeclWriter;

use super::{member_order, DeclarationNode, Method, NodeHeader, Property};

#[derive(Debug, Clone)]
pub struct Class {
    pub header: NodeHeader,
    /// Full name of the base class, after replacements.
    pub base: Option<String>,
    pub properties: Vec<Property>,
    /// Methods in emission order; the constructor, if any, is one of them.
    pub methods: Vec<Method>,
    pub children: Vec<DeclarationNode>,
}

impl Class {
    pub fn new(
        config: &GeneratorConfig,
        symbol: &Symbol,
        depth: usize,
        children: Vec<DeclarationNode>,
    ) -> Result<Self> {
        let header = NodeHeader::new(symbol, depth);
        let full_name = header.full_name.as_str();

        let base = config
            .replacements
            .specific
            .base_class
            .lookup(full_name, &header.name)
            .cloned()
            .or_else(|| {
                symbol
                    .extends
                    .as_deref()
                    .map(|b| config.replacements.replace_types(b, full_name))
            })
            .filter(|b| !b.is_empty());

        let mut properties =
            Property::build_all(config, &symbol.properties, full_name, SymbolKind::Class);
        properties.sort_by(member_order);

        let method_symbols = fix_static_methods(config, full_name, &symbol.methods);
        let mut methods =
            Method::build_all(config, &method_symbols, full_name, SymbolKind::Class)?;
        if let Some(constructor) = &symbol.constructor {
            methods.push(Method::new(
                config,
                &constructor.to_method(),
                full_name,
                SymbolKind::Class,
            )?);
        }
        methods.sort_by(member_order);

        Ok(Class {
            header,
            base,
            properties,
            methods,
            children,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.header.full_name
    }

    pub fn render(&self, w: &mut DeclWriter<'_>) {
        let header = &self.header;
        header.doc(w);

        let extends = match &self.base {
            Some(base) => format!(" extends {}", base),
            None => String::new(),
        };
        w.line(
            header.depth,
            &format!("{}class {}{} {{", header.keyword(), header.name, extends),
        );
        let inner = header.depth + 1;
        for property in &self.properties {
            property.render(w, inner);
        }
        for method in &self.methods {
            method.render(w, inner);
        }
        w.line(header.depth, "}");

        header.sibling_namespace(w, &self.children);
    }
}

/// Static methods of classes listed in `smart_static_method_fixing` are
/// mostly instance methods documented as static. Unless allowed, such a
/// method is dropped when an instance method of the same name exists and
/// turned into an instance method otherwise.
fn fix_static_methods<'a>(
    config: &GeneratorConfig,
    class: &str,
    methods: &'a [MethodSymbol],
) -> Cow<'a, [MethodSymbol]> {
    let ignore = &config.ignore;
    if !ignore.smart_static_method_fixing.contains(class) {
        return Cow::Borrowed(methods);
    }

    let allowed = &ignore.smart_static_method_fixing_allowed;
    let wildcard = format!("{}.*", class);
    let is_allowed = |name: &str| {
        allowed.contains(name)
            || allowed.contains(&format!("{}.{}", class, name))
            || allowed.contains(&wildcard)
    };

    let mut fixed = Vec::with_capacity(methods.len());
    for method in methods {
        if !method.is_static || is_allowed(&method.name) {
            fixed.push(method.clone());
        } else if methods.iter().any(|m| !m.is_static && m.name == method.name) {
            warn!("removing duplicate static method {}.{}", class, method.name);
        } else {
            warn!("fixing static method {}.{}", class, method.name);
            fixed.push(MethodSymbol {
                is_static: false,
                ..method.clone()
            });
        }
    }
    Cow::Owned(fixed)
}
