//! Input records: the symbols of a UI5 `api.json` document.

use std::fmt;

use serde::Deserialize;

/// One `api.json` document, as published per library.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiDocument {
    /// Library name, e.g. `sap.m`.
    #[serde(default)]
    pub library: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl ApiDocument {
    /// Parse a document from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// The kind of a documented symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    #[default]
    Namespace,
    Class,
    Interface,
    Enum,
    Typedef,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Namespace => write!(f, "namespace"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Interface => write!(f, "interface"),
            SymbolKind::Enum => write!(f, "enum"),
            SymbolKind::Typedef => write!(f, "typedef"),
        }
    }
}

/// Visibility of a symbol or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Restricted,
}

impl Visibility {
    /// Sort rank: public members first.
    pub fn rank(self) -> u8 {
        match self {
            Visibility::Public => 0,
            Visibility::Protected => 1,
            Visibility::Restricted => 2,
        }
    }

    /// The declaration keyword. `restricted` has no TypeScript counterpart.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected | Visibility::Restricted => "protected",
        }
    }
}

/// A documented API entity: namespace, class, interface, enum or typedef.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Symbol {
    /// Dot-qualified name, e.g. `sap.m.Button`.
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Base class reference for classes.
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    /// Properties, or the members of an enum.
    #[serde(default)]
    pub properties: Vec<PropertySymbol>,
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    #[serde(default)]
    pub constructor: Option<ConstructorSymbol>,
}

impl Symbol {
    /// The empty namespace standing in for a package that has members but
    /// no namespace declaration of its own.
    pub fn implicit_namespace(name: &str) -> Self {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Namespace,
            ..Default::default()
        }
    }

    /// Last segment of the dotted name.
    pub fn basename(&self) -> &str {
        basename(&self.name)
    }
}

/// A property of a class, namespace, interface or typedef, or an enum member.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PropertySymbol {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MethodSymbol {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub return_value: Option<ReturnValueSymbol>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

/// A class constructor. Built into a method named `constructor`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConstructorSymbol {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

impl ConstructorSymbol {
    pub fn to_method(&self) -> MethodSymbol {
        MethodSymbol {
            name: "constructor".to_string(),
            visibility: self.visibility,
            is_static: false,
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            return_value: None,
            deprecated: self.deprecated.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ParameterSymbol {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, alias = "repeatable")]
    pub spread: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReturnValueSymbol {
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Deprecation {
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Deprecation {
    /// The `@deprecated` doc tag.
    pub fn doc_tag(&self) -> String {
        let mut tag = String::from("@deprecated");
        if let Some(since) = &self.since {
            tag.push_str(" since ");
            tag.push_str(since);
        }
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            tag.push_str(if self.since.is_some() { " - " } else { " " });
            tag.push_str(text);
        }
        tag
    }
}

/// Last segment of a dotted name.
pub fn basename(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "library": "sap.m",
            "version": "1.60.1",
            "symbols": [
                {
                    "kind": "class",
                    "name": "sap.m.Button",
                    "extends": "sap.ui.core.Control",
                    "visibility": "public",
                    "constructor": {
                        "visibility": "public",
                        "parameters": [{ "name": "sId", "type": "string", "optional": true }]
                    },
                    "methods": [
                        {
                            "name": "getText",
                            "visibility": "public",
                            "returnValue": { "type": "string", "description": "the text" }
                        },
                        { "name": "getMetadata", "static": true, "visibility": "public" }
                    ]
                },
                {
                    "kind": "enum",
                    "name": "sap.m.ButtonType",
                    "properties": [{ "name": "Accept" }, { "name": "Reject" }]
                }
            ]
        }"#;
        let doc = ApiDocument::from_json(json).unwrap();
        assert_eq!(doc.library, "sap.m");
        assert_eq!(doc.symbols.len(), 2);

        let button = &doc.symbols[0];
        assert_eq!(button.kind, SymbolKind::Class);
        assert_eq!(button.basename(), "Button");
        assert_eq!(button.extends.as_deref(), Some("sap.ui.core.Control"));
        assert_eq!(button.methods.len(), 2);
        assert!(button.methods[1].is_static);
        let ret = button.methods[0].return_value.as_ref().unwrap();
        assert_eq!(ret.ty.as_deref(), Some("string"));

        let ctor = button.constructor.as_ref().unwrap().to_method();
        assert_eq!(ctor.name, "constructor");
        assert!(ctor.parameters[0].optional);

        assert_eq!(doc.symbols[1].kind, SymbolKind::Enum);
        assert_eq!(doc.symbols[1].properties.len(), 2);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "symbols": [{ "kind": "function", "name": "x" }] }"#;
        assert!(ApiDocument::from_json(json).is_err());
    }

    #[test]
    fn test_deprecation_tag() {
        let dep = Deprecation {
            since: Some("1.38".to_string()),
            text: Some("Use foo instead".to_string()),
        };
        assert_eq!(dep.doc_tag(), "@deprecated since 1.38 - Use foo instead");
        assert_eq!(Deprecation::default().doc_tag(), "@deprecated");
    }
}
