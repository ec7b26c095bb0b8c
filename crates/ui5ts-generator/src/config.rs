//! Generator configuration (`ui5ts.toml`) parsing and lookups.
//!
//! Every table is a read-only lookup keyed by a full dotted name, with a
//! `*.<basename>` wildcard fallback. Exact keys win over wildcards.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::api::{PropertySymbol, Symbol, Visibility};
use crate::types::split_top_level;

/// Marker in output paths replaced by the `major.minor` version.
pub const VERSION_MARKER: &str = "{{VERSION}}";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub output: OutputConfig,
    pub ignore: IgnoreConfig,
    pub replacements: ReplacementsConfig,
    /// Extra symbols appended to a library's document, keyed by library.
    pub additions: IndexMap<String, Vec<Symbol>>,
    /// Extra properties of a namespace, keyed by its full name.
    pub additional_properties: IndexMap<String, Vec<PropertySymbol>>,
}

/// Output section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indentation unit for one nesting level.
    pub indentation: String,
    /// Directory for the `.d.ts` definitions. May contain `{{VERSION}}`.
    pub definitions_path: Option<String>,
    /// Directory for the module export stubs. May contain `{{VERSION}}`.
    pub exports_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indentation: "    ".to_string(),
            definitions_path: None,
            exports_path: None,
        }
    }
}

impl OutputConfig {
    /// Definitions directory for a version, defaulting to "dist".
    pub fn definitions_dir(&self, version: Option<&str>) -> String {
        resolve_version(self.definitions_path.as_deref().unwrap_or("dist"), version)
    }

    /// Exports directory for a version, if configured.
    pub fn exports_dir(&self, version: Option<&str>) -> Option<String> {
        self.exports_path
            .as_deref()
            .map(|path| resolve_version(path, version))
    }
}

/// Replace the version marker with the `major.minor` part of `version`.
pub fn resolve_version(template: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => {
            let mut parts: Vec<&str> = version.split('.').collect();
            if parts.len() > 2 {
                parts.truncate(2);
            }
            template.replace(VERSION_MARKER, &parts.join("."))
        }
        None => template.to_string(),
    }
}

/// Ignore section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Namespace prefixes skipped by the tree builder, subtree included.
    pub namespaces: NameSet,
    /// Methods never emitted.
    pub methods: NameSet,
    /// Static class methods never emitted.
    pub static_methods: NameSet,
    /// Static properties never emitted.
    pub static_properties: NameSet,
    /// Classes whose static methods are repaired.
    pub smart_static_method_fixing: HashSet<String>,
    /// Static methods kept as they are in repaired classes.
    pub smart_static_method_fixing_allowed: HashSet<String>,
}

/// Replacements section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReplacementsConfig {
    /// Type-name replacements applied to every top-level type term.
    pub global: HashMap<String, String>,
    pub specific: SpecificReplacements,
}

impl ReplacementsConfig {
    /// Apply the global table to each top-level alternative of `raw`, the
    /// type of the declaration named `owner`.
    ///
    /// A trailing `[]` is kept: `Foo[]` with `Foo = "Bar"` becomes `Bar[]`.
    /// Names under `jQuery.` refer to values, so they become `typeof jQuery.X`,
    /// except inside `jQuery` itself where they name the generated interfaces.
    pub fn replace_types(&self, raw: &str, owner: &str) -> String {
        let in_jquery = owner.starts_with(JQUERY_PREFIX);
        split_top_level(raw)
            .into_iter()
            .map(|term| {
                let (element, is_array) = match term.strip_suffix("[]") {
                    Some(element) => (element, true),
                    None => (term, false),
                };
                let replaced = self
                    .global
                    .get(element)
                    .map(String::as_str)
                    .unwrap_or(element);
                let replaced = if !replaced.starts_with(JQUERY_PREFIX) {
                    replaced.to_string()
                } else if in_jquery {
                    jquery_interface_name(replaced)
                } else {
                    format!("typeof {}", replaced)
                };
                if is_array {
                    format!("{}[]", replaced)
                } else {
                    replaced
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

const JQUERY_PREFIX: &str = "jQuery.";

/// Interface name for a `jQuery` member: `jQuery.sap.log` is `JQuerySapLog`.
pub fn jquery_interface_name(full_name: &str) -> String {
    if full_name == "jQuery" {
        return "JQueryStatic".to_string();
    }
    full_name
        .split('.')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Per-symbol replacement tables.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SpecificReplacements {
    /// Namespaces rendered as a type alias instead of a block.
    pub namespace_as_type: NameTable<String>,
    pub base_class: NameTable<String>,
    pub method_parameter_type: NameTable<String>,
    /// Parameters documented as required that are made optional.
    pub method_parameter_optional: NameSet,
    pub method_return_type: NameTable<String>,
    /// Methods returning their own class that keep the class name.
    pub method_return_type_not_this: NameSet,
    pub method_remove_static: NameSet,
    pub method_visibility: NameTable<Visibility>,
    pub property_type: NameTable<String>,
    /// Methods that get the catch-all `(...args: any[]): any` overload.
    pub method_overrides_not_compatible: NameSet,
}

/// A lookup table keyed by full name or `*.<basename>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct NameTable<V>(pub HashMap<String, V>);

impl<V> Default for NameTable<V> {
    fn default() -> Self {
        NameTable(HashMap::new())
    }
}

impl<V> NameTable<V> {
    pub fn lookup(&self, full_name: &str, basename: &str) -> Option<&V> {
        self.0
            .get(full_name)
            .or_else(|| self.0.get(&wildcard(basename)))
    }

    /// Lookup for a method parameter: exact, then `*.<method>.<param>`,
    /// then `*.<param>`.
    pub fn lookup_parameter(&self, full_name: &str, method: &str, parameter: &str) -> Option<&V> {
        self.0
            .get(full_name)
            .or_else(|| self.0.get(&wildcard(&format!("{}.{}", method, parameter))))
            .or_else(|| self.0.get(&wildcard(parameter)))
    }
}

/// A set of full names or `*.<basename>` wildcards.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct NameSet(pub HashSet<String>);

impl NameSet {
    pub fn matches(&self, full_name: &str, basename: &str) -> bool {
        self.0.contains(full_name) || self.0.contains(&wildcard(basename))
    }

    pub fn matches_parameter(&self, full_name: &str, method: &str, parameter: &str) -> bool {
        self.0.contains(full_name)
            || self.0.contains(&wildcard(&format!("{}.{}", method, parameter)))
            || self.0.contains(&wildcard(parameter))
    }
}

fn wildcard(name: &str) -> String {
    format!("*.{}", name)
}

impl GeneratorConfig {
    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn indentation(&self) -> &str {
        &self.output.indentation
    }
}
