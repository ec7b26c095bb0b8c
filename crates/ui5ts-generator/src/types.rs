//! Type expressions.
//!
//! Types in the API documentation are plain strings such as
//! `string|sap.ui.core.Control[]|Promise<Array<A|B>>`. A [`TypeSet`] is the
//! parsed, deduplicated union of such a string. Terms are keyed by their
//! canonical rendering, so two structurally identical terms are the same
//! set member.

use std::cell::OnceCell;
use std::fmt;

use indexmap::IndexMap;
use tracing::warn;

pub const ANY: &str = "any";
pub const VOID: &str = "void";
pub const THIS: &str = "this";

/// A single alternative of a union type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTerm {
    /// A plain name: `string`, `any`, `sap.ui.core.Control`.
    Basic(String),
    /// A generic type: `Promise<A|B>`.
    Wrapped { wrapper: String, inner: Vec<TypeTerm> },
    /// `T[]` or `Array<T>`.
    Array(Vec<TypeTerm>),
}

impl TypeTerm {
    /// Classify one top-level alternative.
    pub fn parse(raw: &str) -> TypeTerm {
        let term = raw.trim();
        if let Some(element) = term.strip_suffix("[]") {
            return TypeTerm::Array(parse_terms(element));
        }
        if let Some(rest) = term.strip_prefix("Array<") {
            return TypeTerm::Array(parse_terms(strip_closing(rest, term)));
        }
        if let Some(start) = term.find('<') {
            let wrapper = term[..start].trim().to_string();
            let inner = parse_terms(strip_closing(&term[start + 1..], term));
            return TypeTerm::Wrapped { wrapper, inner };
        }
        TypeTerm::Basic(term.to_string())
    }

    pub fn render(&self) -> String {
        match self {
            TypeTerm::Basic(name) => name.clone(),
            TypeTerm::Wrapped { wrapper, inner } => {
                format!("{}<{}>", wrapper, render_inner(inner))
            }
            TypeTerm::Array(inner) => match inner.as_slice() {
                [TypeTerm::Basic(name)] => format!("{}[]", name),
                _ => format!("Array<{}>", render_inner(inner)),
            },
        }
    }
}

fn render_inner(terms: &[TypeTerm]) -> String {
    terms.iter().map(TypeTerm::render).collect::<Vec<_>>().join("|")
}

/// Drop the closing `>` of a generic. Unbalanced input keeps its tail.
fn strip_closing<'a>(inner: &'a str, whole: &str) -> &'a str {
    match inner.trim_end().strip_suffix('>') {
        Some(stripped) => stripped.trim(),
        None => {
            warn!("unbalanced generic brackets in type `{}`", whole);
            inner.trim()
        }
    }
}

fn parse_terms(raw: &str) -> Vec<TypeTerm> {
    split_top_level(raw).into_iter().map(TypeTerm::parse).collect()
}

/// Split a type string on `|` at generic depth zero.
///
/// A `>` without a matching `<` never drives the depth negative, and an
/// unclosed `<` keeps the rest of the string in one alternative.
pub fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut unbalanced = false;

    for (i, ch) in raw.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => unbalanced = true,
            },
            '|' if depth == 0 => {
                parts.push(raw[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(raw[start..].trim());

    if unbalanced || depth != 0 {
        warn!("unbalanced generic brackets in type `{}`", raw);
    }

    parts.retain(|p| !p.is_empty());
    parts
}

/// A deduplicated union of type terms.
///
/// Rendering sorts the terms and is cached until [`TypeSet::add_any`]
/// changes the set.
#[derive(Debug, Clone, Default)]
pub struct TypeSet {
    terms: IndexMap<String, TypeTerm>,
    rendered: OnceCell<String>,
}

impl TypeSet {
    pub fn parse(raw: &str) -> Self {
        Self::from_terms(parse_terms(raw))
    }

    pub fn from_terms(terms: impl IntoIterator<Item = TypeTerm>) -> Self {
        let mut set = TypeSet::default();
        for term in terms {
            set.terms.entry(term.render()).or_insert(term);
        }
        set
    }

    /// The union of two sets.
    pub fn union(&self, other: &TypeSet) -> TypeSet {
        Self::from_terms(self.terms.values().chain(other.terms.values()).cloned())
    }

    fn len(&self) -> usize {
        self.terms.len()
    }

    /// Membership by canonical rendering, e.g. `"any"` or `"string[]"`.
    pub fn contains(&self, rendered: &str) -> bool {
        self.terms.contains_key(rendered)
    }

    fn is_only(&self, name: &str) -> bool {
        self.len() == 1 && self.contains(name)
    }

    pub fn is_any(&self) -> bool {
        self.is_only(ANY)
    }

    pub fn is_void(&self) -> bool {
        self.is_only(VOID)
    }

    pub fn is_this(&self) -> bool {
        self.is_only(THIS)
    }

    /// True when the set is exactly one array term.
    pub fn is_array(&self) -> bool {
        self.len() == 1 && matches!(self.terms.values().next(), Some(TypeTerm::Array(_)))
    }

    /// The name of the only term, when the set is a single plain name.
    pub fn single_name(&self) -> Option<&str> {
        match self.terms.values().next() {
            Some(TypeTerm::Basic(name)) if self.len() == 1 => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn add_any(&mut self) {
        if !self.contains(ANY) {
            self.terms
                .insert(ANY.to_string(), TypeTerm::Basic(ANY.to_string()));
            self.rendered.take();
        }
    }

    /// Structural equality: same terms, in any order.
    pub fn is_equal(&self, other: &TypeSet) -> bool {
        self.len() == other.len() && self.terms.keys().all(|k| other.terms.contains_key(k))
    }

    pub fn render(&self) -> &str {
        self.rendered.get_or_init(|| {
            let mut parts: Vec<&str> = self.terms.keys().map(String::as_str).collect();
            parts.sort_unstable();
            parts.join(" | ")
        })
    }

    /// Rendering for a rest parameter, which must be an array type.
    pub fn render_as_array(&self) -> String {
        if self.is_array() {
            return self.render().to_string();
        }
        let terms: Vec<TypeTerm> = self.terms.values().cloned().collect();
        TypeTerm::Array(terms).render()
    }
}

impl PartialEq for TypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}
