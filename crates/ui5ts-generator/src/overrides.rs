//! Class index and override reconciliation.
//!
//! TypeScript checks every method override against the method it overrides.
//! The API documentation does not always agree with itself across a class
//! hierarchy, so after the forest is built each class method is aligned with
//! the nearest ancestor method of the same name and staticness.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::api::Visibility;
use crate::error::{GeneratorError, Result};
use crate::nodes::{Class, DeclarationNode, Method};
use crate::types::{TypeSet, ANY};

/// Lookups over the classes of a forest: by full name and by base class.
#[derive(Debug, Default)]
pub struct ClassIndex {
    /// Child-index path from the forest root to each class.
    paths: HashMap<String, Vec<usize>>,
    bases: HashMap<String, String>,
    subclasses: HashMap<String, Vec<String>>,
}

impl ClassIndex {
    /// Index every class in `forest`. Two classes with the same full name are
    /// a [`GeneratorError::StructuralConflict`].
    pub fn build(forest: &[DeclarationNode]) -> Result<Self> {
        let mut index = ClassIndex::default();
        let mut path = Vec::new();
        index.collect(forest, &mut path)?;
        for subclasses in index.subclasses.values_mut() {
            subclasses.sort();
        }
        Ok(index)
    }

    fn collect(&mut self, nodes: &[DeclarationNode], path: &mut Vec<usize>) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            path.push(i);
            if let Some(class) = node.as_class() {
                let name = class.full_name().to_string();
                if self.paths.contains_key(&name) {
                    return Err(GeneratorError::StructuralConflict { full_name: name });
                }
                if let Some(base) = &class.base {
                    self.bases.insert(name.clone(), base.clone());
                    self.subclasses
                        .entry(base.clone())
                        .or_default()
                        .push(name.clone());
                }
                self.paths.insert(name, path.clone());
            }
            self.collect(node.children(), path)?;
            path.pop();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn base_of(&self, name: &str) -> Option<&str> {
        self.bases.get(name).map(String::as_str)
    }

    /// Direct subclasses, sorted by name.
    pub fn subclasses(&self, name: &str) -> &[String] {
        self.subclasses.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes whose base class is not part of the index, sorted by name.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .paths
            .keys()
            .filter(|name| self.base_of(name).map_or(true, |base| !self.contains(base)))
            .map(String::as_str)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn descends_from(&self, class: &str, ancestor: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(class);
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            if !visited.insert(name) {
                return false;
            }
            current = self.base_of(name);
        }
        false
    }

    pub fn class<'f>(&self, forest: &'f [DeclarationNode], name: &str) -> Option<&'f Class> {
        let (first, rest) = self.paths.get(name)?.split_first()?;
        let mut node = forest.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        node.as_class()
    }

    pub fn class_mut<'f>(
        &self,
        forest: &'f mut [DeclarationNode],
        name: &str,
    ) -> Option<&'f mut Class> {
        let (first, rest) = self.paths.get(name)?.split_first()?;
        let mut node = forest.get_mut(*first)?;
        for &i in rest {
            node = node.children_mut().get_mut(i)?;
        }
        node.as_class_mut()
    }
}

/// Changes to one subclass method, computed against its ancestor.
#[derive(Debug, Default)]
struct Reconciliation {
    return_types: Option<TypeSet>,
    promote: bool,
    ignore: bool,
}

/// Align every class method with the method it overrides, walking each
/// inheritance tree from its root so fixes made to a class are seen by its
/// subclasses.
pub fn reconcile_overrides(forest: &mut [DeclarationNode], index: &ClassIndex) {
    let mut visited = HashSet::new();
    let mut stack: Vec<String> = index.roots().into_iter().rev().map(String::from).collect();

    while let Some(name) = stack.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        reconcile_class(forest, index, &name);
        stack.extend(index.subclasses(&name).iter().rev().cloned());
    }

    if visited.len() < index.len() {
        let mut unreached: Vec<&String> = index
            .paths
            .keys()
            .filter(|name| !visited.contains(*name))
            .collect();
        unreached.sort();
        warn!(
            "cyclic base class chain, overrides not reconciled for: {:?}",
            unreached
        );
    }
}

fn reconcile_class(forest: &mut [DeclarationNode], index: &ClassIndex, name: &str) {
    let Some(class) = index.class(forest, name) else {
        return;
    };

    let mut changes = Vec::new();
    for (i, method) in class.methods.iter().enumerate() {
        if method.is_constructor() {
            continue;
        }
        if let Some((ancestor, base)) = overridden_method(forest, index, name, method) {
            let change = reconcile_method(index, name, method, ancestor, base);
            if change.return_types.is_some() || change.promote || change.ignore {
                changes.push((i, change));
            }
        }
    }

    let Some(class) = index.class_mut(forest, name) else {
        return;
    };
    for (i, change) in changes {
        let Some(method) = class.methods.get_mut(i) else {
            continue;
        };
        if let Some(types) = change.return_types {
            debug!(
                "{}: return type {} -> {}",
                method.full_name, method.return_value.types, types
            );
            method.return_value.types = types;
        }
        if change.promote {
            debug!("{}: promoted to public", method.full_name);
            method.visibility = Visibility::Public;
        }
        if change.ignore {
            debug!("{}: redundant override", method.full_name);
            method.ignore = true;
        }
    }
}

/// The nearest ancestor declaring a method with the same name and
/// staticness, with that method.
fn overridden_method<'f>(
    forest: &'f [DeclarationNode],
    index: &ClassIndex,
    class: &str,
    method: &Method,
) -> Option<(&'f str, &'f Method)> {
    let mut visited = HashSet::new();
    let mut current = index.base_of(class);
    while let Some(name) = current {
        if !visited.insert(name) {
            return None;
        }
        let ancestor = index.class(forest, name)?;
        let found = ancestor.methods.iter().find(|m| {
            !m.is_constructor() && m.name == method.name && m.is_static == method.is_static
        });
        if let Some(base) = found {
            return Some((ancestor.full_name(), base));
        }
        current = index.base_of(name);
    }
    None
}

fn reconcile_method(
    index: &ClassIndex,
    class: &str,
    method: &Method,
    ancestor: &str,
    base: &Method,
) -> Reconciliation {
    let mut change = Reconciliation::default();
    let ours = &method.return_value.types;
    let theirs = &base.return_value.types;

    if !returns_compatible(index, ours, theirs) && !ours.is_this() {
        let replacement = if theirs.render() == ancestor {
            TypeSet::parse(class)
        } else {
            theirs.clone()
        };
        if replacement.render() != ANY {
            change.return_types = Some(replacement);
        }
    }

    if base.visibility == Visibility::Public && method.visibility != Visibility::Public {
        change.promote = true;
    }

    if !method.is_static {
        let effective_return = change.return_types.as_ref().unwrap_or(ours);
        change.ignore = method.is_identical_to(base, effective_return);
    }
    change
}

fn returns_compatible(index: &ClassIndex, ours: &TypeSet, theirs: &TypeSet) -> bool {
    if ours == theirs || theirs.is_void() || ours.is_any() || ours.is_this() {
        return true;
    }
    match (ours.single_name(), theirs.single_name()) {
        (Some(ours), Some(theirs)) => index.descends_from(ours, theirs),
        _ => false,
    }
}
