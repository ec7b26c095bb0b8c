//! Builds the declaration forest from a flat list of dotted-name symbols.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::api::{basename, Symbol};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::nodes::DeclarationNode;
use crate::overrides::{reconcile_overrides, ClassIndex};

/// Build the forest for `symbols`, index its classes and reconcile method
/// overrides.
pub fn build_forest(config: &GeneratorConfig, symbols: &[Symbol]) -> Result<Vec<DeclarationNode>> {
    let mut sorted: Vec<&Symbol> = symbols.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut forest = build_level(config, &sorted, 0)?;

    let index = ClassIndex::build(&forest)?;
    debug!("indexed {} classes", index.len());
    reconcile_overrides(&mut forest, &index);

    Ok(forest)
}

/// The first `segments` segments of a dotted name.
fn prefix(name: &str, segments: usize) -> &str {
    match name.match_indices('.').nth(segments.saturating_sub(1)) {
        Some((end, _)) if segments > 0 => &name[..end],
        _ => name,
    }
}

fn build_level(
    config: &GeneratorConfig,
    symbols: &[&Symbol],
    depth: usize,
) -> Result<Vec<DeclarationNode>> {
    let prefixes: IndexSet<&str> = symbols
        .iter()
        .map(|symbol| prefix(&symbol.name, depth + 1))
        .collect();

    let mut nodes = Vec::new();
    for prefix in prefixes {
        if config.ignore.namespaces.matches(prefix, basename(prefix)) {
            debug!("ignoring namespace {}", prefix);
            continue;
        }

        let nested = format!("{}.", prefix);
        let descendants: Vec<&Symbol> = symbols
            .iter()
            .copied()
            .filter(|symbol| symbol.name.starts_with(&nested))
            .collect();
        let children = build_level(config, &descendants, depth + 1)?;

        let mut exact = symbols.iter().copied().filter(|symbol| symbol.name == prefix);
        match exact.next() {
            Some(symbol) => {
                nodes.push(DeclarationNode::build(config, symbol, depth, children)?);
                for duplicate in exact {
                    warn!("symbol {} is declared more than once", duplicate.name);
                    nodes.push(DeclarationNode::build(config, duplicate, depth, Vec::new())?);
                }
            }
            None => {
                let implicit = Symbol::implicit_namespace(prefix);
                nodes.push(DeclarationNode::build(config, &implicit, depth, children)?);
            }
        }
    }
    Ok(nodes)
}
