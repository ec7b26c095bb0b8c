//! Overload synthesis.
//!
//! TypeScript rejects an optional parameter in front of a required one, but
//! the API documentation is full of them (`attachEvent(oData?, fnFunction,
//! oListener?)`). Each documented signature is expanded into the call
//! signatures that cover the same call shapes without breaking that rule.

use tracing::debug;

use crate::error::Result;
use crate::nodes::Parameter;

/// The expanded signatures of one documented parameter list.
#[derive(Debug, Default)]
pub struct Synthesis {
    /// Parameter lists, in emission order.
    pub signatures: Vec<Vec<Parameter>>,
    /// An optional run of three or more parameters was found; the method
    /// needs the catch-all `(...args: any[]): any` overload.
    pub needs_compatibility_overload: bool,
}

/// Expand `parameters` into valid signatures. The input list is not touched.
pub fn synthesize(parameters: &[Parameter]) -> Result<Synthesis> {
    let mut synthesis = Synthesis::default();
    expand(parameters.to_vec(), &mut synthesis)?;
    Ok(synthesis)
}

fn expand(parameters: Vec<Parameter>, out: &mut Synthesis) -> Result<()> {
    let Some((start, end)) = optional_run_before_required(&parameters) else {
        log_trailing_incompatibility(&parameters);
        out.signatures.push(parameters);
        return Ok(());
    };

    let forced = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if (start..end).contains(&i) {
                p.as_required()
            } else {
                Ok(p.clone())
            }
        })
        .collect::<Result<Vec<_>>>()?;
    expand(forced, out)?;

    let removed = splice(&parameters, start, end, None);
    expand(removed, out)?;

    let run = &parameters[start..end];
    match run {
        [_] => {}
        [first, second] => {
            if !first.elision_compatible(second) {
                let merged = Parameter::merge(first, second);
                expand(splice(&parameters, start, end, Some(merged)), out)?;
            }
        }
        _ => out.needs_compatibility_overload = true,
    }
    Ok(())
}

/// The first optional run directly followed by a required parameter, as a
/// `start..end` index range.
fn optional_run_before_required(parameters: &[Parameter]) -> Option<(usize, usize)> {
    let start = parameters.iter().position(|p| p.optional)?;
    let offset = parameters[start..].iter().position(|p| !p.optional)?;
    Some((start, start + offset))
}

/// Replace `start..end` with `replacement` (or nothing).
fn splice(
    parameters: &[Parameter],
    start: usize,
    end: usize,
    replacement: Option<Parameter>,
) -> Vec<Parameter> {
    parameters[..start]
        .iter()
        .cloned()
        .chain(replacement)
        .chain(parameters[end..].iter().cloned())
        .collect()
}

/// Trailing optionals are already expressible as written. A pair whose later
/// member cannot stand in for the earlier one is only reported.
fn log_trailing_incompatibility(parameters: &[Parameter]) {
    let trailing = parameters
        .iter()
        .rposition(|p| !p.optional)
        .map_or(0, |i| i + 1);
    for pair in parameters[trailing..].windows(2) {
        if !pair[0].elision_compatible(&pair[1]) {
            debug!(
                "optional `{}` cannot be elided in favour of `{}`",
                pair[0].name, pair[1].name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ParameterSymbol;
    use crate::config::GeneratorConfig;

    fn params(spec: &[(&str, &str, bool)]) -> Vec<Parameter> {
        let config = GeneratorConfig::default();
        spec.iter()
            .map(|(name, ty, optional)| {
                let symbol = ParameterSymbol {
                    name: name.to_string(),
                    ty: Some(ty.to_string()),
                    optional: *optional,
                    ..Default::default()
                };
                Parameter::new(&config, &symbol, "x.C.m").unwrap()
            })
            .collect()
    }

    fn shapes(synthesis: &Synthesis) -> Vec<String> {
        synthesis
            .signatures
            .iter()
            .map(|sig| sig.iter().map(Parameter::render).collect::<Vec<_>>().join(", "))
            .collect()
    }

    #[test]
    fn test_no_optionals() {
        let ps = params(&[("a", "string", false), ("b", "int", false)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(shapes(&synthesis), vec!["a: string, b: int"]);
        assert!(!synthesis.needs_compatibility_overload);
    }

    #[test]
    fn test_single_optional_before_required() {
        let ps = params(&[("a", "string", true), ("b", "int", false)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(shapes(&synthesis), vec!["a: string, b: int", "b: int"]);
        assert!(ps[0].optional, "input list must not change");
    }

    #[test]
    fn test_incompatible_trailing_optionals_are_kept() {
        let ps = params(&[("a", "string", true), ("b", "number", true)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(shapes(&synthesis), vec!["a?: string, b?: number"]);
    }

    #[test]
    fn test_compatible_pair_is_not_merged() {
        let ps = params(&[("a", "string", true), ("b", "string", true), ("c", "int", false)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(
            shapes(&synthesis),
            vec!["a: string, b: string, c: int", "c: int"]
        );
    }

    #[test]
    fn test_incompatible_pair_is_merged() {
        let ps = params(&[("a", "string", true), ("b", "number", true), ("c", "int", false)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(
            shapes(&synthesis),
            vec![
                "a: string, b: number, c: int",
                "c: int",
                "a_or_b: number | string, c: int",
            ]
        );
        assert!(!synthesis.needs_compatibility_overload);
    }

    #[test]
    fn test_any_typed_second_is_compatible() {
        let ps = params(&[("a", "string", true), ("b", "any", true), ("c", "int", false)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(synthesis.signatures.len(), 2);
    }

    #[test]
    fn test_long_run_needs_compatibility_overload() {
        let ps = params(&[
            ("a", "string", true),
            ("b", "int", true),
            ("c", "boolean", true),
            ("d", "object", false),
        ]);
        let synthesis = synthesize(&ps).unwrap();
        assert!(synthesis.needs_compatibility_overload);
        assert_eq!(
            shapes(&synthesis),
            vec!["a: string, b: int, c: boolean, d: object", "d: object"]
        );
    }

    #[test]
    fn test_multiple_violations_recurse() {
        // attachEvent(oData?, fnFunction, oListener?, sExtra)
        let ps = params(&[
            ("oData", "object", true),
            ("fnFunction", "Function", false),
            ("oListener", "object", true),
            ("sExtra", "string", false),
        ]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(
            shapes(&synthesis),
            vec![
                "oData: object, fnFunction: Function, oListener: object, sExtra: string",
                "oData: object, fnFunction: Function, sExtra: string",
                "fnFunction: Function, oListener: object, sExtra: string",
                "fnFunction: Function, sExtra: string",
            ]
        );
        for sig in &synthesis.signatures {
            let first_optional = sig.iter().position(|p| p.optional);
            let last_required = sig.iter().rposition(|p| !p.optional);
            if let (Some(o), Some(r)) = (first_optional, last_required) {
                assert!(o > r, "optional before required in {:?}", sig);
            }
        }
    }

    #[test]
    fn test_optional_after_violation_stays_optional() {
        let ps = params(&[("a", "string", true), ("b", "int", false), ("c", "boolean", true)]);
        let synthesis = synthesize(&ps).unwrap();
        assert_eq!(
            shapes(&synthesis),
            vec!["a: string, b: int, c?: boolean", "b: int, c?: boolean"]
        );
    }
}
