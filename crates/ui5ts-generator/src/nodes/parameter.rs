//! Method parameters.

use crate::api::{basename, ParameterSymbol};
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::types::{TypeSet, ANY};
use crate::writer::single_line;

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub types: TypeSet,
    pub optional: bool,
    pub spread: bool,
    pub description: String,
    /// Full name of the owning method.
    method: String,
}

impl Parameter {
    pub fn new(config: &GeneratorConfig, symbol: &ParameterSymbol, method: &str) -> Result<Self> {
        let full_name = format!("{}.{}", method, symbol.name);
        let method_base = basename(method);
        let specific = &config.replacements.specific;

        let raw = specific
            .method_parameter_type
            .lookup_parameter(&full_name, method_base, &symbol.name)
            .map(String::as_str)
            .or(symbol.ty.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(ANY);

        let parameter = Parameter {
            name: symbol.name.clone(),
            types: TypeSet::parse(&config.replacements.replace_types(raw, &full_name)),
            optional: symbol.optional,
            spread: symbol.spread,
            description: symbol.description.clone().unwrap_or_default(),
            method: method.to_string(),
        };

        if !parameter.optional
            && specific
                .method_parameter_optional
                .matches_parameter(&full_name, method_base, &symbol.name)
        {
            return parameter.as_optional();
        }
        Ok(parameter)
    }

    /// The catch-all rest parameter `...args: any[]`.
    pub fn rest_any(method: &str) -> Self {
        Parameter {
            name: "args".to_string(),
            types: TypeSet::parse("any[]"),
            optional: false,
            spread: true,
            description: String::new(),
            method: method.to_string(),
        }
    }

    /// A required copy of an optional parameter.
    pub fn as_required(&self) -> Result<Parameter> {
        if !self.optional {
            return Err(self.invariant("parameter is already required"));
        }
        Ok(Parameter {
            optional: false,
            ..self.clone()
        })
    }

    /// An optional copy of a required parameter.
    pub fn as_optional(&self) -> Result<Parameter> {
        if self.optional {
            return Err(self.invariant("parameter is already optional"));
        }
        Ok(Parameter {
            optional: true,
            ..self.clone()
        })
    }

    /// One required parameter accepting either of two: `a_or_b: A | B`.
    pub fn merge(first: &Parameter, second: &Parameter) -> Parameter {
        Parameter {
            name: format!("{}_or_{}", first.name, second.name),
            types: first.types.union(&second.types),
            optional: false,
            spread: false,
            description: String::new(),
            method: first.method.clone(),
        }
    }

    /// Whether `later` can be passed in this parameter's position when this
    /// one is left out.
    pub fn elision_compatible(&self, later: &Parameter) -> bool {
        self.types == later.types || later.types.is_any()
    }

    /// Same type set and optionality.
    pub fn is_equivalent(&self, other: &Parameter) -> bool {
        self.types == other.types && self.optional == other.optional
    }

    fn invariant(&self, message: &'static str) -> GeneratorError {
        GeneratorError::InvariantViolation {
            method: self.method.clone(),
            parameter: self.name.clone(),
            message,
        }
    }

    /// The name without generic annotations such as `<T>`.
    pub fn display_name(&self) -> String {
        let mut name = String::with_capacity(self.name.len());
        let mut depth = 0usize;
        for ch in self.name.chars() {
            match ch {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                _ if depth == 0 => name.push(ch),
                _ => {}
            }
        }
        name
    }

    pub fn render(&self) -> String {
        if self.spread {
            format!("...{}: {}", self.display_name(), self.types.render_as_array())
        } else {
            let optional = if self.optional { "?" } else { "" };
            format!("{}{}: {}", self.display_name(), optional, self.types)
        }
    }

    pub fn doc_tag(&self) -> String {
        let description = if self.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", single_line(&self.description))
        };
        format!("@param {{{}}} {}{}", self.types, self.name, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, ty: &str, optional: bool) -> ParameterSymbol {
        ParameterSymbol {
            name: name.to_string(),
            ty: Some(ty.to_string()),
            optional,
            ..Default::default()
        }
    }

    #[test]
    fn test_render() {
        let config = GeneratorConfig::default();
        let p = Parameter::new(&config, &symbol("sId", "string", true), "sap.m.Button.setId").unwrap();
        assert_eq!(p.render(), "sId?: string");

        let mut spread = symbol("vArgs", "any", false);
        spread.spread = true;
        let p = Parameter::new(&config, &spread, "sap.m.Button.fire").unwrap();
        assert_eq!(p.render(), "...vArgs: any[]");

        let p = Parameter::new(&config, &symbol("mSettings<T>", "object", false), "x.y").unwrap();
        assert_eq!(p.render(), "mSettings: object");
    }

    #[test]
    fn test_missing_type_defaults_to_any() {
        let config = GeneratorConfig::default();
        let sym = ParameterSymbol {
            name: "oData".to_string(),
            ..Default::default()
        };
        let p = Parameter::new(&config, &sym, "sap.ui.model.Model.setData").unwrap();
        assert!(p.types.is_any());
    }

    #[test]
    fn test_as_required_copies() {
        let config = GeneratorConfig::default();
        let p = Parameter::new(&config, &symbol("a", "string", true), "x.m").unwrap();
        let required = p.as_required().unwrap();
        assert!(p.optional);
        assert!(!required.optional);

        let err = required.as_required().unwrap_err();
        assert!(matches!(err, GeneratorError::InvariantViolation { .. }));
        assert!(p.as_optional().is_err());
    }

    #[test]
    fn test_configured_replacements() {
        let config = GeneratorConfig::parse(
            r#"
[replacements.global]
"int" = "number"

[replacements.specific]
method_parameter_optional = ["*.oListener"]

[replacements.specific.method_parameter_type]
"*.attachPress.fnFunction" = "Function"
"#,
        )
        .unwrap();

        let p = Parameter::new(&config, &symbol("iIndex", "int[]", false), "x.List.insert").unwrap();
        assert_eq!(p.render(), "iIndex: number[]");

        let p = Parameter::new(&config, &symbol("fnFunction", "any", false), "sap.m.Button.attachPress")
            .unwrap();
        assert_eq!(p.render(), "fnFunction: Function");

        let p = Parameter::new(&config, &symbol("oListener", "object", false), "sap.m.Button.attachPress")
            .unwrap();
        assert!(p.optional);
    }

    #[test]
    fn test_merge_and_compatibility() {
        let config = GeneratorConfig::default();
        let a = Parameter::new(&config, &symbol("a", "string", true), "x.m").unwrap();
        let b = Parameter::new(&config, &symbol("b", "number", true), "x.m").unwrap();
        let c = Parameter::new(&config, &symbol("c", "any", true), "x.m").unwrap();

        assert!(!a.elision_compatible(&b));
        assert!(a.elision_compatible(&c));
        assert!(a.elision_compatible(&a.clone()));

        let merged = Parameter::merge(&a, &b);
        assert_eq!(merged.render(), "a_or_b: number | string");
    }

    #[test]
    fn test_doc_tag() {
        let config = GeneratorConfig::default();
        let mut sym = symbol("sText", "string", false);
        sym.description = Some("The text\nto show".to_string());
        let p = Parameter::new(&config, &sym, "x.m").unwrap();
        assert_eq!(p.doc_tag(), "@param {string} sText - The text to show");
    }
}
