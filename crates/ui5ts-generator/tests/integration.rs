//! End-to-end tests: `api.json` documents in, declaration text out.

use ui5ts_generator::{ApiDocument, Generator, GeneratorConfig, GeneratorError};

const CORE: &str = r#"{
    "library": "sap.ui.core",
    "version": "1.60.14",
    "symbols": [
        {
            "kind": "namespace",
            "name": "sap.ui.core",
            "description": "The SAPUI5 Core Runtime."
        },
        {
            "kind": "class",
            "name": "sap.ui.core.Element",
            "extends": "sap.ui.base.ManagedObject",
            "module": "sap/ui/core/Element",
            "methods": [
                {
                    "name": "setTooltip",
                    "parameters": [{ "name": "vTooltip", "type": "string|sap.ui.core.TooltipBase" }],
                    "returnValue": { "type": "sap.ui.core.Element", "description": "Returns <code>this</code>" }
                },
                {
                    "name": "clone",
                    "parameters": [
                        { "name": "sIdSuffix", "type": "string", "optional": true },
                        { "name": "aLocalIds", "type": "string[]", "optional": true }
                    ],
                    "returnValue": { "type": "sap.ui.core.Element" }
                },
                {
                    "name": "getId",
                    "returnValue": { "type": "string" }
                }
            ]
        },
        {
            "kind": "class",
            "name": "sap.ui.core.Control",
            "extends": "sap.ui.core.Element",
            "constructor": {
                "parameters": [
                    { "name": "sId", "type": "string", "optional": true },
                    { "name": "mSettings", "type": "object", "optional": true }
                ]
            },
            "methods": [
                {
                    "name": "getId",
                    "returnValue": { "type": "string" }
                },
                {
                    "name": "attachBrowserEvent",
                    "visibility": "public",
                    "parameters": [
                        { "name": "sEventType", "type": "string", "optional": true },
                        { "name": "fnHandler", "type": "Function", "optional": true },
                        { "name": "oListener", "type": "object", "optional": true },
                        { "name": "oExtra", "type": "object" }
                    ],
                    "returnValue": { "type": "sap.ui.core.Control" }
                },
                {
                    "name": "clone",
                    "visibility": "protected",
                    "returnValue": { "type": "sap.ui.core.Element" }
                }
            ]
        },
        {
            "kind": "enum",
            "name": "sap.ui.core.ValueState",
            "deprecated": { "since": "1.50", "text": "Use sap.ui.core.MessageType" },
            "properties": [{ "name": "Error" }, { "name": "None" }]
        },
        {
            "kind": "interface",
            "name": "sap.ui.core.IFormContent",
            "methods": [{ "name": "getFormDoNotAdjustWidth", "returnValue": { "type": "boolean" } }]
        }
    ]
}"#;

const MOBILE: &str = r#"{
    "library": "sap.m",
    "symbols": [
        {
            "kind": "class",
            "name": "sap.m.Button",
            "extends": "sap.ui.core.Control",
            "methods": [
                {
                    "name": "attachPress",
                    "parameters": [
                        { "name": "oData", "type": "object", "optional": true },
                        { "name": "fnFunction", "type": "Function" },
                        { "name": "oListener", "type": "object", "optional": true }
                    ],
                    "returnValue": { "type": "sap.m.Button" }
                },
                {
                    "name": "getId",
                    "returnValue": { "type": "string" }
                }
            ]
        },
        {
            "kind": "typedef",
            "name": "sap.m.ButtonSettings",
            "properties": [
                { "name": "text", "type": "string", "optional": true },
                { "name": "width", "type": "sap.ui.core.CSSSize", "optional": true }
            ]
        }
    ]
}"#;

fn generate(config: GeneratorConfig, documents: &[&str]) -> ui5ts_generator::GeneratorOutput {
    let documents = documents
        .iter()
        .map(|json| ApiDocument::from_json(json).unwrap())
        .collect();
    Generator::new(config).generate(documents).unwrap()
}

fn definitions(config: GeneratorConfig) -> String {
    let output = generate(config, &[CORE, MOBILE]);
    assert_eq!(output.definitions.len(), 1);
    assert_eq!(output.definitions[0].file_name, "sap.d.ts");
    output.definitions[0].content.clone()
}

#[test]
fn test_outline_and_line_endings() {
    let content = definitions(GeneratorConfig::default());

    assert!(content.starts_with("declare namespace sap {\r\n"));
    assert!(content.contains("    namespace ui {\r\n"));
    assert!(content.contains("            export class Element extends sap.ui.base.ManagedObject {\r\n"));
    assert!(content.contains("            export class Control extends sap.ui.core.Element {\r\n"));
    assert!(content.contains("        export class Button extends sap.ui.core.Control {\r\n"));
    assert!(content.contains("            export interface IFormContent {\r\n"));
    assert!(content.contains("        export type ButtonSettings = {\r\n"));
    assert!(content.contains("            text?: string;\r\n"));
    assert!(!content.replace("\r\n", "").contains('\n'), "bare LF in output");
}

#[test]
fn test_enum_and_deprecation() {
    let content = definitions(GeneratorConfig::default());
    assert!(content.contains("@deprecated since 1.50 - Use sap.ui.core.MessageType"));
    assert!(content.contains("export enum ValueState {\r\n"));
    assert!(content.contains("Error = \"Error\",\r\n"));
    assert!(content.contains("None = \"None\",\r\n"));
}

#[test]
fn test_methods_returning_own_class_return_this() {
    let content = definitions(GeneratorConfig::default());
    assert!(content.contains(
        "public setTooltip(vTooltip: sap.ui.core.TooltipBase | string): this;"
    ));
    assert!(content.contains("public clone(sIdSuffix?: string, aLocalIds?: string[]): this;"));
}

#[test]
fn test_overloads_for_leading_optionals() {
    let content = definitions(GeneratorConfig::default());

    assert!(content.contains(
        "public attachPress(oData: object, fnFunction: Function, oListener?: object): this;"
    ));
    assert!(content.contains("public attachPress(fnFunction: Function, oListener?: object): this;"));
    assert!(content.contains("public attachBrowserEvent(oExtra: object): this;"));
    assert_eq!(
        content
            .matches("public attachBrowserEvent(...args: any[]): any;")
            .count(),
        1
    );
    assert!(content.contains("public constructor(sId?: string, mSettings?: object);"));
}

#[test]
fn test_overrides_are_reconciled() {
    let content = definitions(GeneratorConfig::default());

    // Identical `getId` overrides are not repeated in subclasses.
    assert_eq!(content.matches("public getId(): string;").count(), 1);

    // `Control.clone` is promoted to public and returns `this` like `Element.clone`.
    assert!(content.contains("public clone(): this;"));
    assert!(!content.contains("protected clone"));
}

#[test]
fn test_configuration_is_applied() {
    let config = GeneratorConfig::parse(
        r#"
[output]
indentation = "\t"

[ignore]
namespaces = ["sap.m"]

[replacements.global]
"sap.ui.core.TooltipBase" = "any"

[[additions."sap.ui.core"]]
kind = "typedef"
name = "sap.ui.core.CSSSize"
"#,
    )
    .unwrap();
    let output = generate(config, &[CORE, MOBILE]);
    let content = &output.definitions[0].content;

    assert!(content.contains("\t\t\texport class Element"));
    assert!(!content.contains("class Button"));
    assert!(content.contains("public setTooltip(vTooltip: any | string): this;"));
    assert!(content.contains("export type CSSSize = any;"));
}

#[test]
fn test_index_and_exports() {
    let output = generate(GeneratorConfig::default(), &[CORE, MOBILE]);
    assert_eq!(output.version.as_deref(), Some("1.60.14"));
    assert_eq!(output.index, "/// <reference path=\"./sap.d.ts\" />");

    let paths: Vec<&str> = output.exports.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "sap/ui/core/Element.d.ts",
            "sap/ui/core/Control.d.ts",
            "sap/ui/core/ValueState.d.ts",
            "sap/m/Button.d.ts",
        ]
    );
    assert_eq!(output.exports[3].content, "export default sap.m.Button;");
}

#[test]
fn test_duplicate_class_aborts_the_run() {
    let documents = vec![
        ApiDocument::from_json(MOBILE).unwrap(),
        ApiDocument::from_json(MOBILE).unwrap(),
    ];
    let err = Generator::new(GeneratorConfig::default())
        .generate(documents)
        .unwrap_err();
    assert!(matches!(err, GeneratorError::StructuralConflict { .. }));
    assert_eq!(err.to_string(), "class `sap.m.Button` is declared more than once");
}

#[test]
fn test_enum_with_methods_aborts_the_run() {
    let document = ApiDocument::from_json(
        r#"{
            "library": "x",
            "symbols": [
                {
                    "kind": "enum",
                    "name": "x.E",
                    "properties": [{ "name": "A" }],
                    "methods": [{ "name": "parse" }]
                }
            ]
        }"#,
    )
    .unwrap();
    let err = Generator::new(GeneratorConfig::default())
        .generate(vec![document])
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::InvalidKindForMember { member: "method", .. }
    ));
}

#[test]
fn test_jquery_types_are_referenced_with_typeof() {
    let document = ApiDocument::from_json(
        r#"{
            "library": "x",
            "symbols": [
                {
                    "kind": "namespace",
                    "name": "x",
                    "methods": [
                        { "name": "f", "parameters": [{ "name": "oEvent", "type": "jQuery.Event" }] }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    let output = Generator::new(GeneratorConfig::default())
        .generate(vec![document])
        .unwrap();
    assert!(output.definitions[0]
        .content
        .contains("function f(oEvent: typeof jQuery.Event): void;"));
}
