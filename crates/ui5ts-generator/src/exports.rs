//! Module export stubs.
//!
//! UI5 modules are loaded by path (`sap/m/Button`). For each class, enum and
//! module-backed namespace a stub `export default <name>;` is generated at
//! the module's path, mapping the module to its global declaration.

use crate::api::{Symbol, SymbolKind};

/// One generated stub, relative to the exports directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStub {
    /// Relative path such as `sap/m/Button.d.ts`.
    pub path: String,
    pub content: String,
}

/// The stub for a symbol, if it gets one.
pub fn export_stub(symbol: &Symbol) -> Option<ExportStub> {
    if symbol.name.to_ascii_lowercase().starts_with("jquery") {
        return None;
    }

    let module_path = symbol.name.replace('.', "/");
    let path = match symbol.kind {
        SymbolKind::Namespace => {
            if symbol.module.as_deref() != Some(module_path.as_str()) {
                return None;
            }
            match symbol.resource.as_deref() {
                Some(resource) => match resource.strip_suffix(".js") {
                    Some(stem) => format!("{}.d.ts", stem),
                    None => resource.to_string(),
                },
                None => format!("{}.d.ts", module_path),
            }
        }
        SymbolKind::Class | SymbolKind::Enum => format!("{}.d.ts", module_path),
        SymbolKind::Interface | SymbolKind::Typedef => return None,
    };

    Some(ExportStub {
        path,
        content: format!("export default {};", symbol.name),
    })
}

/// Stubs for every exported symbol, in input order.
pub fn export_stubs<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> Vec<ExportStub> {
    symbols.into_iter().filter_map(export_stub).collect()
}
