//! Error types for declaration generation.

use thiserror::Error;

use crate::api::SymbolKind;

/// Errors that abort a generation run.
///
/// The generated declarations are consumed by a type checker that treats them
/// as ground truth, so none of these are recovered from.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Two class declarations share the same fully-qualified name.
    #[error("class `{full_name}` is declared more than once")]
    StructuralConflict { full_name: String },

    /// A member was attached to a declaration kind that cannot own it.
    #[error("{kind} `{owner}` cannot own {member} `{name}`")]
    InvalidKindForMember {
        owner: String,
        kind: SymbolKind,
        member: &'static str,
        name: String,
    },

    /// The overload synthesizer misused a parameter.
    #[error("parameter `{parameter}` of `{method}`: {message}")]
    InvariantViolation {
        method: String,
        parameter: String,
        message: &'static str,
    },
}

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
