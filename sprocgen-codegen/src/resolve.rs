//! Policy resolution: return strategy and class destination.

use sprocgen_catalog::ProcedureSignature;
use sprocgen_options::{GlobalOptions, ProcedureOptions, ReturnKind};

use crate::error::GenerateError;

/// The fully resolved return strategy for one wrapper method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnStrategy {
    /// No result: output values travel through out-parameters.
    None,
    /// Untyped multi-row dataset.
    DataSet,
    /// Row stream.
    DataReader,
    /// Named typed dataset.
    TypedDataSet(String),
}

/// Where a procedure's method pair lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Directly on the root class.
    Root { method: String },
    /// On a nested class created on first use.
    Class { class: String, method: String },
}

impl Destination {
    pub fn method(&self) -> &str {
        match self {
            Destination::Root { method } | Destination::Class { method, .. } => method,
        }
    }
}

/// Resolve the effective return strategy.
///
/// An unspecified override counts as Auto. Auto prefers a configured typed
/// dataset, then the global default strategy when the probe reported result
/// sets, then no result at all. A TypedDataSet request with no configured
/// name is generation-fatal.
pub fn effective_return(
    signature: &ProcedureSignature,
    options: &ProcedureOptions,
    auto_return: ReturnKind,
) -> Result<ReturnStrategy, GenerateError> {
    let requested = options.return_kind.unwrap_or(ReturnKind::Auto);
    let strategy = match requested {
        ReturnKind::Auto => {
            if let Some(name) = &options.typed_result {
                ReturnStrategy::TypedDataSet(name.clone())
            } else if signature.has_result_sets() {
                match auto_return {
                    ReturnKind::DataSet => ReturnStrategy::DataSet,
                    ReturnKind::None => ReturnStrategy::None,
                    // options loading pins AutoReturnType to a concrete
                    // strategy, so anything else is the reader default
                    _ => ReturnStrategy::DataReader,
                }
            } else {
                ReturnStrategy::None
            }
        }
        ReturnKind::TypedDataSet => match &options.typed_result {
            Some(name) => ReturnStrategy::TypedDataSet(name.clone()),
            None => {
                return Err(GenerateError::TypedResultMissingName {
                    procedure: signature.procedure.qualified_name(),
                });
            }
        },
        ReturnKind::DataSet => ReturnStrategy::DataSet,
        ReturnKind::DataReader => ReturnStrategy::DataReader,
        ReturnKind::None => ReturnStrategy::None,
    };
    Ok(strategy)
}

/// Resolve the destination class and method name.
///
/// Mapping rules are tried in declaration order and the first full match
/// wins, consuming its prefix from the method name. With no rule match, the
/// default mapping synthesizes a class/method pair from the name; failing
/// that, the procedure keeps its plain name on the root class.
pub fn resolve_destination(signature: &ProcedureSignature, options: &GlobalOptions) -> Destination {
    let name = signature.procedure.method_name();

    for rule in &options.mappings {
        if let Some(method) = rule.resolve(&signature.procedure.schema, &name) {
            return Destination::Class {
                class: rule.class.clone(),
                method,
            };
        }
    }

    if let Some(dm) = &options.default_mapping {
        if let Some((class, method)) = dm.resolve(&name) {
            return Destination::Class { class, method };
        }
    }

    Destination::Root { method: name }
}
