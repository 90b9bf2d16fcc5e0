//! Speculative shape-only probe batches.
//!
//! Result-set shapes are discovered by executing the procedure with
//! placeholder arguments under `SET FMTONLY ON`, which reports column
//! layout without producing rows. The placeholders are chosen per declared
//! type family; procedures whose result shape depends on parameter values
//! may report an incomplete shape. That is a known approximation of this
//! strategy, and the failure lands on the signature, not the run.

use sprocgen_core::SqlTypeCategory;
use uuid::Uuid;

use crate::descriptor::{ParameterDescriptor, ProcedureRef};

/// The literal substituted for a parameter in a shape-only call.
pub fn placeholder_literal(category: SqlTypeCategory) -> String {
    if category.accepts_numeric_placeholder() {
        "1".to_string()
    } else if category.is_temporal() {
        "'1/1/2000'".to_string()
    } else if category == SqlTypeCategory::UniqueIdentifier {
        format!("'{}'", Uuid::nil())
    } else {
        // strings, text, variant, and anything unknown
        "''".to_string()
    }
}

/// Build the shape-only batch for one procedure. Only input and output
/// parameters participate in the call.
pub fn probe_batch(procedure: &ProcedureRef, parameters: &[ParameterDescriptor]) -> String {
    let mut batch = String::from("SET FMTONLY ON\nEXEC ");
    batch.push_str(&procedure.qualified_name());

    let mut first = true;
    for p in parameters {
        if !p.is_input() && !p.is_output() {
            continue;
        }
        if first {
            batch.push(' ');
        } else {
            batch.push_str(", ");
        }
        first = false;
        batch.push_str(&p.name);
        batch.push('=');
        batch.push_str(&placeholder_literal(p.category()));
    }

    batch.push_str("\nSET FMTONLY OFF\n");
    batch
}
