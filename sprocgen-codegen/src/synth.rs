//! Wrapper-method synthesis.
//!
//! Every procedure yields two methods: a plain variant that owns its
//! connection, and a transacted variant whose first parameter is the
//! caller's transaction. Both marshal arguments into a `SqlParameter`
//! array, dispatch to exactly one execution helper for the resolved return
//! strategy, and copy output-parameter values back out.

use sprocgen_catalog::ProcedureSignature;
use sprocgen_options::{GlobalOptions, ProcedureOptions};

use crate::{
    ast::{Expr, Method, Stmt, TypeRef},
    error::GenerateError,
    resolve::ReturnStrategy,
};

/// Longest `#warning` message carried into generated code.
const MAX_WARNING_LEN: usize = 200;

/// Synthesize one wrapper method.
pub fn synthesize_method(
    signature: &ProcedureSignature,
    procedure_options: &ProcedureOptions,
    strategy: &ReturnStrategy,
    options: &GlobalOptions,
    transacted: bool,
) -> Result<Method, GenerateError> {
    let mut method = Method::new(signature.procedure.method_name());

    method.return_type = match strategy {
        ReturnStrategy::TypedDataSet(name) => Some(TypeRef::named(name.clone())),
        ReturnStrategy::DataSet => Some(TypeRef::named("DataSet")),
        ReturnStrategy::DataReader => Some(TypeRef::named("SqlDataReader")),
        ReturnStrategy::None => None,
    };

    // Signature: the transaction handle first, then one parameter per
    // catalog parameter, nullable-typed when the policy says so.
    if transacted {
        method = method.param("trs", TypeRef::named("SqlTransaction"));
    }
    for p in &signature.parameters {
        let category = p.category();
        let ty = if procedure_options.is_nullable(&p.name) {
            TypeRef::named(category.wire_type())
        } else {
            TypeRef::named(category.native_type())
        };
        method = if p.is_output() {
            method.out_param(p.ident(), ty)
        } else {
            method.param(p.ident(), ty)
        };
    }

    if let Some(snippet) = &options.snippet_pre {
        method = method.statement(Stmt::snippet(snippet.clone()));
    }

    if let (Some(error), true) = (&signature.error, options.generate_warnings) {
        method = method.statement(Stmt::snippet(format!(
            "#warning {}: \"{}\"",
            signature.procedure.name,
            collapse_message(error)
        )));
    }

    // Build the call-parameter array plus the trailing statements it needs:
    // direction/size setup before the call, output copy-back after it.
    let mut entries = Vec::with_capacity(signature.parameters.len());
    let mut outputs = Vec::new();
    let mut assigns = Vec::new();
    for (i, p) in signature.parameters.iter().enumerate() {
        let category = p.category();
        let value = if p.is_input() {
            Expr::name(p.ident())
        } else {
            Expr::static_member("SqlDbType", category.sql_db_type())
        };
        entries.push(Expr::new_object(
            TypeRef::named("SqlParameter"),
            vec![Expr::str(p.name.clone()), value],
        ));

        if !p.is_output() {
            continue;
        }
        let slot = || Expr::index(Expr::name("parms"), Expr::int(i as i64));
        outputs.push(Stmt::assign(
            Expr::property(slot(), "Direction"),
            Expr::static_member("ParameterDirection", "Output"),
        ));
        if category.requires_output_size() {
            outputs.push(Stmt::assign(
                Expr::property(slot(), "Size"),
                Expr::int(p.size as i64),
            ));
        }

        let read_back = if procedure_options.is_nullable(&p.name) {
            let reader = category.nullable_reader().ok_or_else(|| {
                GenerateError::UnsupportedNullableType {
                    procedure: signature.procedure.qualified_name(),
                    parameter: p.name.clone(),
                    wire: category.wire_type().to_string(),
                }
            })?;
            Expr::call_on(Expr::name(options.class_name.clone()), reader, vec![slot()])
        } else {
            Expr::cast(
                TypeRef::named(category.native_type()),
                Expr::property(slot(), "Value"),
            )
        };
        assigns.push(Stmt::assign(Expr::name(p.ident()), read_back));
    }

    method = method.statement(Stmt::local(
        TypeRef::array(TypeRef::named("SqlParameter")),
        "parms",
        Expr::new_array(TypeRef::named("SqlParameter"), entries),
    ));
    method = method.statements(outputs);

    let mut helper_args = Vec::new();
    if transacted {
        helper_args.push(Expr::name("trs"));
    }
    helper_args.push(Expr::str(signature.procedure.qualified_name()));
    helper_args.push(Expr::name("parms"));

    match strategy {
        ReturnStrategy::TypedDataSet(name) => {
            method = method.statement(Stmt::local(
                TypeRef::named(name.clone()),
                "ds",
                Expr::new_object(TypeRef::named(name.clone()), Vec::new()),
            ));
            helper_args.push(Expr::name("ds"));
            method = method
                .statement(Stmt::Expr(Expr::call("ExecuteFillDataSet", helper_args)))
                .statement(Stmt::ret(Expr::name("ds")));
        }
        ReturnStrategy::DataSet => {
            method = method.statement(Stmt::ret(Expr::call("ExecuteDataSet", helper_args)));
        }
        ReturnStrategy::DataReader => {
            method = method.statement(Stmt::ret(Expr::call("ExecuteDataReader", helper_args)));
        }
        ReturnStrategy::None => {
            method = method.statement(Stmt::Expr(Expr::call("ExecuteNonQuery", helper_args)));
            method = method.statements(assigns);
        }
    }

    if let Some(snippet) = &options.snippet_post {
        method = method.statement(Stmt::snippet(snippet.clone()));
    }

    Ok(method)
}

/// Collapse a captured probe failure into a single `#warning`-safe line.
fn collapse_message(message: &str) -> String {
    message
        .replace(['\r', '\n'], " ")
        .chars()
        .take(MAX_WARNING_LEN)
        .collect()
}
