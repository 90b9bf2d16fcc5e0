//! Statements in generated code.

use super::{expr::Expr, types::TypeRef};

/// A statement in a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A local declaration, `Ty name = init;`.
    Local {
        ty: TypeRef,
        name: String,
        init: Option<Expr>,
    },
    /// An assignment, `target = value;`.
    Assign { target: Expr, value: Expr },
    /// An expression evaluated for effect.
    Expr(Expr),
    /// A return, with or without a value.
    Return(Option<Expr>),
    /// A conditional.
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// Verbatim line(s) emitted at column zero: user snippets and
    /// `#warning` annotations.
    Snippet(String),
}

impl Stmt {
    pub fn local(ty: TypeRef, name: impl Into<String>, init: Expr) -> Self {
        Stmt::Local {
            ty,
            name: name.into(),
            init: Some(init),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn snippet(text: impl Into<String>) -> Self {
        Stmt::Snippet(text.into())
    }
}
