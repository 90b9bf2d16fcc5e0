//! Expressions in generated code.

use super::types::TypeRef;

/// An expression in the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A string literal, emitted with target-language escaping.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A bare identifier: a method argument, local, or class name.
    Name(String),
    /// Verbatim source text, emitted exactly as written.
    Raw(String),
    /// A static member access, `Type.Member`.
    StaticMember { ty: String, member: String },
    /// A property access, `target.Name`.
    Property { target: Box<Expr>, name: String },
    /// An indexer access, `target[index]`.
    Index { target: Box<Expr>, index: Box<Expr> },
    /// An object construction, `new Ty(args)`.
    New { ty: TypeRef, args: Vec<Expr> },
    /// An array construction, `new Ty[] { items }`.
    NewArray { element: TypeRef, items: Vec<Expr> },
    /// A method invocation. A missing target is a call on the enclosing
    /// class.
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// A cast, `(Ty)expr`.
    Cast { ty: TypeRef, expr: Box<Expr> },
    /// An identity comparison, `left == right`.
    Eq { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn static_member(ty: impl Into<String>, member: impl Into<String>) -> Self {
        Expr::StaticMember {
            ty: ty.into(),
            member: member.into(),
        }
    }

    pub fn property(target: Expr, name: impl Into<String>) -> Self {
        Expr::Property {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn index(target: Expr, index: Expr) -> Self {
        Expr::Index {
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Expr::New { ty, args }
    }

    pub fn new_array(element: TypeRef, items: Vec<Expr>) -> Self {
        Expr::NewArray { element, items }
    }

    /// A call on the enclosing class.
    pub fn call(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: None,
            method: method.into(),
            args,
        }
    }

    pub fn call_on(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            args,
        }
    }

    pub fn cast(ty: TypeRef, expr: Expr) -> Self {
        Expr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::Eq {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
