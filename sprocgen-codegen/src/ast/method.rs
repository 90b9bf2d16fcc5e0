//! Method definitions.

use super::{stmt::Stmt, types::TypeRef};

/// Parameter passing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    In,
    Out,
}

/// A parameter of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub mode: ParamMode,
}

/// A generated method. Always public and static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub doc: Option<String>,
    pub return_type: Option<TypeRef>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            return_type: None,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
            mode: ParamMode::In,
        });
        self
    }

    pub fn out_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
            mode: ParamMode::Out,
        });
        self
    }

    pub fn statement(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn statements(mut self, stmts: impl IntoIterator<Item = Stmt>) -> Self {
        self.body.extend(stmts);
        self
    }
}
