//! Classes and the namespace root.

use super::method::Method;

/// A member of a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(Method),
    Class(Class),
}

/// A generated class. Sub-classes produced by mapping rules are nested
/// members of the root class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    /// Emit a private parameterless constructor, preventing instantiation
    /// of the all-static surface.
    pub private_ctor: bool,
    pub members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private_ctor: false,
            members: Vec::new(),
        }
    }

    pub fn with_private_ctor(mut self) -> Self {
        self.private_ctor = true;
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    /// Iterate the directly contained methods.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Class(_) => None,
        })
    }

    /// Iterate the nested classes.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.members.iter().filter_map(|m| match m {
            Member::Class(class) => Some(class),
            Member::Method(_) => None,
        })
    }
}

/// The root of the generated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub imports: Vec<String>,
    pub classes: Vec<Class>,
}
