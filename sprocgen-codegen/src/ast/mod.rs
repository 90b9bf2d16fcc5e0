//! Language-agnostic code model.
//!
//! A deliberately small abstract tree: just the shapes the synthesizer
//! needs, rendered to concrete syntax by a language emitter. Every
//! generated method is public and static, so the model does not carry
//! visibility or instance flags.

mod class;
mod expr;
mod method;
mod stmt;
mod types;

pub use class::{Class, Member, Namespace};
pub use expr::Expr;
pub use method::{Method, Param, ParamMode};
pub use stmt::Stmt;
pub use types::TypeRef;
