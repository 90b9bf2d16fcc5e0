//! The schema-to-code mapping engine.
//!
//! Given a probed procedure catalog and the parsed options document, this
//! crate resolves the per-procedure generation policy, synthesizes the
//! wrapper-method AST (a plain and a transacted variant per procedure), and
//! assembles the class tree handed to a language emitter.
//!
//! # Module Organization
//!
//! - [`ast`] - Language-agnostic code model (namespace/class/method/statement)
//! - [`resolve`] - Policy resolution: return strategy and class destination
//! - [`synth`] - Wrapper-method synthesis
//! - [`support`] - The fixed battery of execution/typed-null helper methods
//! - [`assemble`] - Class bucketing and namespace assembly
//! - [`language`] - The emitter collaborator contract

pub mod assemble;
pub mod ast;
mod error;
pub mod language;
pub mod resolve;
pub mod support;
pub mod synth;

mod generator;

pub use error::GenerateError;
pub use generator::Generator;
