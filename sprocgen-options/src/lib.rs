//! Options document parsing and the generation policy model.
//!
//! The generator is configured by a small XML document associated with the
//! project. This crate parses that document into a validated
//! [`GlobalOptions`] value: per-procedure overrides, class mapping rules,
//! snippets, and toggles. All configuration problems are fatal and reported
//! with the 1-based line/column of the offending element.

mod error;
mod language;
mod mapping;
mod options;
mod procedure;

pub use error::{Error, Result};
pub use language::Language;
pub use mapping::{DefaultMapping, MappingRule};
pub use options::{GlobalOptions, RuntimeConnection};
pub use procedure::{ProcedureOptions, ReturnKind};
