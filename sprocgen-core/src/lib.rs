//! Core types and utilities for the sprocgen stored-procedure wrapper generator.
//!
//! This crate provides the SQL Server type vocabulary and the mapping from
//! catalog type names to generated-code types, shared by the catalog reader
//! and the code generators.

mod types;
mod utils;

pub use types::{IdentifierFormat, SqlTypeCategory};
pub use utils::{to_camel_case, to_pascal_case};
