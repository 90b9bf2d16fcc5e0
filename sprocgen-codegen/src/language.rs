//! The emitter collaborator contract.

use crate::ast::Namespace;

/// Placement of block braces in emitted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// Braces on their own line ("C" style).
    #[default]
    NextLine,
    /// Opening brace on the header line.
    SameLine,
}

/// Formatting configuration handed to an emitter.
///
/// Defaults match the original host's settings: C bracing, tab indent, no
/// blank lines between members.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub brace_style: BraceStyle,
    pub indent: String,
    pub blank_lines_between_members: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            brace_style: BraceStyle::NextLine,
            indent: "\t".to_string(),
            blank_lines_between_members: false,
        }
    }
}

/// A target-language backend: turns the abstract namespace tree into
/// source text.
pub trait Emitter {
    /// Language tag the backend answers to.
    fn language(&self) -> &'static str;

    /// Extension of generated files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render the namespace to source text.
    fn emit(&self, namespace: &Namespace, options: &EmitOptions) -> String;
}
