//! Target emission language tag.

use std::{fmt, str::FromStr};

/// Target language for the generated wrapper source.
///
/// One backend ships today; the tag exists so the options document stays
/// stable as emitters are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// C#
    #[default]
    CSharp,
}

impl Language {
    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Language::CSharp),
            _ => Err(format!("unknown language '{}', expected 'csharp'", s)),
        }
    }
}
