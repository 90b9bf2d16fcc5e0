//! Class mapping rules: routing procedures into generated classes.

use regex::Regex;

/// One `Map` rule. Rules are evaluated in declaration order; the first rule
/// whose filters all pass decides the destination class and method name.
#[derive(Debug, Clone)]
pub struct MappingRule {
    /// Exact schema filter, when present.
    pub schema: Option<String>,
    /// Name prefix filter; consumed from the method name on match.
    pub prefix: Option<String>,
    /// Regular expression tested against the name after prefix stripping.
    pub pattern: Option<Regex>,
    /// Destination class for procedures the rule matches.
    pub class: String,
}

impl MappingRule {
    /// Apply the rule to a procedure identity. Returns the method name (the
    /// procedure name with the prefix stripped) when every filter passes.
    pub fn resolve(&self, schema: &str, name: &str) -> Option<String> {
        if let Some(s) = &self.schema {
            if s != schema {
                return None;
            }
        }
        let remainder = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(remainder) {
                return None;
            }
        }
        Some(remainder.to_string())
    }

    /// Whether the rule matches the procedure at all.
    pub fn matches(&self, schema: &str, name: &str) -> bool {
        self.resolve(schema, name).is_some()
    }
}

/// The `DefaultMapping` fallback applied to procedures no rule claims:
/// strip a prefix, then split into class/method parts.
#[derive(Debug, Clone)]
pub struct DefaultMapping {
    /// Prefix a procedure must carry to participate in default mapping.
    pub prefix: String,
    /// Delimiter separating the class part from the method part.
    pub delim: String,
    /// Alternative to the delimiter: a regex with two capture groups,
    /// (class, method), applied to the prefix-stripped name.
    pub pattern: Option<Regex>,
}

impl DefaultMapping {
    /// Attempt to synthesize a (class, method) pair from a procedure name.
    pub fn resolve(&self, name: &str) -> Option<(String, String)> {
        let stripped = name.strip_prefix(self.prefix.as_str())?;

        if let Some(pattern) = &self.pattern {
            if let Some(caps) = pattern.captures(stripped) {
                if let (Some(class), Some(method)) = (caps.get(1), caps.get(2)) {
                    return Some((class.as_str().to_string(), method.as_str().to_string()));
                }
            }
        }

        if self.delim.is_empty() {
            return None;
        }
        let at = stripped.find(self.delim.as_str())?;
        let class = &stripped[..at];
        let method = &stripped[at + self.delim.len()..];
        if class.is_empty() || method.is_empty() {
            return None;
        }
        Some((class.to_string(), method.to_string()))
    }

    /// Whether the procedure participates in default mapping (the inclusion
    /// filter only checks the prefix, mirroring how non-splittable names
    /// still land in the base class).
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(self.prefix.as_str())
    }
}
