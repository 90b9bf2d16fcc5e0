//! The aggregate options document and its XML front-end.

use std::path::Path;

use indexmap::IndexMap;
use miette::NamedSource;
use regex::Regex;
use roxmltree::{Document, Node};
use sprocgen_core::IdentifierFormat;

use crate::{
    error::{Error, Result},
    language::Language,
    mapping::{DefaultMapping, MappingRule},
    procedure::{ProcedureOptions, ReturnKind},
};

/// How generated code acquires its runtime connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeConnection {
    /// A literal connection string; a `CreateConnection` helper is emitted.
    ConnectionString(String),
    /// A verbatim source expression spliced at each acquisition site.
    Expression(String),
}

/// The aggregate generation policy parsed from the options document.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Design-time connection string used for catalog introspection.
    pub connection_string: Option<String>,
    /// Runtime connection configuration for the generated code.
    pub runtime_connection: RuntimeConnection,
    /// Name of the root generated class.
    pub class_name: String,
    /// Target emission language.
    pub language: Language,
    /// Identifier shaping for generated method names.
    pub identifier_format: IdentifierFormat,
    /// Explicit per-procedure overrides, in declaration order.
    pub procedures: IndexMap<String, ProcedureOptions>,
    /// The wildcard (`Name="?"`) override, at most one.
    pub default_procedure: Option<ProcedureOptions>,
    /// Class mapping rules, in declaration order.
    pub mappings: Vec<MappingRule>,
    /// Prefix/delimiter fallback mapping, when enabled.
    pub default_mapping: Option<DefaultMapping>,
    /// Emit `#warning` annotations for procedures whose probe failed.
    pub generate_warnings: bool,
    /// Verbatim text injected at the top of every wrapper body.
    pub snippet_pre: Option<String>,
    /// Verbatim text injected at the bottom of every wrapper body.
    pub snippet_post: Option<String>,
    /// Strategy Auto resolves to when a procedure produces result sets.
    pub auto_return: ReturnKind,
    /// Exclude procedures that match neither a rule nor the default mapping.
    pub ignore_non_matching: bool,
}

impl GlobalOptions {
    /// Parse an options document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse with a custom filename for diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        Parser { content, filename }.parse()
    }

    /// Look up the effective override for a procedure: an explicit entry by
    /// exact name, else the wildcard default, else nothing.
    pub fn lookup(&self, procedure: &str) -> Option<&ProcedureOptions> {
        self.procedures
            .get(procedure)
            .or(self.default_procedure.as_ref())
    }

    /// The inclusion filter: does this procedure enter the generation set?
    ///
    /// A procedure matching no mapping rule and no default-mapping prefix is
    /// kept only while `IgnoreNonMatchingProcedures` is unset.
    pub fn matches(&self, schema: &str, name: &str) -> bool {
        if self.mappings.iter().any(|m| m.matches(schema, name)) {
            return true;
        }
        if let Some(dm) = &self.default_mapping {
            if dm.matches(name) {
                return true;
            }
        }
        !self.ignore_non_matching
    }
}

impl std::str::FromStr for GlobalOptions {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "options.xml")
    }
}

struct Parser<'a> {
    content: &'a str,
    filename: &'a str,
}

impl Parser<'_> {
    fn parse(self) -> Result<GlobalOptions> {
        let doc = Document::parse(self.content).map_err(|e| {
            let pos = e.pos();
            Box::new(Error::Xml {
                filename: self.filename.to_string(),
                line: pos.row,
                col: pos.col,
                source: e,
            })
        })?;

        let mut connection_string = None;
        let mut runtime_string: Option<String> = None;
        let mut runtime_expression: Option<String> = None;
        let mut class_name: Option<String> = None;
        let mut language = Language::default();
        let mut identifier_format = IdentifierFormat::default();
        let mut procedures: IndexMap<String, ProcedureOptions> = IndexMap::new();
        let mut default_procedure: Option<ProcedureOptions> = None;
        let mut mappings = Vec::new();
        let mut default_mapping = None;
        let mut generate_warnings = true;
        let mut snippet_pre = None;
        let mut snippet_post = None;
        let mut auto_return = ReturnKind::DataReader;
        let mut ignore_non_matching = false;

        for node in doc.descendants().filter(Node::is_element) {
            match node.tag_name().name() {
                "ConnectionString" => {
                    connection_string = node.attribute("Value").map(str::to_string);
                }
                "RuntimeConnectionString" => {
                    runtime_string = node.attribute("Value").map(str::to_string);
                }
                "RuntimeConnectionExpression" => {
                    runtime_expression = node.text().map(|t| t.trim().to_string());
                }
                "ClassName" => {
                    class_name = node.attribute("Value").map(str::to_string);
                }
                "Language" => {
                    let value = self.required_attr(&doc, node, "Value")?;
                    language = value
                        .parse()
                        .map_err(|e: String| self.invalid(&doc, node, e))?;
                }
                "IdentifierFormat" => {
                    let value = self.required_attr(&doc, node, "Value")?;
                    identifier_format = value
                        .parse()
                        .map_err(|e: String| self.invalid(&doc, node, e))?;
                }
                "StoredProcedure" => {
                    let po = self.parse_procedure(&doc, node)?;
                    if po.name == "?" {
                        if default_procedure.is_some() {
                            return Err(self.invalid(
                                &doc,
                                node,
                                "you cannot include more than one default (Name=\"?\") stored procedure",
                            ));
                        }
                        default_procedure = Some(po);
                    } else {
                        procedures.insert(po.name.clone(), po);
                    }
                }
                "Map" => {
                    mappings.push(self.parse_mapping(&doc, node)?);
                }
                "DefaultMapping" => {
                    default_mapping = Some(DefaultMapping {
                        prefix: node.attribute("Prefix").unwrap_or_default().to_string(),
                        delim: node.attribute("Delim").unwrap_or("_").to_string(),
                        pattern: self.optional_pattern(&doc, node)?,
                    });
                }
                "GenerateWarnings" => {
                    let value = self.required_attr(&doc, node, "Value")?;
                    generate_warnings = value.parse().map_err(|_| {
                        self.invalid(&doc, node, format!("invalid boolean value '{}'", value))
                    })?;
                }
                "SnippetPre" => {
                    snippet_pre = node.text().filter(|t| !t.trim().is_empty()).map(str::to_string);
                }
                "SnippetPost" => {
                    snippet_post = node.text().filter(|t| !t.trim().is_empty()).map(str::to_string);
                }
                "AutoReturnType" => {
                    let value = self.required_attr(&doc, node, "Value")?;
                    let kind: ReturnKind = value
                        .parse()
                        .map_err(|e: String| self.invalid(&doc, node, e))?;
                    // Auto must resolve to something concrete; a typed
                    // dataset needs a per-procedure name
                    if matches!(kind, ReturnKind::Auto | ReturnKind::TypedDataSet) {
                        return Err(self.invalid(
                            &doc,
                            node,
                            format!("AutoReturnType cannot be '{}'", kind),
                        ));
                    }
                    auto_return = kind;
                }
                "IgnoreNonMatchingProcedures" => {
                    ignore_non_matching = true;
                }
                _ => {}
            }
        }

        let runtime_connection = match (runtime_string, runtime_expression) {
            (Some(_), Some(_)) => {
                return Err(Error::missing(
                    "specify either RuntimeConnectionString or RuntimeConnectionExpression, not both",
                ));
            }
            (Some(s), None) if !s.is_empty() => RuntimeConnection::ConnectionString(s),
            (None, Some(e)) if !e.is_empty() => RuntimeConnection::Expression(e),
            _ => return Err(Error::missing("no runtime connection specified")),
        };
        let class_name = match class_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::missing("no class name specified")),
        };

        Ok(GlobalOptions {
            connection_string,
            runtime_connection,
            class_name,
            language,
            identifier_format,
            procedures,
            default_procedure,
            mappings,
            default_mapping,
            generate_warnings,
            snippet_pre,
            snippet_post,
            auto_return,
            ignore_non_matching,
        })
    }

    fn parse_procedure(&self, doc: &Document, node: Node) -> Result<ProcedureOptions> {
        let name = match node.attribute("Name") {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                return Err(self.invalid(doc, node, "you must specify a name for the stored procedure"));
            }
        };

        let ignore = node.attribute("Ignore") == Some("true");

        let return_kind = match node.attribute("ReturnType") {
            Some(raw) => Some(
                raw.parse::<ReturnKind>()
                    .map_err(|e| self.invalid(doc, node, e))?,
            ),
            None => None,
        };

        let typed_result = match node.attribute("TypedDataSet") {
            Some("") => {
                return Err(self.invalid(
                    doc,
                    node,
                    "invalid TypedDataSet name; if specified, it cannot be blank",
                ));
            }
            other => other.map(str::to_string),
        };

        let nullable_params = node
            .attribute("NullableParams")
            .map(|a| a.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_default();

        Ok(ProcedureOptions {
            name,
            ignore,
            return_kind,
            typed_result,
            nullable_params,
        })
    }

    fn parse_mapping(&self, doc: &Document, node: Node) -> Result<MappingRule> {
        let class = match node.attribute("Class") {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(self.invalid(doc, node, "Map requires a Class attribute")),
        };
        Ok(MappingRule {
            schema: node.attribute("Schema").map(str::to_string),
            prefix: node.attribute("Prefix").map(str::to_string),
            pattern: self.optional_pattern(doc, node)?,
            class,
        })
    }

    fn optional_pattern(&self, doc: &Document, node: Node) -> Result<Option<Regex>> {
        match node.attribute("Pattern") {
            Some(raw) => Regex::new(raw)
                .map(Some)
                .map_err(|e| self.invalid(doc, node, format!("invalid pattern: {}", e))),
            None => Ok(None),
        }
    }

    fn required_attr(&self, doc: &Document, node: Node, attr: &str) -> Result<String> {
        node.attribute(attr)
            .map(str::to_string)
            .ok_or_else(|| self.invalid(doc, node, format!("missing '{}' attribute", attr)))
    }

    fn invalid(&self, doc: &Document, node: Node, message: impl Into<String>) -> Box<Error> {
        let range = node.range();
        let pos = doc.text_pos_at(range.start);
        Box::new(Error::Invalid {
            src: NamedSource::new(self.filename, self.content.to_string()),
            span: Some((range.start, range.end - range.start).into()),
            line: pos.row,
            col: pos.col,
            message: message.into(),
        })
    }
}
