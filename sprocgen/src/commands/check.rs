use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sprocgen_options::{GlobalOptions, RuntimeConnection};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the options XML document (defaults to ./sprocs.xml)
    #[arg(short, long, default_value = "sprocs.xml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let options = GlobalOptions::from_file(&self.config).unwrap_or_exit();

        println!("✓ {} is valid\n", self.config.display());
        println!("  class: {}", options.class_name);
        println!("  language: {}", options.language);
        match &options.runtime_connection {
            RuntimeConnection::ConnectionString(_) => {
                println!("  runtime connection: connection string (CreateConnection emitted)");
            }
            RuntimeConnection::Expression(expr) => {
                println!("  runtime connection: expression `{}`", expr);
            }
        }

        if !options.mappings.is_empty() {
            println!("\n  {} mapping rule{}:", options.mappings.len(), plural(options.mappings.len()));
            for rule in &options.mappings {
                println!(
                    "    {} -> {}",
                    describe_filters(rule.schema.as_deref(), rule.prefix.as_deref()),
                    rule.class
                );
            }
        }
        if let Some(dm) = &options.default_mapping {
            println!("\n  default mapping: prefix '{}', delimiter '{}'", dm.prefix, dm.delim);
        }

        let overrides = options.procedures.len();
        if overrides > 0 || options.default_procedure.is_some() {
            println!("\n  {} procedure override{}:", overrides, plural(overrides));
            for po in options.procedures.values() {
                println!("    {}", po.name);
            }
            if options.default_procedure.is_some() {
                println!("    ? (wildcard default)");
            }
        }

        Ok(())
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn describe_filters(schema: Option<&str>, prefix: Option<&str>) -> String {
    match (schema, prefix) {
        (Some(s), Some(p)) => format!("{}.{}*", s, p),
        (Some(s), None) => format!("{}.*", s),
        (None, Some(p)) => format!("{}*", p),
        (None, None) => "*".to_string(),
    }
}
