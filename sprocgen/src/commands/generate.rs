use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result, eyre};
use sprocgen_catalog::{CatalogReader, ProcedureSignature, snapshot};
use sprocgen_codegen::Generator;
use sprocgen_codegen::language::{EmitOptions, Emitter};
use sprocgen_codegen_csharp::CsharpEmitter;
use sprocgen_mssql::MssqlMetadataSource;
use sprocgen_options::{GlobalOptions, Language};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the options XML document (defaults to ./sprocs.xml)
    #[arg(short, long, default_value = "sprocs.xml")]
    pub config: PathBuf,

    /// Namespace for the generated code
    #[arg(short, long, default_value = "Generated")]
    pub namespace: String,

    /// Output file (defaults to the options file with the emitter extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generate from a catalog snapshot instead of a live server
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write the probed catalog to a JSON snapshot for later replay
    #[arg(long)]
    pub dump_catalog: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let options = GlobalOptions::from_file(&self.config).unwrap_or_exit();

        let signatures = self.read_catalog(&options)?;
        if let Some(path) = &self.dump_catalog {
            snapshot::write(path, &signatures).wrap_err("Failed to write catalog snapshot")?;
            println!("Catalog snapshot: {}", path.display());
        }

        let namespace = Generator::new(&options, &signatures)
            .generate(&self.namespace)
            .wrap_err("Code generation failed")?;

        let emitter = match options.language {
            Language::CSharp => CsharpEmitter,
        };
        let code = emitter.emit(&namespace, &EmitOptions::default());

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| self.config.with_extension(emitter.file_extension()));
        std::fs::write(&output, code.as_bytes())
            .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

        self.print_summary(&signatures, &output);
        Ok(())
    }

    fn read_catalog(&self, options: &GlobalOptions) -> Result<Vec<ProcedureSignature>> {
        match &self.catalog {
            Some(path) => snapshot::read(path).wrap_err("Failed to load catalog snapshot"),
            None => {
                let connection_string = options.connection_string.as_deref().ok_or_else(|| {
                    eyre!(
                        "{} has no design-time ConnectionString; pass --catalog to generate offline",
                        self.config.display()
                    )
                })?;
                let source = MssqlMetadataSource::connect(connection_string)
                    .wrap_err("Failed to connect to SQL Server")?;
                CatalogReader::new(source)
                    .read()
                    .wrap_err("Failed to read the procedure catalog")
            }
        }
    }

    fn print_summary(&self, signatures: &[ProcedureSignature], output: &std::path::Path) {
        let broken = signatures.iter().filter(|s| s.error.is_some()).count();
        println!(
            "{} procedure{} probed",
            signatures.len(),
            if signatures.len() == 1 { "" } else { "s" }
        );
        if broken > 0 {
            println!("{} with captured probe failures (see #warning annotations)", broken);
        }
        println!("Generated: {}", output.display());
    }
}
