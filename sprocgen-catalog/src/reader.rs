//! Catalog reading with per-procedure fault isolation.

use tracing::{debug, warn};

use crate::{
    descriptor::{ParamDirection, ProcedureRef, ProcedureSignature},
    error::CatalogError,
    probe::probe_batch,
    source::MetadataSource,
};

/// Reads the full procedure catalog through a [`MetadataSource`].
pub struct CatalogReader<S> {
    source: S,
}

impl<S: MetadataSource> CatalogReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read every stored procedure.
    ///
    /// Failing to enumerate the catalog is fatal. Per-procedure failures
    /// (broken procedure bodies, rejected placeholder arguments) are
    /// captured on the signature and the procedure is retained with an
    /// empty result-set list.
    pub fn read(&mut self) -> Result<Vec<ProcedureSignature>, CatalogError> {
        let procedures = self
            .source
            .list_procedures()
            .map_err(CatalogError::Enumerate)?;

        let mut signatures = Vec::with_capacity(procedures.len());
        for procedure in procedures {
            signatures.push(self.read_signature(procedure));
        }
        Ok(signatures)
    }

    fn read_signature(&mut self, procedure: ProcedureRef) -> ProcedureSignature {
        debug!(procedure = %procedure.qualified_name(), "probing procedure");

        let mut parameters = match self
            .source
            .procedure_parameters(&procedure.schema, &procedure.name)
        {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!(
                    procedure = %procedure.qualified_name(),
                    error = %e,
                    "failed to describe parameters"
                );
                return ProcedureSignature {
                    procedure,
                    parameters: Vec::new(),
                    result_sets: Vec::new(),
                    error: Some(e.to_string()),
                };
            }
        };
        parameters.retain(|p| p.direction != ParamDirection::Return && p.name != "@RETURN_VALUE");

        let batch = probe_batch(&procedure, &parameters);
        match self.source.probe_result_sets(&batch) {
            Ok(result_sets) => ProcedureSignature {
                procedure,
                parameters,
                result_sets,
                error: None,
            },
            Err(e) => {
                warn!(
                    procedure = %procedure.qualified_name(),
                    error = %e,
                    "shape-only probe failed"
                );
                ProcedureSignature {
                    procedure,
                    parameters,
                    result_sets: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::descriptor::{ColumnDescriptor, ParameterDescriptor, ResultSetDescriptor};
    use crate::source::SourceError;

    /// A canned in-memory source for reader tests.
    #[derive(Default)]
    struct FakeSource {
        procedures: Vec<ProcedureRef>,
        parameters: HashMap<String, Vec<ParameterDescriptor>>,
        shapes: HashMap<String, Vec<ResultSetDescriptor>>,
        broken: Vec<String>,
        probed_batches: Vec<String>,
        fail_listing: bool,
    }

    impl MetadataSource for FakeSource {
        fn list_procedures(&mut self) -> Result<Vec<ProcedureRef>, SourceError> {
            if self.fail_listing {
                return Err("login failed".into());
            }
            Ok(self.procedures.clone())
        }

        fn procedure_parameters(
            &mut self,
            _schema: &str,
            name: &str,
        ) -> Result<Vec<ParameterDescriptor>, SourceError> {
            Ok(self.parameters.get(name).cloned().unwrap_or_default())
        }

        fn probe_result_sets(
            &mut self,
            batch: &str,
        ) -> Result<Vec<ResultSetDescriptor>, SourceError> {
            self.probed_batches.push(batch.to_string());
            for name in &self.broken {
                if batch.contains(name.as_str()) {
                    return Err(format!("invalid object name '{}'", name).into());
                }
            }
            for (name, shape) in &self.shapes {
                if batch.contains(name.as_str()) {
                    return Ok(shape.clone());
                }
            }
            Ok(Vec::new())
        }
    }

    fn param(name: &str, direction: ParamDirection, raw_type: &str) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            direction,
            raw_type: raw_type.to_string(),
            size: -1,
            nullable: false,
        }
    }

    #[test]
    fn test_listing_failure_is_fatal() {
        let mut reader = CatalogReader::new(FakeSource {
            fail_listing: true,
            ..Default::default()
        });
        assert!(matches!(reader.read(), Err(CatalogError::Enumerate(_))));
    }

    #[test]
    fn test_return_value_parameter_is_filtered() {
        let mut source = FakeSource::default();
        source.procedures.push(ProcedureRef::new("dbo", "GetUser"));
        source.parameters.insert(
            "GetUser".to_string(),
            vec![
                param("@RETURN_VALUE", ParamDirection::Return, "int"),
                param("@id", ParamDirection::Input, "int"),
            ],
        );
        let sigs = CatalogReader::new(source).read().unwrap();
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].parameters.len(), 1);
        assert_eq!(sigs[0].parameters[0].name, "@id");
        assert!(sigs[0].error.is_none());
    }

    #[test]
    fn test_broken_procedure_is_captured_not_fatal() {
        let mut source = FakeSource::default();
        source.procedures.push(ProcedureRef::new("dbo", "Broken"));
        source.procedures.push(ProcedureRef::new("dbo", "Works"));
        source.broken.push("Broken".to_string());
        source.shapes.insert(
            "Works".to_string(),
            vec![ResultSetDescriptor {
                columns: vec![ColumnDescriptor {
                    name: "Id".to_string(),
                    data_type: "int".to_string(),
                }],
            }],
        );

        let sigs = CatalogReader::new(source).read().unwrap();
        assert_eq!(sigs.len(), 2);

        let broken = &sigs[0];
        assert!(broken.error.as_deref().unwrap().contains("invalid object name"));
        assert!(broken.result_sets.is_empty());

        let works = &sigs[1];
        assert!(works.error.is_none());
        assert_eq!(works.result_sets.len(), 1);
    }

    #[test]
    fn test_probe_batch_uses_placeholders() {
        let mut source = FakeSource::default();
        source.procedures.push(ProcedureRef::new("dbo", "Find"));
        source.parameters.insert(
            "Find".to_string(),
            vec![
                param("@id", ParamDirection::Input, "int"),
                param("@name", ParamDirection::Input, "nvarchar"),
            ],
        );
        let mut reader = CatalogReader::new(source);
        reader.read().unwrap();
        assert_eq!(
            reader.source.probed_batches,
            vec!["SET FMTONLY ON\nEXEC dbo.Find @id=1, @name=''\nSET FMTONLY OFF\n".to_string()]
        );
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let mut source = FakeSource::default();
        for name in ["Zeta", "Alpha", "Mid"] {
            source.procedures.push(ProcedureRef::new("dbo", name));
        }
        let sigs = CatalogReader::new(source).read().unwrap();
        let names: Vec<_> = sigs.iter().map(|s| s.procedure.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }
}
