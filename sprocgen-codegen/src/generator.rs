//! Generation orchestration: catalog + options → namespace tree.

use sprocgen_catalog::ProcedureSignature;
use sprocgen_options::{GlobalOptions, ProcedureOptions};
use tracing::debug;

use crate::{
    assemble::ClassAssembler,
    ast::Namespace,
    error::GenerateError,
    resolve::{effective_return, resolve_destination},
    synth::synthesize_method,
};

/// Drives the full pipeline over a probed catalog.
pub struct Generator<'a> {
    options: &'a GlobalOptions,
    signatures: &'a [ProcedureSignature],
}

impl<'a> Generator<'a> {
    pub fn new(options: &'a GlobalOptions, signatures: &'a [ProcedureSignature]) -> Self {
        Self {
            options,
            signatures,
        }
    }

    /// Generate the namespace tree.
    ///
    /// Procedures excluded by the inclusion filter or an `Ignore` override
    /// are skipped; everything else becomes a plain/transacted method pair
    /// at its resolved destination. Any [`GenerateError`] abandons the run.
    pub fn generate(&self, namespace: &str) -> Result<Namespace, GenerateError> {
        let mut assembler = ClassAssembler::new(self.options);

        for signature in self.signatures {
            let procedure = &signature.procedure;
            if !self.options.matches(&procedure.schema, &procedure.method_name()) {
                debug!(procedure = %procedure.qualified_name(), "excluded by mapping filter");
                continue;
            }

            let fallback;
            let procedure_options = match self.options.lookup(&procedure.name) {
                Some(po) => po,
                None => {
                    fallback = ProcedureOptions::auto(procedure.name.clone());
                    &fallback
                }
            };
            if procedure_options.ignore {
                debug!(procedure = %procedure.qualified_name(), "ignored by override");
                continue;
            }

            let strategy =
                effective_return(signature, procedure_options, self.options.auto_return)?;
            let destination = resolve_destination(signature, self.options);
            let method_name = self.options.identifier_format.apply(destination.method());

            let mut plain =
                synthesize_method(signature, procedure_options, &strategy, self.options, false)?;
            let mut transacted =
                synthesize_method(signature, procedure_options, &strategy, self.options, true)?;
            plain.name = method_name.clone();
            transacted.name = method_name;

            assembler.add(&destination, plain, transacted);
        }

        Ok(assembler.finish(namespace))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sprocgen_catalog::{
        ColumnDescriptor, ParamDirection, ParameterDescriptor, ProcedureRef, ProcedureSignature,
        ResultSetDescriptor,
    };

    use super::*;

    fn options(extra: &str) -> GlobalOptions {
        let xml = format!(
            r#"<Options>
    <RuntimeConnectionString Value="x" />
    <ClassName Value="Procs" />
    {extra}
</Options>"#
        );
        GlobalOptions::from_str(&xml).unwrap()
    }

    fn signature(name: &str) -> ProcedureSignature {
        ProcedureSignature {
            procedure: ProcedureRef::new("dbo", name),
            parameters: Vec::new(),
            result_sets: Vec::new(),
            error: None,
        }
    }

    fn signature_with_results(name: &str) -> ProcedureSignature {
        let mut sig = signature(name);
        sig.result_sets.push(ResultSetDescriptor {
            columns: vec![ColumnDescriptor {
                name: "Id".to_string(),
                data_type: "int".to_string(),
            }],
        });
        sig
    }

    #[test]
    fn test_unmapped_catalog_generates_pairs_in_root() {
        // no Map, no DefaultMapping, inclusion defaults to permissive
        let o = options("");
        let sigs = vec![signature("GetUser"), signature("DeleteUser")];
        let ns = Generator::new(&o, &sigs).generate("App.Data").unwrap();

        let root = &ns.classes[0];
        assert_eq!(root.methods().filter(|m| m.name == "GetUser").count(), 2);
        assert_eq!(root.methods().filter(|m| m.name == "DeleteUser").count(), 2);
        assert_eq!(root.classes().count(), 0);

        // one of each pair is the transacted variant
        let get_user: Vec<_> = root.methods().filter(|m| m.name == "GetUser").collect();
        assert_eq!(get_user[0].params.len(), 0);
        assert_eq!(get_user[1].params[0].name, "trs");
    }

    #[test]
    fn test_restrictive_filter_drops_unmatched() {
        let o = options(
            r#"<Map Prefix="usp_" Class="Api" />
               <IgnoreNonMatchingProcedures />"#,
        );
        let sigs = vec![signature("usp_Get"), signature("Orphan")];
        let ns = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        let root = &ns.classes[0];
        assert!(root.methods().all(|m| m.name != "Orphan"));
        let api = root.classes().find(|c| c.name == "Api").unwrap();
        assert_eq!(api.members.len(), 2);
    }

    #[test]
    fn test_ignored_override_is_skipped() {
        let o = options(r#"<StoredProcedure Name="Secret" Ignore="true" />"#);
        let sigs = vec![signature("Secret"), signature("Open")];
        let ns = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        let root = &ns.classes[0];
        assert!(root.methods().all(|m| m.name != "Secret"));
        assert_eq!(root.methods().filter(|m| m.name == "Open").count(), 2);
    }

    #[test]
    fn test_wildcard_default_applies_to_all() {
        let o = options(r#"<StoredProcedure Name="?" ReturnType="DataSet" />"#);
        let sigs = vec![signature_with_results("GetAll")];
        let ns = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        let root = &ns.classes[0];
        let m = root.methods().find(|m| m.name == "GetAll").unwrap();
        assert_eq!(
            m.return_type,
            Some(crate::ast::TypeRef::named("DataSet"))
        );
    }

    #[test]
    fn test_typed_dataset_without_name_aborts_run() {
        let o = options(r#"<StoredProcedure Name="Bad" ReturnType="TypedDataSet" />"#);
        let sigs = vec![signature("Bad")];
        let err = Generator::new(&o, &sigs).generate("App.Data").unwrap_err();
        assert!(matches!(err, GenerateError::TypedResultMissingName { .. }));
    }

    #[test]
    fn test_identifier_format_shapes_method_names() {
        let o = options(
            r#"<IdentifierFormat Value="pascal" />
               <DefaultMapping Prefix="usp_" Delim="_" />"#,
        );
        let sigs = vec![signature("usp_orders_get_all")];
        let ns = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        let root = &ns.classes[0];
        let orders = root.classes().find(|c| c.name == "orders").unwrap();
        assert!(orders.methods().all(|m| m.name == "GetAll"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let o = options(r#"<DefaultMapping Prefix="usp_" Delim="_" />"#);
        let mut sigs = Vec::new();
        for name in ["usp_Zeta_A", "usp_Alpha_B", "GetUser", "usp_Zeta_C"] {
            let mut sig = signature(name);
            sig.parameters.push(ParameterDescriptor {
                name: "@id".to_string(),
                direction: ParamDirection::Input,
                raw_type: "int".to_string(),
                size: -1,
                nullable: false,
            });
            sigs.push(sig);
        }
        let first = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        let second = Generator::new(&o, &sigs).generate("App.Data").unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = first.classes[0].classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }
}
