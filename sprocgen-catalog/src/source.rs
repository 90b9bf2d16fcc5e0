//! The metadata-source collaborator contract.

use crate::descriptor::{ParameterDescriptor, ProcedureRef, ResultSetDescriptor};

/// Transport-level failure from a metadata source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Capability contract for whatever supplies catalog metadata: a live
/// server connection, or a replayed snapshot in tests.
///
/// Implementations are free to hold a blocking connection; the reader calls
/// them sequentially on one thread.
pub trait MetadataSource {
    /// List every stored procedure with its schema and name.
    fn list_procedures(&mut self) -> Result<Vec<ProcedureRef>, SourceError>;

    /// Describe the parameters of one procedure, in declaration order. The
    /// synthetic return-value entry may be included; the reader filters it.
    fn procedure_parameters(
        &mut self,
        schema: &str,
        name: &str,
    ) -> Result<Vec<ParameterDescriptor>, SourceError>;

    /// Execute a shape-only batch and report the column layout of each
    /// result set, without materializing rows.
    fn probe_result_sets(&mut self, batch: &str) -> Result<Vec<ResultSetDescriptor>, SourceError>;
}
