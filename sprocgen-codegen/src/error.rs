use thiserror::Error;

/// A generation-fatal failure. Unlike catalog probe failures, these abandon
/// the whole run: once synthesis has started, no partial output is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(
        "procedure '{procedure}': the return type was specified as TypedDataSet, but no TypedDataSet name was specified"
    )]
    TypedResultMissingName { procedure: String },

    #[error(
        "procedure '{procedure}': cannot read nullable parameter '{parameter}' of wire type {wire}"
    )]
    UnsupportedNullableType {
        procedure: String,
        parameter: String,
        wire: String,
    },
}
