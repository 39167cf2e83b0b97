use thiserror::Error;

/// Validation failures detected after a file has been parsed.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset contains no rows")]
    Empty,

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has unsupported type {found}")]
    UnsupportedType { column: String, found: String },

    #[error("unparsable value in column '{column}': {reason}")]
    Unparsable { column: String, reason: String },

    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },
}
