// ─── Error ──────────────────────────────────────────────────────────────────
use crate::types::DataType;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Type mismatch at field {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        index: usize,
        expected: DataType,
        actual: DataType,
    },
    #[error("Field index {index} out of range for a schema of {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
    /// `index: None` is a tree read before it got a buffer. `Some(i)` is the
    /// TREE field `i` with no registered child, so neither it nor anything
    /// after it can be located.
    #[error("{}", unbound_target(.index))]
    NotBound { index: Option<usize> },
    #[error("Buffer underrun: needed {needed} bytes, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },
    #[error("Unsupported charset: {0}")]
    CharsetUnsupported(SmolStr),
    #[error("Length mismatch: expected at most {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Position {position} is past the end of a {len}-byte buffer")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Schema has only {slots} TREE fields")]
    TooManyChildren { slots: usize },
    /// Also raised on access when a code-built schema left a MUABLE0
    /// length out, since nothing at or after that field has an offset.
    #[error("MUABLE0 field {index} declares no length")]
    MissingLength { index: usize },
    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),
}

fn unbound_target(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!("No child tree registered for field {index}"),
        None => "Tree is not bound to a buffer".to_owned(),
    }
}
