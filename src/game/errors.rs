use thiserror::Error;

use crate::validation::NameError;

/// Errors raised by the progression engine, its catalog loader and its save backends.
///
/// Rules-level rejections (unknown quest, unaffordable skill, quest already done today)
/// are not errors: those operations report them through `Option`/`bool` returns.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around IO errors (save files, lock files, catalog files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Stored bytes were not valid UTF-8.
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Hero name rejected during character creation.
    #[error("invalid hero name: {0}")]
    InvalidName(#[from] NameError),

    /// Character creation referenced a class the catalog does not define.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// A loaded content catalog failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}
