use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The host type is none of: scalar, enum, map, sequence, generic
    /// parameter, class. Aborts the whole pass.
    #[error("cannot represent type `{name}`: {reason}")]
    Unrepresentable { name: String, reason: String },

    #[error("definition for `{name}` is already registered")]
    DuplicateDefinition { name: String },

    #[error("declaration `{name}` is defined more than once")]
    DuplicateDeclaration { name: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {}: {message}", path.display())]
    Catalog { path: PathBuf, message: String },

    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error("input pattern matched no files: {0}")]
    NoMatches(String),
}

impl GenerateError {
    pub fn unrepresentable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
