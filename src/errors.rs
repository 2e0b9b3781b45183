use crate::schema::DataKind;

/// Coarse classification of a [`CopyError`], handy for matching without
/// destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaMismatch,
    UnsupportedType,
    Format,
    VersionIncompatible,
    Io,
    DuplicateColumn,
    InvalidArgument,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// A mapping names a source column the input schema does not have.
    #[error("schema mismatch: source column '{source_column}' (for output '{output}') not found in input schema")]
    SchemaMismatch { source_column: String, output: String },

    #[error("unsupported column type '{kind}' for column '{column}'")]
    UnsupportedType { kind: DataKind, column: String },

    #[error("format error: {0}")]
    Format(String),

    /// Header signature or version outside what this reader accepts.
    #[error("version incompatible: found {found}, expected {expected}")]
    VersionIncompatible { found: String, expected: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate column '{0}' in schema")]
    DuplicateColumn(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CopyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CopyError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            CopyError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            CopyError::Format(_) => ErrorKind::Format,
            CopyError::VersionIncompatible { .. } => ErrorKind::VersionIncompatible,
            CopyError::Io(_) => ErrorKind::Io,
            CopyError::DuplicateColumn(_) => ErrorKind::DuplicateColumn,
            CopyError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CopyError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn format(msg: impl Into<String>) -> Self {
        CopyError::Format(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CopyError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for CopyError {
    fn from(e: serde_json::Error) -> Self {
        CopyError::InvalidArgument(format!("options: {e}"))
    }
}

impl From<std::string::FromUtf8Error> for CopyError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        CopyError::Format(format!("invalid utf-8 in string: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, CopyError>;
