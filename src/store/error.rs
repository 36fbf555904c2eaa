use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// The catalog file exists but is not a valid JSON array of books.
    /// Fatal for the operation: the store never rewrites a corrupt file.
    Corrupt { path: PathBuf, detail: String },
    Encode(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "catalog file i/o error: {}", err),
            StoreError::Corrupt { path, detail } => {
                write!(f, "catalog file {} is corrupt: {}", path.display(), detail)
            }
            StoreError::Encode(detail) => write!(f, "failed to encode catalog: {}", detail),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}
