use std::fmt;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    /// The write was malformed (blank title, id mismatch). Never retried.
    Validation(String),
    /// No record with the requested id.
    NotFound,
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(message) => write!(f, "{}", message),
            ServiceError::NotFound => write!(f, "book not found"),
            ServiceError::Store(err) => write!(f, "store error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}
