use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidInput(String),
    NotFound(String),
    EmptyStore,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            StoreError::NotFound(title) => write!(f, "movie not found: {title}"),
            StoreError::EmptyStore => write!(f, "no movies in database"),
        }
    }
}

impl std::error::Error for StoreError {}

pub type Result<T> = std::result::Result<T, StoreError>;
