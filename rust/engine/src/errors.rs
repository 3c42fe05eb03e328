use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{pile} is full (capacity {capacity})")]
    PileOverflow { pile: &'static str, capacity: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersistError {
    #[error("No saved game found")]
    NotFound,
    #[error("Saved game truncated: {actual} of {expected} bytes")]
    Truncated { expected: usize, actual: usize },
    #[error("Saved game corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to write key {key}: {reason}")]
    Write { key: u32, reason: String },
}

impl From<GameError> for PersistError {
    fn from(e: GameError) -> Self {
        PersistError::Corrupt(e.to_string())
    }
}
