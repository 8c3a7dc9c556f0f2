use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Key not found")]
    KeyNotFound,
    #[error("Initial capacity must be between 1 and {max}, got {0}", max = crate::config::MAX_INITIAL_M)]
    InvalidCapacity(usize),
    #[error("Load factor threshold must be finite and at least {min}, got {0}", min = crate::config::MIN_LOAD_FACTOR_THRESHOLD)]
    InvalidThreshold(f64),
}

#[derive(Error, Debug)]
pub enum CountError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Counting task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Invalid table configuration: {0}")]
    Config(#[from] TableError),
}
