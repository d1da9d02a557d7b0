use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Config: {0}")]
    Config(String),

    #[error("Parse: line {line}: not an integer: {token:?}")]
    Parse { line: u64, token: String },

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Backing storage ended before the recorded element count was read.
    #[error("Truncated particle: {expected} more item(s) expected")]
    Truncated { expected: u64 },

    #[error("Particle exhausted")]
    Exhausted,
}

impl SortError {
    /// True for every failure reading or writing particle storage or streams.
    pub fn is_io_fault(&self) -> bool {
        matches!(self, SortError::Io(_) | SortError::Truncated { .. } | SortError::Exhausted)
    }
}

pub type Result<T> = std::result::Result<T, SortError>;
