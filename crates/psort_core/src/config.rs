use crate::consts::DEFAULT_BATCH_SIZE;
use crate::errors::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration handed to [`crate::BatchAccumulator::new`].
///
/// JSON form:
/// ```json
/// { "batch_size": 1000000, "scratch_dir": "/var/tmp" }
/// ```
/// `scratch_dir` is optional; without it particles go to the OS temp dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub batch_size: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE, scratch_dir: None }
    }
}

impl SortConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Reads a config file. The result is not validated yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: SortConfig = serde_json::from_str(&s)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SortError::Config("batch size must be greater than zero".into()));
        }
        if let Some(dir) = &self.scratch_dir {
            if !dir.is_dir() {
                return Err(SortError::Config(format!(
                    "scratch dir {} is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Converts a signed batch size coming from user input.
pub fn batch_size_from_i64(n: i64) -> Result<usize> {
    if n <= 0 {
        return Err(SortError::Config(format!("batch size must be greater than zero, got {n}")));
    }
    usize::try_from(n).map_err(|_| SortError::Config(format!("batch size {n} is too large")))
}
