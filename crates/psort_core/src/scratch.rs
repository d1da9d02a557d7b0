//! Process-wide scratch area that hands out one fresh file per spilled batch.

use crate::consts::{PARTICLE_PREFIX, SCRATCH_PREFIX};
use crate::errors::Result;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Temporary directory owning every particle file of one sort run.
/// Dropping it removes the directory and whatever is still inside.
#[derive(Debug)]
pub struct ScratchArea {
    dir: TempDir,
}

impl ScratchArea {
    /// Creates the scratch directory under `parent`, or the OS temp dir.
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut b = tempfile::Builder::new();
        b.prefix(SCRATCH_PREFIX);
        let dir = match parent {
            Some(p) => b.tempdir_in(p)?,
            None => b.tempdir()?,
        };
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// New uniquely named file for the particle with creation index `index`.
    pub fn allocate(&self, index: usize) -> Result<NamedTempFile> {
        let f = tempfile::Builder::new()
            .prefix(&format!("{PARTICLE_PREFIX}{index:06}-"))
            .tempfile_in(self.dir.path())?;
        Ok(f)
    }
}
