// crates/psort_core/src/consts.rs

use core::mem::size_of;

/// Encoded width of one item inside a particle file.
pub const ITEM_BYTES: usize = size_of::<i32>();

/// Items held in memory per batch when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 5_000_000;

/// Upper bound on the batch buffer reserved up front; larger batches grow on demand.
pub const INITIAL_BATCH_RESERVE: usize = 1 << 16;

pub const SCRATCH_PREFIX: &str = "psort-";
pub const PARTICLE_PREFIX: &str = "particle-";

/// Buffer used by particle writers and readers.
pub const IO_BUFFER_SIZE: usize = 64 * 1024;

const _: () = { assert!(ITEM_BYTES == 4); };
