//! Particle file format & IO
//!
//! A particle is one sorted run spilled by the accumulator:
//!   repeat count * { i32 value (BE, 4 bytes) }
//!
//! No header, no length prefix. The element count travels out-of-band from
//! the writer to the reader it seals into, so a reader is always built
//! knowing how many items to expect.

use crate::consts::IO_BUFFER_SIZE;
use crate::errors::{Result, SortError};
use crate::scratch::ScratchArea;
use crate::utils::{read_i32, write_i32};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tempfile::TempPath;
use tracing::debug;

/// Read side of a particle as seen by the merger.
pub trait ParticleSource {
    /// True while items remain.
    fn has_next(&self) -> bool;
    /// Next item; fails on corrupt or truncated storage.
    fn read_int(&mut self) -> Result<i32>;
    /// Releases the handle and backing storage. Never fails; safe to repeat.
    fn close(&mut self);
}

/// Writer: append-only, owns its file until [`ParticleWriter::seal`].
pub struct ParticleWriter {
    out: BufWriter<File>,
    path: TempPath,
    index: usize,
    count: u64,
}

impl ParticleWriter {
    /// Opens a fresh file in `scratch` for the particle numbered `index`.
    pub fn create(scratch: &ScratchArea, index: usize) -> Result<Self> {
        let (file, path) = scratch.allocate(index)?.into_parts();
        Ok(Self {
            out: BufWriter::with_capacity(IO_BUFFER_SIZE, file),
            path,
            index,
            count: 0,
        })
    }

    pub fn write_int(&mut self, value: i32) -> Result<()> {
        write_i32(&mut self.out, value)?;
        self.count += 1;
        Ok(())
    }

    pub fn index(&self) -> usize { self.index }
    pub fn len(&self) -> u64 { self.count }
    pub fn is_empty(&self) -> bool { self.count == 0 }
    pub fn path(&self) -> &Path { &self.path }

    /// Flush and close the write handle, then reopen the same file for reading.
    pub fn seal(self) -> Result<ParticleReader> {
        let ParticleWriter { out, path, index, count } = self;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        drop(file);
        let f = File::open(&path)?;
        debug!(particle = index, items = count, "sealed particle");
        Ok(ParticleReader {
            input: Some(BufReader::with_capacity(IO_BUFFER_SIZE, f)),
            index,
            len: count,
            remaining: count,
            backing: Some(path),
        })
    }
}

/// Reader: consumes a sealed particle front to back.
pub struct ParticleReader<R = BufReader<File>> {
    input: Option<R>,
    index: usize,
    len: u64,
    remaining: u64,
    backing: Option<TempPath>,
}

impl<R: Read> ParticleReader<R> {
    /// Binds an arbitrary byte source holding `count` encoded items.
    pub fn from_reader(input: R, count: u64) -> Self {
        Self { input: Some(input), index: 0, len: count, remaining: count, backing: None }
    }

    pub fn index(&self) -> usize { self.index }
    pub fn len(&self) -> u64 { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn remaining(&self) -> u64 { self.remaining }
    pub fn is_closed(&self) -> bool { self.input.is_none() }
}

impl<R: Read> ParticleSource for ParticleReader<R> {
    fn has_next(&self) -> bool {
        self.remaining != 0
    }

    fn read_int(&mut self) -> Result<i32> {
        if self.remaining == 0 {
            return Err(SortError::Exhausted);
        }
        let input = self.input.as_mut().ok_or(SortError::Exhausted)?;
        match read_i32(input) {
            Ok(v) => {
                self.remaining -= 1;
                Ok(v)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(SortError::Truncated { expected: self.remaining })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) {
        self.input = None;
        if let Some(path) = self.backing.take() {
            if let Err(e) = path.close() {
                debug!(particle = self.index, "ignoring particle cleanup failure: {e}");
            }
        }
    }
}

impl<R: Read> Iterator for ParticleReader<R> {
    type Item = Result<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() { return None; }
        Some(self.read_int())
    }
}
