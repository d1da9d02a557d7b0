//! K-way streaming merge of sealed particles.
//!
//! The merge frontier keeps one buffered head per active particle in a
//! fixed-capacity slot array. Every step scans the live slots for the
//! smallest head (O(k)), hands it to the sink, then refills that slot from
//! its particle or drops the slot by swapping it past the active count.

use crate::errors::Result;
use crate::particle::{ParticleReader, ParticleSource};
use crate::scratch::ScratchArea;
use crate::sink::Sink;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
struct Slot {
    /// Creation index of the particle this head came from.
    particle: usize,
    head: i32,
}

/// Merges sealed particles into one ascending stream.
///
/// Readers are indexed by creation order. Each reader is closed exactly once:
/// when it runs dry during the merge, or when the merger finishes or is
/// dropped, whichever comes first.
pub struct Merger<S: ParticleSource = ParticleReader> {
    readers: Vec<Option<S>>,
    slots: Vec<Slot>,
    active: usize,
    // Declared last so particle handles go before their directory.
    scratch: Option<ScratchArea>,
}

impl<S: ParticleSource> Merger<S> {
    pub fn new(readers: Vec<S>) -> Self {
        Self {
            slots: Vec::with_capacity(readers.len()),
            readers: readers.into_iter().map(Some).collect(),
            active: 0,
            scratch: None,
        }
    }

    /// Keeps the scratch area alive for as long as the particles are read.
    pub(crate) fn with_scratch(mut self, scratch: ScratchArea) -> Self {
        self.scratch = Some(scratch);
        self
    }

    pub fn particle_count(&self) -> usize {
        self.readers.len()
    }

    /// Streams every item into `sink` in ascending order and returns how many
    /// were emitted. All readers are closed before this returns, including
    /// when a reader or the sink fails.
    pub fn drain_into<K: Sink>(mut self, mut sink: K) -> Result<u64> {
        info!(particles = self.readers.len(), "merge: start");
        let outcome = self.merge(&mut sink);
        self.close_all();
        if let Ok(n) = &outcome {
            info!(items = *n, "merge: done");
        }
        outcome
    }

    fn merge<K: Sink>(&mut self, sink: &mut K) -> Result<u64> {
        self.fill_frontier()?;
        let mut emitted = 0u64;
        while self.active > 0 {
            let at = self.min_slot();
            let Slot { particle, head } = self.slots[at];
            sink.accept(head)?;
            emitted += 1;
            self.refill(at, particle)?;
        }
        Ok(emitted)
    }

    fn fill_frontier(&mut self) -> Result<()> {
        self.slots.clear();
        for (particle, reader) in self.readers.iter_mut().enumerate() {
            let Some(r) = reader else { continue };
            if r.has_next() {
                let head = r.read_int()?;
                self.slots.push(Slot { particle, head });
            }
        }
        self.active = self.slots.len();
        Ok(())
    }

    /// Smallest head; equal heads resolve to the earliest created particle.
    fn min_slot(&self) -> usize {
        let live = &self.slots[..self.active];
        let mut best = 0;
        for (i, s) in live.iter().enumerate().skip(1) {
            let b = &live[best];
            if (s.head, s.particle) < (b.head, b.particle) {
                best = i;
            }
        }
        best
    }

    fn refill(&mut self, at: usize, particle: usize) -> Result<()> {
        if let Some(r) = self.readers[particle].as_mut() {
            if r.has_next() {
                self.slots[at].head = r.read_int()?;
                return Ok(());
            }
        }
        self.shrink(at, particle);
        Ok(())
    }

    fn shrink(&mut self, at: usize, particle: usize) {
        self.active -= 1;
        self.slots.swap(at, self.active);
        if let Some(mut r) = self.readers[particle].take() {
            r.close();
            debug!(particle, active = self.active, "particle exhausted");
        }
    }

    fn close_all(&mut self) {
        self.active = 0;
        for r in self.readers.iter_mut() {
            if let Some(mut r) = r.take() {
                r.close();
            }
        }
    }
}

impl<S: ParticleSource> Drop for Merger<S> {
    fn drop(&mut self) {
        self.close_all();
    }
}
