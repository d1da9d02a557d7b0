use crate::config::SortConfig;
use crate::consts::INITIAL_BATCH_RESERVE;
use crate::errors::Result;
use crate::merger::Merger;
use crate::particle::ParticleWriter;
use crate::scratch::ScratchArea;
use tracing::{debug, info};

/// Buffers incoming items up to the batch size, spilling each full batch as a
/// sorted particle.
pub struct BatchAccumulator {
    batch_size: usize,
    batch: Vec<i32>,
    particles: Vec<ParticleWriter>,
    accepted: u64,
    scratch: ScratchArea,
}

impl BatchAccumulator {
    pub fn new(config: &SortConfig) -> Result<Self> {
        config.validate()?;
        let scratch = ScratchArea::create(config.scratch_dir.as_deref())?;
        debug!(dir = %scratch.path().display(), batch_size = config.batch_size, "scratch area ready");
        Ok(Self {
            batch_size: config.batch_size,
            batch: Vec::with_capacity(config.batch_size.min(INITIAL_BATCH_RESERVE)),
            particles: Vec::new(),
            accepted: 0,
            scratch,
        })
    }

    /// Adds one item. A batch that is already full is spilled first, so the
    /// buffer never holds more than `batch_size` items.
    pub fn accept(&mut self, value: i32) -> Result<()> {
        if self.batch.len() == self.batch_size {
            self.spill()?;
        }
        self.batch.push(value);
        self.accepted += 1;
        Ok(())
    }

    /// Spills the trailing batch (if it holds anything) and seals every
    /// particle, in creation order, into a merger.
    pub fn finish(mut self) -> Result<Merger> {
        if !self.batch.is_empty() {
            self.spill()?;
        }
        info!(items = self.accepted, particles = self.particles.len(), "accumulate: done");
        let readers = self
            .particles
            .into_iter()
            .map(ParticleWriter::seal)
            .collect::<Result<Vec<_>>>()?;
        Ok(Merger::new(readers).with_scratch(self.scratch))
    }

    pub fn batch_size(&self) -> usize { self.batch_size }
    pub fn items_accepted(&self) -> u64 { self.accepted }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn buffered(&self) -> usize { self.batch.len() }

    fn spill(&mut self) -> Result<()> {
        self.batch.sort_unstable();
        let index = self.particles.len();
        let mut w = ParticleWriter::create(&self.scratch, index)?;
        for &v in &self.batch {
            w.write_int(v)?;
        }
        debug!(particle = index, items = w.len(), "spilled batch");
        self.particles.push(w);
        self.batch.clear();
        Ok(())
    }
}
