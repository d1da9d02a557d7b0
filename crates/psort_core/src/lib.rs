pub mod consts;
pub mod errors;
pub mod utils;
pub mod config;
pub mod scratch;
pub mod particle;
pub mod sink;
pub mod input;
pub mod merger;
pub mod accumulator;
pub mod driver;
pub mod generator;

pub use accumulator::BatchAccumulator;
pub use config::SortConfig;
pub use driver::{sort_file, sort_items, SortStats};
pub use errors::{Result, SortError};
pub use input::parse_lines;
pub use merger::Merger;
pub use particle::{ParticleReader, ParticleSource, ParticleWriter};
pub use scratch::ScratchArea;
pub use sink::{Sink, TextSink};
