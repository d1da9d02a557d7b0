//! One-pass accumulate → finish → drain pipeline.
//!
//! A run is strictly sequential: one accumulator per input stream, fed in
//! arrival order. Partial accumulators cannot be combined.

use crate::accumulator::BatchAccumulator;
use crate::config::SortConfig;
use crate::errors::Result;
use crate::input::parse_lines;
use crate::sink::{Sink, TextSink};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Totals of one sort run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStats {
    pub items_in: u64,
    pub particles: usize,
    pub items_out: u64,
}

/// Sorts `items` into `sink`. The first `Err` item aborts the run before any
/// output is produced.
pub fn sort_items<I, K>(items: I, config: &SortConfig, sink: K) -> Result<SortStats>
where
    I: IntoIterator<Item = Result<i32>>,
    K: Sink,
{
    let mut acc = BatchAccumulator::new(config)?;
    for item in items {
        acc.accept(item?)?;
    }
    let items_in = acc.items_accepted();
    let merger = acc.finish()?;
    let particles = merger.particle_count();
    let items_out = merger.drain_into(sink)?;
    Ok(SortStats { items_in, particles, items_out })
}

/// Sorts a text file of decimal integers (one per line) into `output`.
pub fn sort_file(input: &Path, output: &Path, config: &SortConfig) -> Result<SortStats> {
    info!(input = %input.display(), output = %output.display(), batch_size = config.batch_size, "sort: start");
    let reader = BufReader::new(File::open(input)?);
    let mut sink = TextSink::new(BufWriter::new(File::create(output)?));
    let stats = sort_items(parse_lines(reader), config, &mut sink)?;
    let out = sink.finish()?;
    out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    info!(
        items_in = stats.items_in,
        items_out = stats.items_out,
        particles = stats.particles,
        "sort: done"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SortError;
    use tempfile::tempdir;

    fn ok(items: &[i32]) -> impl Iterator<Item = Result<i32>> + '_ {
        items.iter().copied().map(Ok)
    }

    #[test]
    fn small_batch_scenario() {
        let tmp = tempdir().unwrap();
        let cfg = SortConfig::default().with_batch_size(2).with_scratch_dir(tmp.path());
        let mut out: Vec<i32> = Vec::new();
        let stats = sort_items(ok(&[5, 3, 3, 1]), &cfg, &mut out).unwrap();
        assert_eq!(out, vec![1, 3, 3, 5]);
        assert_eq!(stats, SortStats { items_in: 4, particles: 2, items_out: 4 });
    }

    #[test]
    fn single_item_large_batch() {
        let tmp = tempdir().unwrap();
        let cfg = SortConfig::default().with_batch_size(10).with_scratch_dir(tmp.path());
        let mut out: Vec<i32> = Vec::new();
        let stats = sort_items(ok(&[7]), &cfg, &mut out).unwrap();
        assert_eq!(out, vec![7]);
        assert_eq!(stats.particles, 1);
    }

    #[test]
    fn parse_error_aborts_without_output() {
        let tmp = tempdir().unwrap();
        let cfg = SortConfig::default().with_batch_size(1).with_scratch_dir(tmp.path());
        let items = vec![Ok(3), Err(SortError::Parse { line: 2, token: "z".into() }), Ok(1)];
        let mut out: Vec<i32> = Vec::new();
        let err = sort_items(items, &cfg, &mut out).unwrap_err();
        assert!(matches!(err, SortError::Parse { line: 2, .. }));
        assert!(out.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn sorts_a_text_file() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("in.txt");
        let output = tmp.path().join("out.txt");
        std::fs::write(&input, "10\n-1\n7\n7\n0\n").unwrap();
        let cfg = SortConfig::default().with_batch_size(2);
        let stats = sort_file(&input, &output, &cfg).unwrap();
        assert_eq!(stats.items_in, 5);
        assert_eq!(stats.items_out, 5);
        assert_eq!(stats.particles, 3);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "-1\n0\n7\n7\n10\n");
    }
}
