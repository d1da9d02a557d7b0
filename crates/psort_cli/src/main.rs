use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use psort_core::{config::batch_size_from_i64, generator::generate, sort_file, SortConfig};

#[derive(Parser)]
#[command(name = "psort", version, about = "psort: external sort of 32-bit integers")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Sort a file of decimal integers, one per line.
    Sort {
        /// File with the incoming data
        #[arg(long)]
        input: PathBuf,
        /// Result file (default: <yyyyMMddHHmmss>.txt in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Items sorted in memory per particle
        #[arg(long, allow_negative_numbers = true)]
        batch_size: Option<i64>,
        /// Directory for particle files (default: OS temp dir)
        #[arg(long)]
        scratch_dir: Option<PathBuf>,
        /// JSON config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print run totals as JSON
        #[arg(long, default_value_t = false)]
        stats_json: bool,
    },

    /// Write random integers, one per line.
    Generate {
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        amount: u64,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn absolute(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(p))
}

fn check_input(p: &Path) -> Result<PathBuf> {
    let p = absolute(p)?;
    if p.is_dir() {
        return Err(anyhow!("invalid incoming data path {}: file cannot be a directory", p.display()));
    }
    if !p.exists() {
        return Err(anyhow!("invalid incoming data path {}: file does not exist", p.display()));
    }
    Ok(p)
}

fn check_output(p: &Path) -> Result<PathBuf> {
    let p = absolute(p)?;
    if p.is_dir() {
        return Err(anyhow!("invalid outgoing data path {}: file cannot be a directory", p.display()));
    }
    Ok(p)
}

fn output_name(now: OffsetDateTime) -> Result<PathBuf> {
    let fmt = time::macros::format_description!("[year][month][day][hour][minute][second]");
    Ok(PathBuf::from(format!("{}.txt", now.format(&fmt)?)))
}

/// Local wall-clock time; falls back to UTC when the offset cannot be determined.
fn default_output() -> Result<PathBuf> {
    output_name(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
}

fn load_config(
    config: Option<PathBuf>,
    batch_size: Option<i64>,
    scratch_dir: Option<PathBuf>,
) -> Result<SortConfig> {
    let mut cfg = match config {
        Some(p) => SortConfig::load(&p).with_context(|| format!("config {}", p.display()))?,
        None => SortConfig::default(),
    };
    if let Some(n) = batch_size {
        cfg = cfg.with_batch_size(batch_size_from_i64(n)?);
    }
    if let Some(dir) = scratch_dir {
        cfg = cfg.with_scratch_dir(dir);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Sort { input, output, batch_size, scratch_dir, config, stats_json } => {
            let input = check_input(&input)?;
            let output = match output {
                Some(p) => check_output(&p)?,
                None => check_output(&default_output()?)?,
            };
            let cfg = load_config(config, batch_size, scratch_dir)?;

            if !stats_json {
                println!("started sorting data from {}", input.display());
                println!("the result will be placed in {}", output.display());
                println!("batch size of processed elements in memory: {}", cfg.batch_size);
            }

            let stats = sort_file(&input, &output, &cfg)
                .with_context(|| format!("sorting {}", input.display()))?;

            if stats_json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("total items found in the incoming data file: {}", stats.items_in);
                println!("total items were put in the result: {}", stats.items_out);
                println!("particles spilled: {}", stats.particles);
                println!("sorting data completed.");
            }
        }
        Cmd::Generate { output, amount, seed } => {
            let output = check_output(&output)?;
            println!("generating {amount} items into {}", output.display());
            let file = File::create(&output).with_context(|| format!("create {}", output.display()))?;
            let mut w = BufWriter::new(file);
            let n = match seed {
                Some(s) => generate(&mut w, amount, &mut StdRng::seed_from_u64(s))?,
                None => generate(&mut w, amount, &mut rand::rng())?,
            };
            println!("generated: {n}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psort_core::consts::DEFAULT_BATCH_SIZE;

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("cfg.json");
        std::fs::write(&p, r#"{ "batch_size": 10 }"#).unwrap();
        let cfg = load_config(Some(p.clone()), None, None).unwrap();
        assert_eq!(cfg.batch_size, 10);
        let cfg = load_config(Some(p), Some(3), None).unwrap();
        assert_eq!(cfg.batch_size, 3);
        let cfg = load_config(None, None, None).unwrap();
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn non_positive_batch_size_is_rejected() {
        assert!(load_config(None, Some(0), None).is_err());
        assert!(load_config(None, Some(-5), None).is_err());
    }

    #[test]
    fn default_output_is_timestamped() {
        let p = default_output().unwrap();
        let name = p.to_string_lossy();
        assert_eq!(name.len(), "20260101000000.txt".len());
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn output_name_keeps_the_clock_offset() {
        let now = time::macros::datetime!(2026-10-19 08:05:03 +2);
        assert_eq!(output_name(now).unwrap(), PathBuf::from("20261019080503.txt"));
    }
}
