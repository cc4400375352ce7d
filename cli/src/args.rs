use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "waypoint",
    about = "Shortest paths and minimum spanning trees over lettered graphs",
    version
)]
pub struct Args {
    /// Graph description file
    #[arg(default_value = "input.txt")]
    pub input: PathBuf,

    /// Source vertex label; overrides the one in the input file
    #[arg(long)]
    pub source: Option<String>,

    /// JSON run configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the execution trace of each engine to this file
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Seed for the random source pick
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Level forced by the verbosity flags, `None` to defer to `RUST_LOG`
    pub fn log_level(&self) -> Option<LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["waypoint"]);
        assert_eq!(args.input, PathBuf::from("input.txt"));
        assert_eq!(args.source, None);
        assert_eq!(args.format, None);
        assert_eq!(args.log_level(), None);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "waypoint", "g.txt", "--source", "C", "--format", "json", "-vv",
        ]);
        assert_eq!(args.source.as_deref(), Some("C"));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_verbosity_saturates_at_trace() {
        let args = Args::parse_from(["waypoint", "-vvvvv"]);
        assert_eq!(args.log_level(), Some(LevelFilter::Trace));
    }
}
