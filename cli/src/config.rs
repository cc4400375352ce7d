//! Run configuration
//!
//! A [`RunConfig`] is read from an optional JSON file; every field has a
//! default and command-line flags override what the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypoint_core::prelude::LabelConfig;

use crate::args::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text tables
    #[default]
    Text,
    /// One JSON document
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Vertex label alphabet
    pub labels: LabelConfig,

    /// Seed for the random source pick; entropy when unset
    pub seed: Option<u64>,

    pub format: OutputFormat,

    /// File receiving the JSON execution trace
    pub trace: Option<PathBuf>,

    /// Maximum recorded events per engine
    pub trace_capacity: Option<usize>,
}

impl RunConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Overrides file values with flags given on the command line
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(trace) = &args.trace {
            self.trace = Some(trace.clone());
        }
    }
}
