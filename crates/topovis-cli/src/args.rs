//! Command-line argument definitions for the topovis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the trace documents to render, where the
//! SVG files go, the configuration file, extra metadata and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

use topovis::{Metadata, layout::LayoutEngine};

/// Command-line arguments for the topovis network diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Trace documents to render; standard input is read when none are given
    #[arg(help = "Paths to the input trace documents")]
    pub inputs: Vec<PathBuf>,

    /// Directory the SVG files are written to, one per network
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Metadata embedded in every diagram, as `key=value` pairs joined by `&`
    #[arg(short, long, value_parser = parse_metadata)]
    pub metadata: Option<Metadata>,

    /// Layout engine, overriding the configuration (layered, block)
    #[arg(long)]
    pub layout: Option<LayoutEngine>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parses `k1=v1&k2=v2` into ordered metadata entries.
///
/// Empty segments are ignored; a later duplicate key replaces the earlier
/// value but keeps its position.
fn parse_metadata(value: &str) -> Result<Metadata, String> {
    let mut metadata = Metadata::new();
    for pair in value.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("metadata entry `{pair}` is not of the form key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("metadata entry `{pair}` has an empty key"));
        }
        metadata.insert(key.to_string(), value.to_string());
    }
    Ok(metadata)
}
