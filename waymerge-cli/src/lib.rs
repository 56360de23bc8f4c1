//! Command-line interface for merging OpenStreetMap ways into lines.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod lines;

pub use error::CliError;
use lines::{LinesArgs, run_lines};

pub(crate) const ARG_OSM_PBF: &str = "osm-pbf";
pub(crate) const ARG_SPLIT_AT: &str = "split-at";
pub(crate) const ARG_THREADS: &str = "threads";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_PER_WAY: &str = "per-way";
pub(crate) const ENV_OSM_PBF: &str = "WAYMERGE_CMDS_LINES_OSM_PBF";

/// Run the waymerge CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, when
/// the input cannot be read, or when features cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Lines(args) => run_lines(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymerge",
    about = "Merge OpenStreetMap ways into continuous lines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge route relations (or single ways) into multilinestrings.
    Lines(LinesArgs),
}

#[cfg(test)]
mod tests;
