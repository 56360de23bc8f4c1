//! Error types emitted by the waymerge CLI.

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;
use waymerge_data::{OsmIngestError, PipelineError};

/// Errors emitted by the waymerge CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile { field: &'static str, path: PathBuf },
    /// OSM ingestion failed.
    #[error("failed to ingest OSM data: {0}")]
    OsmIngest(#[from] OsmIngestError),
    /// Building or running the line pipeline failed.
    #[error("failed to merge lines: {0}")]
    Pipeline(#[from] PipelineError),
    /// The output file could not be created.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing features failed.
    #[error("failed to write features: {0}")]
    WriteOutput(#[source] std::io::Error),
}
