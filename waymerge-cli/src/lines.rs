//! `lines` command: read an OSM PBF file, merge its ways and print WKT.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymerge_data::{
    BatchMode, IngestOptions, LineFeature, LinePipeline, PipelineOptions, ingest_osm_pbf,
};

use crate::{
    ARG_OSM_PBF, ARG_OUTPUT, ARG_PER_WAY, ARG_SPLIT_AT, ARG_THREADS, CliError, ENV_OSM_PBF,
};

/// CLI arguments for the `lines` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read ways and route relations from an OSM PBF file, merge \
                 each relation's member ways into maximal lines and print one \
                 `<id>\\t<WKT>` row per feature. Paths can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Merge OSM ways into lines"
)]
#[ortho_config(prefix = "WAYMERGE")]
pub(crate) struct LinesArgs {
    /// Path to the OpenStreetMap PBF file.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<PathBuf>,
    /// Split merged lines into pieces no longer than this length.
    #[arg(long = ARG_SPLIT_AT, value_name = "length")]
    #[serde(default)]
    pub(crate) split_at: Option<f64>,
    /// Worker threads; 0 uses every core, negative values leave cores free.
    #[arg(long = ARG_THREADS, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) threads: Option<i32>,
    /// Write features here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<PathBuf>,
    /// Merge every selected way on its own instead of per relation.
    #[arg(long = ARG_PER_WAY)]
    #[serde(default)]
    pub(crate) per_way: bool,
}

impl LinesArgs {
    pub(crate) fn into_config(self) -> Result<LinesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LinesConfig::try_from(merged)
    }
}

/// Resolved `lines` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinesConfig {
    pub(crate) osm_pbf: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) mode: BatchMode,
    pub(crate) pipeline: PipelineOptions,
}

impl LinesConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if self.osm_pbf.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field: ARG_OSM_PBF,
                path: self.osm_pbf.clone(),
            })
        }
    }
}

impl TryFrom<LinesArgs> for LinesConfig {
    type Error = CliError;

    fn try_from(args: LinesArgs) -> Result<Self, Self::Error> {
        let osm_pbf = args.osm_pbf.ok_or(CliError::MissingArgument {
            field: ARG_OSM_PBF,
            env: ENV_OSM_PBF,
        })?;
        let mode = if args.per_way {
            BatchMode::Ways
        } else {
            BatchMode::Relations
        };
        Ok(Self {
            osm_pbf,
            output: args.output,
            mode,
            pipeline: PipelineOptions {
                split_at: args.split_at,
                threads: args.threads.unwrap_or_default(),
            },
        })
    }
}

pub(crate) fn run_lines(args: LinesArgs) -> Result<(), CliError> {
    let config = resolve_lines_config(args)?;
    execute(&config)
}

pub(crate) fn resolve_lines_config(args: LinesArgs) -> Result<LinesConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Ingest, merge and write features for a resolved configuration.
pub(crate) fn execute(config: &LinesConfig) -> Result<(), CliError> {
    let pipeline = LinePipeline::new(config.pipeline)?;
    let report = ingest_osm_pbf(&config.osm_pbf, &IngestOptions::default())?;
    let batches = report.into_batches(config.mode);
    let features = pipeline.run(&batches)?;
    info!(
        "Merged {} batches into {} features using {} worker(s)",
        batches.len(),
        features.len(),
        pipeline.threads()
    );

    match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            write_features(&mut writer, &features)?;
            writer.flush().map_err(CliError::WriteOutput)
        }
        None => write_features(&mut io::stdout().lock(), &features),
    }
}

/// Write one `<id>\t<WKT>` row per feature.
pub(crate) fn write_features(
    writer: &mut dyn Write,
    features: &[LineFeature],
) -> Result<(), CliError> {
    for feature in features {
        writeln!(writer, "{}\t{}", feature.id, feature.geometry).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
