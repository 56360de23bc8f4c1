//! Test helpers for staging PBF datasets and layered overrides.

use super::*;
use crate::lines::LinesArgs;
use base64::{Engine as _, engine::general_purpose};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

#[derive(Debug, Clone, Default)]
pub(super) struct LayerOverrides {
    pub(super) osm_pbf: Option<PathBuf>,
    pub(super) split_at: Option<f64>,
    pub(super) threads: Option<i32>,
}

#[derive(Debug)]
pub(super) struct DatasetFiles {
    dir: TempDir,
    cli_osm: PathBuf,
    config_osm: PathBuf,
}

impl DatasetFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let cli_osm = dir.path().join("cli.osm.pbf");
        let config_osm = dir.path().join("config.osm.pbf");
        let contents = junction_pbf();
        for path in [&cli_osm, &config_osm] {
            fs::write(path, &contents).expect("write dataset file");
        }
        Self {
            dir,
            cli_osm,
            config_osm,
        }
    }

    pub(super) fn osm(&self) -> &Path {
        &self.cli_osm
    }

    pub(super) fn config_osm(&self) -> &Path {
        &self.config_osm
    }

    pub(super) fn output(&self) -> PathBuf {
        self.dir.path().join("lines.tsv")
    }

    pub(super) fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Decoded bytes of the junction dataset shared with the data crate.
fn junction_pbf() -> Vec<u8> {
    let encoded_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../waymerge-data/tests/fixtures/junction.osm.pbf.b64");
    let encoded = fs::read_to_string(&encoded_path).unwrap_or_else(|err| {
        panic!("failed to read base64 fixture {encoded_path:?}: {err}");
    });
    let cleaned: String = encoded
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect();
    general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .unwrap_or_else(|err| panic!("failed to decode base64 fixture {encoded_path:?}: {err}"))
}

pub(super) fn merge_layers(
    mut cli_args: LinesArgs,
    file_layer: Option<LayerOverrides>,
    env_layer: Option<LayerOverrides>,
) -> Result<LinesConfig, CliError> {
    merge_field(
        &mut cli_args.osm_pbf,
        extract_field(&env_layer, |layer| &layer.osm_pbf),
        extract_field(&file_layer, |layer| &layer.osm_pbf),
    );
    merge_field(
        &mut cli_args.split_at,
        extract_field(&env_layer, |layer| &layer.split_at),
        extract_field(&file_layer, |layer| &layer.split_at),
    );
    merge_field(
        &mut cli_args.threads,
        extract_field(&env_layer, |layer| &layer.threads),
        extract_field(&file_layer, |layer| &layer.threads),
    );
    resolve_lines_config(cli_args)
}

fn merge_field<T: Clone>(target: &mut Option<T>, env_value: Option<T>, file_value: Option<T>) {
    if target.is_none()
        && let Some(value) = env_value.or(file_value)
    {
        *target = Some(value);
    }
}

fn extract_field<T: Clone>(
    layer: &Option<LayerOverrides>,
    accessor: fn(&LayerOverrides) -> &Option<T>,
) -> Option<T> {
    layer.as_ref().and_then(|entry| accessor(entry).clone())
}
