//! Focused unit tests covering lines configuration and output.

use super::helpers::DatasetFiles;
use super::*;
use crate::lines::LinesArgs;
use clap::Parser;
use rstest::{fixture, rstest};
use std::{fs, path::PathBuf};
use waymerge_core::Geometry;
use waymerge_core::test_support::lines;
use waymerge_data::{BatchMode, LineFeature, PipelineError, PipelineOptions};

#[fixture]
fn dataset() -> DatasetFiles {
    DatasetFiles::new()
}

fn config_for(dataset: &DatasetFiles, mode: BatchMode, split_at: Option<f64>) -> LinesConfig {
    LinesConfig {
        osm_pbf: dataset.osm().to_path_buf(),
        output: Some(dataset.output()),
        mode,
        pipeline: PipelineOptions {
            split_at,
            threads: 1,
        },
    }
}

#[rstest]
fn converting_without_osm_pbf_errors() {
    let err = LinesConfig::try_from(LinesArgs::default()).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OSM_PBF);
            assert_eq!(env, ENV_OSM_PBF);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn parsing_flags_fills_the_config() {
    let cli = Cli::try_parse_from([
        "waymerge",
        "lines",
        "--osm-pbf",
        "planet.osm.pbf",
        "--split-at",
        "0.5",
        "--threads",
        "-2",
        "--per-way",
    ])
    .expect("flags parse");
    let Command::Lines(args) = cli.command;
    let config = LinesConfig::try_from(args).expect("config builds");
    assert_eq!(
        config,
        LinesConfig {
            osm_pbf: PathBuf::from("planet.osm.pbf"),
            output: None,
            mode: BatchMode::Ways,
            pipeline: PipelineOptions {
                split_at: Some(0.5),
                threads: -2,
            },
        }
    );
}

#[rstest]
fn relations_are_the_default_batch_mode() {
    let args = LinesArgs {
        osm_pbf: Some(PathBuf::from("planet.osm.pbf")),
        ..LinesArgs::default()
    };
    let config = LinesConfig::try_from(args).expect("config builds");
    assert_eq!(config.mode, BatchMode::Relations);
    assert_eq!(config.pipeline, PipelineOptions::default());
}

#[rstest]
#[case::missing("missing.osm.pbf")]
#[case::directory("")]
fn validate_sources_rejects_unreadable_inputs(dataset: DatasetFiles, #[case] name: &str) {
    let config = LinesConfig {
        osm_pbf: dataset.root().join(name),
        ..config_for(&dataset, BatchMode::Relations, None)
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_OSM_PBF),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn write_features_emits_tab_separated_rows() {
    let features = [
        LineFeature {
            id: 100,
            geometry: Geometry::MultiLineString(lines(&[&[(1.0, 1.0), (2.0, 1.0)]])),
        },
        LineFeature {
            id: 101,
            geometry: Geometry::MultiLineString(lines(&[
                &[(0.0, 0.0), (0.5, 0.0)],
                &[(3.0, 3.0), (3.0, 4.0)],
            ])),
        },
    ];
    let mut buffer = Vec::new();
    write_features(&mut buffer, &features).expect("write to memory");
    assert_eq!(
        String::from_utf8(buffer).expect("utf-8 output"),
        "100\tMULTILINESTRING((1 1,2 1))\n101\tMULTILINESTRING((0 0,0.5 0),(3 3,3 4))\n"
    );
}

#[rstest]
#[case::relations(BatchMode::Relations, "100\tMULTILINESTRING((3 3,4 3))\n")]
#[case::ways(
    BatchMode::Ways,
    "10\tMULTILINESTRING((1 1,2 1))\n11\tMULTILINESTRING((2 1,2 2))\n"
)]
fn execute_writes_features_to_output(
    dataset: DatasetFiles,
    #[case] mode: BatchMode,
    #[case] expected: &str,
) {
    let config = config_for(&dataset, mode, None);
    execute(&config).expect("lines command succeeds");
    let written = fs::read_to_string(dataset.output()).expect("read output");
    assert_eq!(written, expected);
}

#[rstest]
fn execute_splits_long_lines(dataset: DatasetFiles) {
    let config = config_for(&dataset, BatchMode::Relations, Some(0.5));
    execute(&config).expect("lines command succeeds");
    let written = fs::read_to_string(dataset.output()).expect("read output");
    assert_eq!(written, "100\tMULTILINESTRING((3 3,3.5 3),(3.5 3,4 3))\n");
}

#[rstest]
fn execute_rejects_unusable_split_length(dataset: DatasetFiles) {
    let config = config_for(&dataset, BatchMode::Relations, Some(0.0));
    let err = execute(&config).expect_err("zero split length should fail");
    match err {
        CliError::Pipeline(PipelineError::SplitLength { .. }) => {}
        other => panic!("expected SplitLength, found {other:?}"),
    }
    assert!(!dataset.output().exists(), "no output should be written");
}
