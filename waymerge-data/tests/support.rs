// PBF datasets shared by the ingestion tests, stored as Base64 text under
// `tests/fixtures`. This file is also pulled into the unit tests with
// `include!`, so it carries no inner attributes or docs.

use base64::{Engine as _, engine::general_purpose};
use geo::{Coord, Rect};
use std::{fs, path::PathBuf};
use tempfile::{Builder, TempPath};

/// Nodes in a PBF block sit on a 100-nanodegree grid.
const GRID_STEP: f64 = 1.0e-7;

/// Encoded datasets available to the tests.
#[derive(Debug, Clone, Copy)]
pub enum Dataset {
    /// Five nodes, four ways and two relations around a small road junction.
    Junction,
    /// Bytes that are not a PBF stream.
    Invalid,
}

impl Dataset {
    const fn stem(self) -> &'static str {
        match self {
            Self::Junction => "junction",
            Self::Invalid => "invalid",
        }
    }
}

/// Directory containing the encoded datasets.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Write `dataset` to a temporary `.osm.pbf` file removed on drop.
pub fn decode_fixture(dataset: Dataset) -> TempPath {
    let stem = dataset.stem();
    let encoded_path = fixtures_dir().join(format!("{stem}.osm.pbf.b64"));
    let encoded = fs::read_to_string(&encoded_path)
        .unwrap_or_else(|err| panic!("cannot read {encoded_path:?}: {err}"));
    let compact: String = encoded.split_ascii_whitespace().collect();
    let bytes = general_purpose::STANDARD
        .decode(compact)
        .unwrap_or_else(|err| panic!("{encoded_path:?} is not Base64: {err}"));

    let path = Builder::new()
        .prefix(stem)
        .suffix(".osm.pbf")
        .tempfile()
        .unwrap_or_else(|err| panic!("cannot stage {stem} dataset: {err}"))
        .into_temp_path();
    fs::write(&path, bytes).unwrap_or_else(|err| panic!("cannot write {stem} dataset: {err}"));
    path
}

/// Assert a decoded node location lands on `(x, y)` to within one grid step.
#[expect(
    clippy::float_arithmetic,
    reason = "grid distance between decoded and expected locations"
)]
pub fn assert_on_grid(actual: Coord<f64>, (x, y): (f64, f64)) {
    let offset = (actual.x - x).abs().max((actual.y - y).abs());
    assert!(
        offset <= GRID_STEP,
        "expected ({x}, {y}), decoded ({}, {}), off by {offset}",
        actual.x,
        actual.y
    );
}

/// Assert `bounds` spans from `min` to `max` on the node grid.
pub fn assert_bounds(bounds: Rect<f64>, min: (f64, f64), max: (f64, f64)) {
    assert_on_grid(bounds.min(), min);
    assert_on_grid(bounds.max(), max);
}
