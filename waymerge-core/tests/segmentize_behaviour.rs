//! Behavioural tests for `segmentize`.

use geo::Point;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs, path::PathBuf};
use waymerge_core::test_support::line;
use waymerge_core::{Geometry, GeometryError, segmentize};

type Outcome = RefCell<Option<Result<Geometry, GeometryError>>>;

#[fixture]
fn geometry() -> RefCell<Geometry> {
    RefCell::new(Geometry::Null)
}

#[fixture]
fn outcome() -> Outcome {
    RefCell::new(None)
}

#[given("a line from 0 0 to 1 0")]
fn given_unit_line(#[from(geometry)] geometry: &RefCell<Geometry>) {
    *geometry.borrow_mut() = Geometry::from(line(&[(0.0, 0.0), (1.0, 0.0)]));
}

#[given("a line through 0 0, 1 2 and 2 2")]
fn given_short_line(#[from(geometry)] geometry: &RefCell<Geometry>) {
    *geometry.borrow_mut() = Geometry::from(line(&[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0)]));
}

#[given("a line through 0 0, 1 0 and 3 0")]
fn given_mixed_line(#[from(geometry)] geometry: &RefCell<Geometry>) {
    *geometry.borrow_mut() = Geometry::from(line(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0)]));
}

#[given("a point at 3 4")]
fn given_point(#[from(geometry)] geometry: &RefCell<Geometry>) {
    *geometry.borrow_mut() = Geometry::Point(Point::new(3.0, 4.0));
}

#[when("I segmentize with a limit of {limit}")]
fn when_segmentize(
    limit: f64,
    #[from(geometry)] geometry: &RefCell<Geometry>,
    #[from(outcome)] outcome: &Outcome,
) {
    *outcome.borrow_mut() = Some(segmentize(&geometry.borrow(), limit));
}

#[then("the segmentized geometry renders as {wkt}")]
fn then_renders(wkt: String, #[from(outcome)] outcome: &Outcome) {
    let borrowed = outcome.borrow();
    match borrowed.as_ref().expect("segmentize was attempted") {
        Ok(geometry) => assert_eq!(geometry.to_string(), wkt),
        Err(err) => panic!("expected a geometry, got {err}"),
    }
}

#[then("an invalid maximum length error is returned")]
fn then_invalid_length(#[from(outcome)] outcome: &Outcome) {
    let borrowed = outcome.borrow();
    match borrowed.as_ref().expect("segmentize was attempted") {
        Err(GeometryError::InvalidMaxLength { max_length }) => {
            assert!(max_length.abs() < f64::EPSILON, "unexpected limit {max_length}");
        }
        other => panic!("expected an invalid length error, got {other:?}"),
    }
}

#[then("an unsupported geometry error is returned")]
fn then_unsupported(#[from(outcome)] outcome: &Outcome) {
    let borrowed = outcome.borrow();
    match borrowed.as_ref().expect("segmentize was attempted") {
        Err(err @ GeometryError::UnsupportedGeometry { .. }) => {
            assert_eq!(err.to_string(), "segmentize does not support POINT geometries");
        }
        other => panic!("expected an unsupported geometry error, got {other:?}"),
    }
}

#[test]
fn scenario_indices_follow_feature_order() {
    let feature = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/features/segmentize.feature");
    let contents = fs::read_to_string(&feature).unwrap_or_else(|err| {
        panic!("failed to read feature file {feature:?}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles,
        [
            "halving a unit line",
            "keeping a short line whole",
            "splitting only the long span of a line",
            "rejecting a zero limit",
            "rejecting a point",
        ],
        "scenario order changed in feature file"
    );
}

#[scenario(path = "tests/features/segmentize.feature", index = 0)]
fn halving_a_unit_line(geometry: RefCell<Geometry>, outcome: Outcome) {
    let _ = (geometry, outcome);
}

#[scenario(path = "tests/features/segmentize.feature", index = 1)]
fn keeping_a_short_line_whole(geometry: RefCell<Geometry>, outcome: Outcome) {
    let _ = (geometry, outcome);
}

#[scenario(path = "tests/features/segmentize.feature", index = 2)]
fn splitting_only_the_long_span(geometry: RefCell<Geometry>, outcome: Outcome) {
    let _ = (geometry, outcome);
}

#[scenario(path = "tests/features/segmentize.feature", index = 3)]
fn rejecting_a_zero_limit(geometry: RefCell<Geometry>, outcome: Outcome) {
    let _ = (geometry, outcome);
}

#[scenario(path = "tests/features/segmentize.feature", index = 4)]
fn rejecting_a_point(geometry: RefCell<Geometry>, outcome: Outcome) {
    let _ = (geometry, outcome);
}
