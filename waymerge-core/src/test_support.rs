//! Fixture helpers shared by unit and integration tests.
//!
//! Ways are written in the compact OSM line format used by OSM tooling:
//! `w20 Nn10x1y1,n11x2y1` is way 20 over node 10 at (1, 1) and node 11 at
//! (2, 1). A node reference without `x`/`y` is left unresolved.

use geo::{Coord, LineString, MultiLineString};
use thiserror::Error;

use crate::{NodeRef, Way, WayBuffer};

/// Reasons a way fixture could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWayError {
    /// The fixture did not start with `w<id>`.
    #[error("way fixture must start with `w<id>`: {0:?}")]
    MissingWayId(String),
    /// An identifier was not an integer.
    #[error("invalid identifier in {0:?}")]
    InvalidId(String),
    /// A coordinate was not a number.
    #[error("invalid coordinate in {0:?}")]
    InvalidCoordinate(String),
    /// A token other than the node list followed the way identifier.
    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),
}

/// Parse one way fixture.
///
/// # Errors
/// Returns [`ParseWayError`] when the text is not a well-formed fixture.
pub fn way_from_opl(text: &str) -> Result<Way, ParseWayError> {
    let mut tokens = text.split_whitespace();
    let head = tokens
        .next()
        .ok_or_else(|| ParseWayError::MissingWayId(text.to_owned()))?;
    let id = head
        .strip_prefix('w')
        .ok_or_else(|| ParseWayError::MissingWayId(text.to_owned()))?
        .parse::<i64>()
        .map_err(|_| ParseWayError::InvalidId(head.to_owned()))?;

    let mut nodes = Vec::new();
    for token in tokens {
        let list = token
            .strip_prefix('N')
            .ok_or_else(|| ParseWayError::UnexpectedToken(token.to_owned()))?;
        for node in list.split(',').filter(|node| !node.is_empty()) {
            nodes.push(parse_node(node)?);
        }
    }
    Ok(Way::new(id, nodes))
}

/// Parse several way fixtures into a buffer, keeping their order.
///
/// # Errors
/// Returns the first [`ParseWayError`] encountered.
pub fn buffer_from_opl(ways: &[&str]) -> Result<WayBuffer, ParseWayError> {
    ways.iter().map(|text| way_from_opl(text)).collect()
}

fn parse_node(token: &str) -> Result<NodeRef, ParseWayError> {
    let body = token
        .strip_prefix('n')
        .ok_or_else(|| ParseWayError::UnexpectedToken(token.to_owned()))?;
    let (id_text, location) = match body.split_once('x') {
        None => (body, None),
        Some((id_part, coords)) => {
            let (x, y) = coords
                .split_once('y')
                .ok_or_else(|| ParseWayError::InvalidCoordinate(token.to_owned()))?;
            let parse = |value: &str| {
                value
                    .parse::<f64>()
                    .map_err(|_| ParseWayError::InvalidCoordinate(token.to_owned()))
            };
            (id_part, Some(Coord {
                x: parse(x)?,
                y: parse(y)?,
            }))
        }
    };
    let id = id_text
        .parse::<i64>()
        .map_err(|_| ParseWayError::InvalidId(token.to_owned()))?;
    Ok(NodeRef { id, location })
}

/// Build a linestring from `(x, y)` pairs.
#[must_use]
pub fn line(points: &[(f64, f64)]) -> LineString<f64> {
    LineString::from(points.to_vec())
}

/// Build a multilinestring with one part per point list.
#[must_use]
pub fn lines(parts: &[&[(f64, f64)]]) -> MultiLineString<f64> {
    MultiLineString::new(parts.iter().map(|points| line(points)).collect())
}
