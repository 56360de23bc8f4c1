//! Splitting lines into pieces no longer than a limit.

use geo::{Coord, Line, LineString, MultiLineString};

use crate::{Geometry, GeometryError, geometry_type};

/// Most pieces [`segmentize`] divides a single span into.
pub const MAX_PIECES_PER_SPAN: usize = 1 << 20;

/// Split every line of `geometry` so no output span exceeds `max_length`.
///
/// A line whose spans all fit is emitted unchanged as one part. Otherwise
/// each span becomes its own part, and a span of length `d > max_length` is
/// divided into `ceil(d / max_length)` equal sub-spans, each a separate
/// two-point part. The last sub-span ends exactly on the original point.
///
/// Parts of successive input lines are concatenated in order, so the result
/// is always a [`Geometry::MultiLineString`]. [`Geometry::Null`] propagates
/// unchanged; lines with fewer than two points contribute nothing.
///
/// # Errors
/// Returns [`GeometryError::InvalidMaxLength`] unless `max_length` is finite
/// and positive, and [`GeometryError::UnsupportedGeometry`] for points.
/// Returns [`GeometryError::SpanTooLong`] when a span has a non-finite length
/// or would need more than [`MAX_PIECES_PER_SPAN`] pieces.
///
/// # Examples
/// ```
/// use geo::LineString;
/// use waymerge_core::{Geometry, segmentize};
///
/// let line = Geometry::from(LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]));
/// let pieces = segmentize(&line, 0.5).expect("positive limit");
/// assert_eq!(pieces.to_string(), "MULTILINESTRING((0 0,0.5 0),(0.5 0,1 0))");
/// ```
pub fn segmentize(geometry: &Geometry, max_length: f64) -> Result<Geometry, GeometryError> {
    if !(max_length.is_finite() && max_length > 0.0) {
        return Err(GeometryError::InvalidMaxLength { max_length });
    }

    let mut parts = Vec::new();
    match geometry {
        Geometry::Null => return Ok(Geometry::Null),
        Geometry::Point(_) => {
            return Err(GeometryError::UnsupportedGeometry {
                operation: "segmentize",
                geometry_type: geometry_type(geometry),
            });
        }
        Geometry::LineString(line) => split_line(line, max_length, &mut parts)?,
        Geometry::MultiLineString(lines) => {
            for line in lines {
                split_line(line, max_length, &mut parts)?;
            }
        }
    }
    Ok(Geometry::MultiLineString(MultiLineString::new(parts)))
}

fn split_line(
    line: &LineString<f64>,
    max_length: f64,
    parts: &mut Vec<LineString<f64>>,
) -> Result<(), GeometryError> {
    if line.0.len() < 2 {
        return Ok(());
    }
    if line.lines().all(|span| span_length(span) <= max_length) {
        parts.push(line.clone());
        return Ok(());
    }
    // Size every span before emitting any piece of this line.
    let counts = line
        .lines()
        .map(|span| piece_count(span_length(span), max_length))
        .collect::<Result<Vec<_>, _>>()?;
    for (span, count) in line.lines().zip(counts) {
        split_span(span, count, parts);
    }
    Ok(())
}

fn split_span(span: Line<f64>, count: usize, parts: &mut Vec<LineString<f64>>) {
    let mut from = span.start;
    for step in 1..count {
        let to = interpolate(span, step, count);
        parts.push(LineString::new(vec![from, to]));
        from = to;
    }
    parts.push(LineString::new(vec![from, span.end]));
}

fn span_length(span: Line<f64>) -> f64 {
    let delta = span.delta();
    delta.x.hypot(delta.y)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "piece count is a bounded positive whole number derived from two positive lengths"
)]
fn piece_count(length: f64, max_length: f64) -> Result<usize, GeometryError> {
    if length <= max_length {
        return Ok(1);
    }
    let pieces = (length / max_length).ceil();
    if pieces.is_finite() && pieces <= MAX_PIECES_PER_SPAN as f64 {
        Ok(pieces as usize)
    } else {
        Err(GeometryError::SpanTooLong { length, max_length })
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "linear interpolation along a span"
)]
fn interpolate(span: Line<f64>, step: usize, count: usize) -> Coord<f64> {
    let fraction = step as f64 / count as f64;
    let delta = span.delta();
    Coord {
        x: span.start.x + delta.x * fraction,
        y: span.start.y + delta.y * fraction,
    }
}
