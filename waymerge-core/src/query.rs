//! Read-only queries dispatched over the [`Geometry`] variants.

use geo::Centroid;

use crate::Geometry;

/// Number of parts in the geometry.
///
/// Points and linestrings count as one part, a multilinestring counts its
/// linestrings and [`Geometry::Null`] has none.
///
/// # Examples
/// ```
/// use geo::LineString;
/// use waymerge_core::{Geometry, num_geometries};
///
/// let line = Geometry::from(LineString::from(vec![(1.0, 1.0), (2.0, 2.0)]));
/// assert_eq!(num_geometries(&line), 1);
/// assert_eq!(num_geometries(&Geometry::Null), 0);
/// ```
#[must_use]
pub fn num_geometries(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Null => 0,
        Geometry::Point(_) | Geometry::LineString(_) => 1,
        Geometry::MultiLineString(lines) => lines.0.len(),
    }
}

/// Planar area enclosed by the geometry.
///
/// None of the supported variants enclose an area, so this is always zero.
#[must_use]
pub const fn area(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Null
        | Geometry::Point(_)
        | Geometry::LineString(_)
        | Geometry::MultiLineString(_) => 0.0,
    }
}

/// Upper-case type name, matching the well-known text keyword.
#[must_use]
pub const fn geometry_type(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Null => "NULL",
        Geometry::Point(_) => "POINT",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
    }
}

/// Centroid of the geometry as a point geometry.
///
/// Lines use the length-weighted mean of their segment midpoints, which for a
/// two-point line is the midpoint. Returns [`Geometry::Null`] for null input
/// and for lines without points.
///
/// # Examples
/// ```
/// use geo::{LineString, Point};
/// use waymerge_core::{Geometry, centroid};
///
/// let line = Geometry::from(LineString::from(vec![(1.0, 1.0), (3.0, 1.0)]));
/// assert_eq!(centroid(&line), Geometry::Point(Point::new(2.0, 1.0)));
/// ```
#[must_use]
pub fn centroid(geometry: &Geometry) -> Geometry {
    let point = match geometry {
        Geometry::Null => None,
        Geometry::Point(point) => Some(*point),
        Geometry::LineString(line) => line.centroid(),
        Geometry::MultiLineString(lines) => lines.centroid(),
    };
    point.map_or(Geometry::Null, Geometry::Point)
}
