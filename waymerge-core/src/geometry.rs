//! The tagged geometry value shared by the builder, merge engine and
//! segmentizer.

use std::fmt;

use geo::{BoundingRect, Coord, LineString, MultiLineString, Point, Rect};

/// A geometry value in planar coordinates.
///
/// Exactly one variant is active. [`Geometry::Null`] stands for "no valid
/// geometry" (for example a way whose nodes could not be resolved) and is
/// propagated by the operations in this crate instead of raising an error.
///
/// Equality is structural and exact: two linestrings are equal only when they
/// hold the same points in the same order.
///
/// # Examples
/// ```
/// use geo::LineString;
/// use waymerge_core::Geometry;
///
/// let line = Geometry::from(LineString::from(vec![(1.0, 1.0), (2.0, 2.0)]));
/// assert!(line.is_linestring());
/// assert_eq!(line.to_string(), "LINESTRING(1 1,2 2)");
/// assert!(Geometry::default().is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// Absence of a valid geometry.
    #[default]
    Null,
    /// A single position.
    Point(Point<f64>),
    /// An ordered sequence of points.
    LineString(LineString<f64>),
    /// An ordered collection of linestrings.
    MultiLineString(MultiLineString<f64>),
}

impl Geometry {
    /// Returns `true` for [`Geometry::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Geometry::Point`].
    #[must_use]
    pub const fn is_point(&self) -> bool {
        matches!(self, Self::Point(_))
    }

    /// Returns `true` for [`Geometry::LineString`].
    #[must_use]
    pub const fn is_linestring(&self) -> bool {
        matches!(self, Self::LineString(_))
    }

    /// Returns `true` for [`Geometry::MultiLineString`].
    #[must_use]
    pub const fn is_multilinestring(&self) -> bool {
        matches!(self, Self::MultiLineString(_))
    }

    /// Borrow the point payload, if any.
    #[must_use]
    pub const fn as_point(&self) -> Option<&Point<f64>> {
        match self {
            Self::Point(point) => Some(point),
            Self::Null | Self::LineString(_) | Self::MultiLineString(_) => None,
        }
    }

    /// Borrow the linestring payload, if any.
    #[must_use]
    pub const fn as_linestring(&self) -> Option<&LineString<f64>> {
        match self {
            Self::LineString(line) => Some(line),
            Self::Null | Self::Point(_) | Self::MultiLineString(_) => None,
        }
    }

    /// Borrow the multilinestring payload, if any.
    #[must_use]
    pub const fn as_multilinestring(&self) -> Option<&MultiLineString<f64>> {
        match self {
            Self::MultiLineString(lines) => Some(lines),
            Self::Null | Self::Point(_) | Self::LineString(_) => None,
        }
    }

    /// Take the linestring payload, discarding every other variant.
    #[must_use]
    pub fn into_linestring(self) -> Option<LineString<f64>> {
        match self {
            Self::LineString(line) => Some(line),
            Self::Null | Self::Point(_) | Self::MultiLineString(_) => None,
        }
    }

    /// Axis-aligned bounding box of all coordinates.
    ///
    /// Returns `None` for [`Geometry::Null`] and for lines without points.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        match self {
            Self::Null => None,
            Self::Point(point) => Some(point.bounding_rect()),
            Self::LineString(line) => line.bounding_rect(),
            Self::MultiLineString(lines) => lines.bounding_rect(),
        }
    }
}

impl From<Point<f64>> for Geometry {
    fn from(point: Point<f64>) -> Self {
        Self::Point(point)
    }
}

impl From<LineString<f64>> for Geometry {
    fn from(line: LineString<f64>) -> Self {
        Self::LineString(line)
    }
}

impl From<MultiLineString<f64>> for Geometry {
    fn from(lines: MultiLineString<f64>) -> Self {
        Self::MultiLineString(lines)
    }
}

/// Renders the geometry as well-known text.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("GEOMETRYCOLLECTION EMPTY"),
            Self::Point(point) => write!(f, "POINT({} {})", point.x(), point.y()),
            Self::LineString(line) if line.0.is_empty() => f.write_str("LINESTRING EMPTY"),
            Self::LineString(line) => {
                f.write_str("LINESTRING")?;
                write_coords(f, &line.0)
            }
            Self::MultiLineString(lines) if lines.0.is_empty() => {
                f.write_str("MULTILINESTRING EMPTY")
            }
            Self::MultiLineString(lines) => {
                f.write_str("MULTILINESTRING(")?;
                for (index, line) in lines.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write_coords(f, &line.0)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[Coord<f64>]) -> fmt::Result {
    f.write_str("(")?;
    for (index, coord) in coords.iter().enumerate() {
        if index > 0 {
            f.write_str(",")?;
        }
        write!(f, "{} {}", coord.x, coord.y)?;
    }
    f.write_str(")")
}
