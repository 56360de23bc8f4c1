//! Geometry construction from ways whose node references carry locations.
//!
//! The entity source (for example the PBF reader in `waymerge-data`) resolves
//! node references to coordinates up front. A reference that could not be
//! resolved keeps `location: None` and is skipped here.

use geo::{Coord, LineString, MultiLineString, Point};
use log::debug;

use crate::Geometry;

/// A reference from a way to a node, with the node's location when known.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    /// OSM node identifier.
    pub id: i64,
    /// Planar location, or `None` when the node could not be resolved.
    pub location: Option<Coord<f64>>,
}

impl NodeRef {
    /// Construct a reference to a node at a known location.
    #[must_use]
    pub const fn resolved(id: i64, location: Coord<f64>) -> Self {
        Self {
            id,
            location: Some(location),
        }
    }

    /// Construct a reference to a node whose location is unknown.
    #[must_use]
    pub const fn unresolved(id: i64) -> Self {
        Self { id, location: None }
    }
}

/// An ordered list of node references.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    /// OSM way identifier.
    pub id: i64,
    /// Node references in way order.
    pub nodes: Vec<NodeRef>,
}

impl Way {
    /// Construct a way from its identifier and node references.
    #[must_use]
    pub const fn new(id: i64, nodes: Vec<NodeRef>) -> Self {
        Self { id, nodes }
    }

    /// Locations of the resolvable node references, in way order.
    pub fn locations(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.nodes.iter().filter_map(|node| node.location)
    }
}

/// Ways in stable input order.
///
/// # Examples
/// ```
/// use waymerge_core::{NodeRef, Way, WayBuffer};
///
/// let mut buffer = WayBuffer::new();
/// buffer.push(Way::new(1, vec![NodeRef::unresolved(7)]));
/// assert_eq!(buffer.len(), 1);
/// assert_eq!(buffer.iter().next().map(|way| way.id), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayBuffer {
    ways: Vec<Way>,
}

impl WayBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { ways: Vec::new() }
    }

    /// Append a way, keeping insertion order.
    pub fn push(&mut self, way: Way) {
        self.ways.push(way);
    }

    /// Number of ways held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ways.len()
    }

    /// Whether the buffer holds no ways.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// Iterate over the ways in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Way> {
        self.ways.iter()
    }

    /// Borrow the ways as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Way] {
        &self.ways
    }
}

impl FromIterator<Way> for WayBuffer {
    fn from_iter<I: IntoIterator<Item = Way>>(iter: I) -> Self {
        Self {
            ways: iter.into_iter().collect(),
        }
    }
}

impl Extend<Way> for WayBuffer {
    fn extend<I: IntoIterator<Item = Way>>(&mut self, iter: I) {
        self.ways.extend(iter);
    }
}

impl IntoIterator for WayBuffer {
    type Item = Way;
    type IntoIter = std::vec::IntoIter<Way>;

    fn into_iter(self) -> Self::IntoIter {
        self.ways.into_iter()
    }
}

impl<'a> IntoIterator for &'a WayBuffer {
    type Item = &'a Way;
    type IntoIter = std::slice::Iter<'a, Way>;

    fn into_iter(self) -> Self::IntoIter {
        self.ways.iter()
    }
}

/// Build a point geometry from a node reference.
///
/// Returns [`Geometry::Null`] when the node has no location.
#[must_use]
pub fn create_point(node: &NodeRef) -> Geometry {
    node.location
        .map_or(Geometry::Null, |location| Geometry::Point(Point::from(location)))
}

/// Build a linestring from the resolvable nodes of a way.
///
/// Unresolved node references are skipped. Fewer than two remaining
/// locations cannot form a line and yield [`Geometry::Null`].
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use waymerge_core::{Geometry, NodeRef, Way, create_linestring};
///
/// let way = Way::new(20, vec![
///     NodeRef::resolved(1, Coord { x: 1.0, y: 1.0 }),
///     NodeRef::resolved(2, Coord { x: 2.0, y: 2.0 }),
/// ]);
/// assert_eq!(
///     create_linestring(&way),
///     Geometry::LineString(LineString::from(vec![(1.0, 1.0), (2.0, 2.0)])),
/// );
///
/// let dangling = Way::new(21, vec![NodeRef::unresolved(1), NodeRef::unresolved(2)]);
/// assert!(create_linestring(&dangling).is_null());
/// ```
#[must_use]
pub fn create_linestring(way: &Way) -> Geometry {
    let coords: Vec<Coord<f64>> = way.locations().collect();
    if coords.len() < 2 {
        debug!(
            "way {} has {} resolvable node(s); no linestring built",
            way.id,
            coords.len()
        );
        return Geometry::Null;
    }
    Geometry::LineString(LineString::new(coords))
}

/// Build a multilinestring with one part per way that forms a valid line.
///
/// Ways yielding [`Geometry::Null`] are dropped silently, so the part count
/// equals the number of ways that build on their own. Part order follows the
/// buffer.
#[must_use]
pub fn create_multilinestring(buffer: &WayBuffer) -> Geometry {
    let lines: Vec<LineString<f64>> = buffer
        .iter()
        .filter_map(|way| create_linestring(way).into_linestring())
        .collect();
    Geometry::MultiLineString(MultiLineString::new(lines))
}
