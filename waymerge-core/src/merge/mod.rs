//! Fusion of way-derived line parts into maximal chains and rings.
//!
//! Parts live in an arena of segments addressed by index. The endpoint
//! index pairs ends sharing a location, which turns every
//! connected component into either a simple path or a simple cycle. Paths are
//! walked first from their free ends; whatever remains unvisited is a cycle
//! and becomes a ring.

mod endpoints;


use geo::{Coord, LineString, MultiLineString};
use log::debug;

use self::endpoints::{End, EndRef, EndpointIndex};
use crate::{Geometry, GeometryError, geometry_type};

/// A borrowed input part with at least two points.
#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    coords: &'a [Coord<f64>],
    start: Coord<f64>,
    finish: Coord<f64>,
}

impl<'a> Segment<'a> {
    fn new(coords: &'a [Coord<f64>]) -> Option<Self> {
        match coords {
            [start, .., finish] => Some(Self {
                coords,
                start: *start,
                finish: *finish,
            }),
            _ => None,
        }
    }

    const fn point(&self, end: End) -> Coord<f64> {
        match end {
            End::Start => self.start,
            End::Finish => self.finish,
        }
    }
}

/// A fused output part and the lowest segment index it absorbed.
#[derive(Debug)]
struct Chain {
    first_segment: usize,
    line: LineString<f64>,
}

struct ChainWalker<'a> {
    segments: Vec<Segment<'a>>,
    index: EndpointIndex,
    visited: Vec<bool>,
}

impl<'a> ChainWalker<'a> {
    fn new(lines: &'a MultiLineString<f64>) -> Self {
        let segments: Vec<Segment<'a>> = lines
            .iter()
            .enumerate()
            .filter_map(|(position, line)| {
                let segment = Segment::new(&line.0);
                if segment.is_none() {
                    debug!(
                        "line part {position} has {} point(s); left out of merge",
                        line.0.len()
                    );
                }
                segment
            })
            .collect();
        let index = EndpointIndex::build(&segments);
        let visited = vec![false; segments.len()];
        Self {
            segments,
            index,
            visited,
        }
    }

    fn is_visited(&self, segment: usize) -> bool {
        !matches!(self.visited.get(segment), Some(false))
    }

    /// Entry for a path walk: the segment's first free end, if it has one.
    fn open_entry(&self, segment: usize) -> Option<EndRef> {
        [End::Start, End::Finish]
            .into_iter()
            .map(|end| EndRef { segment, end })
            .find(|candidate| !self.index.is_linked(*candidate))
    }

    /// Entry for a cycle walk.
    ///
    /// The segment runs forwards when its start joins a finish (of a
    /// neighbour or its own), backwards otherwise.
    fn ring_entry(&self, segment: usize) -> EndRef {
        let start = EndRef {
            segment,
            end: End::Start,
        };
        match self.index.link(start) {
            Some(EndRef {
                end: End::Finish, ..
            }) => start,
            _ => EndRef {
                segment,
                end: End::Finish,
            },
        }
    }

    fn walk(&mut self, entry: EndRef) -> Chain {
        let mut coords: Vec<Coord<f64>> = Vec::new();
        let mut first_segment = entry.segment;
        let mut next = Some(entry);

        while let Some(current) = next {
            let Some(segment) = self.segments.get(current.segment) else {
                break;
            };
            let Some(seen) = self.visited.get_mut(current.segment) else {
                break;
            };
            if *seen {
                break;
            }
            *seen = true;
            first_segment = first_segment.min(current.segment);

            // The shared point is already the chain's last point.
            let skip = usize::from(!coords.is_empty());
            match current.end {
                End::Start => coords.extend(segment.coords.iter().skip(skip).copied()),
                End::Finish => coords.extend(segment.coords.iter().rev().skip(skip).copied()),
            }

            next = self.index.link(EndRef {
                segment: current.segment,
                end: current.end.opposite(),
            });
        }

        Chain {
            first_segment,
            line: LineString::new(coords),
        }
    }

    fn into_chains(mut self) -> Vec<Chain> {
        let mut chains = Vec::new();
        for segment in 0..self.segments.len() {
            if self.is_visited(segment) {
                continue;
            }
            if let Some(entry) = self.open_entry(segment) {
                chains.push(self.walk(entry));
            }
        }
        for segment in 0..self.segments.len() {
            if !self.is_visited(segment) {
                let entry = self.ring_entry(segment);
                chains.push(self.walk(entry));
            }
        }
        chains.sort_by_key(|chain| chain.first_segment);
        chains
    }
}

/// Fuse parts that meet end to end into maximal chains.
///
/// A part whose first and last points are equal stays closed on itself. The
/// other part ends meeting at a location are joined two at a time in input
/// order (part order, start before finish), so at a branch point only an odd
/// last end stays separate. Ends with a NaN or infinite coordinate are never
/// joined. Merging the output again returns it unchanged. A part is reversed
/// when needed so the shared point sits in the middle of the fused sequence,
/// where it appears once. Chains that close on themselves become rings whose
/// first and last points are equal.
///
/// The result is always a [`Geometry::MultiLineString`]. Its parts are
/// ordered by the earliest input part each one absorbed. Parts with fewer
/// than two points are left out.
///
/// # Examples
/// ```
/// use geo::{LineString, MultiLineString};
/// use waymerge_core::line_merge;
///
/// let parts = MultiLineString::new(vec![
///     LineString::from(vec![(1.0, 1.0), (2.0, 1.0)]),
///     LineString::from(vec![(1.0, 1.0), (1.0, 2.0)]),
/// ]);
/// let merged = line_merge(&parts);
/// assert_eq!(
///     merged.as_multilinestring().map(|lines| lines.0.clone()),
///     Some(vec![LineString::from(vec![(2.0, 1.0), (1.0, 1.0), (1.0, 2.0)])]),
/// );
/// ```
#[must_use]
pub fn line_merge(lines: &MultiLineString<f64>) -> Geometry {
    let chains = ChainWalker::new(lines).into_chains();
    Geometry::MultiLineString(MultiLineString::new(
        chains.into_iter().map(|chain| chain.line).collect(),
    ))
}

impl Geometry {
    /// Merge this geometry's lines with [`line_merge`].
    ///
    /// A linestring is merged as a single part, so a closed one comes back as
    /// a one-ring multilinestring. [`Geometry::Null`] stays null.
    ///
    /// # Errors
    /// Returns [`GeometryError::UnsupportedGeometry`] for points.
    pub fn line_merged(&self) -> Result<Self, GeometryError> {
        match self {
            Self::Null => Ok(Self::Null),
            Self::LineString(line) => Ok(line_merge(&MultiLineString::new(vec![line.clone()]))),
            Self::MultiLineString(lines) => Ok(line_merge(lines)),
            Self::Point(_) => Err(GeometryError::UnsupportedGeometry {
                operation: "line_merge",
                geometry_type: geometry_type(self),
            }),
        }
    }
}
