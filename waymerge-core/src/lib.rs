//! Geometry construction and line merging for OpenStreetMap ways.
//!
//! Responsibilities:
//! - Model geometry values as a closed tagged union ([`Geometry`]).
//! - Build linestrings and multilinestrings from ways whose node references
//!   have been resolved to coordinates ([`create_linestring`],
//!   [`create_multilinestring`]).
//! - Fuse way-derived parts into maximal polylines and rings
//!   ([`line_merge`]).
//! - Split lines into bounded-length pieces ([`segmentize`]).
//!
//! Boundaries:
//! - No I/O. Parsing OSM files lives in `waymerge-data`.
//! - Coordinates are planar; reprojection is the caller's concern.
//!
//! Invariants:
//! - Every operation is a pure function of its input and allocates a fresh
//!   output. Inputs are never mutated, so independent values can be processed
//!   on any number of threads without locking.
//! - Degenerate topology is represented as [`Geometry::Null`], never as an
//!   error. Errors are reserved for caller contract violations.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waymerge_core::{NodeRef, Way, WayBuffer, create_multilinestring, line_merge};
//!
//! let buffer: WayBuffer = [
//!     Way::new(20, vec![
//!         NodeRef::resolved(10, Coord { x: 1.0, y: 1.0 }),
//!         NodeRef::resolved(11, Coord { x: 2.0, y: 1.0 }),
//!     ]),
//!     Way::new(21, vec![
//!         NodeRef::resolved(11, Coord { x: 2.0, y: 1.0 }),
//!         NodeRef::resolved(12, Coord { x: 2.0, y: 2.0 }),
//!     ]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let parts = create_multilinestring(&buffer);
//! let merged = line_merge(parts.as_multilinestring().expect("multilinestring"));
//! assert_eq!(waymerge_core::num_geometries(&merged), 1);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod geometry;
mod merge;
mod query;
mod segmentize;

#[doc(hidden)]
pub mod test_support;

pub use builder::{NodeRef, Way, WayBuffer, create_linestring, create_multilinestring, create_point};
pub use error::GeometryError;
pub use geometry::Geometry;
pub use merge::line_merge;
pub use query::{area, centroid, geometry_type, num_geometries};
pub use segmentize::{MAX_PIECES_PER_SPAN, segmentize};
