//! Errors raised when a geometry operation is called outside its contract.
//!
//! Malformed input data never lands here: a way that cannot form a line is
//! represented as [`Geometry::Null`](crate::Geometry::Null).

use thiserror::Error;

/// Caller contract violations reported by geometry operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The maximum segment length was zero, negative or not finite.
    #[error("maximum segment length must be a positive finite number, got {max_length}")]
    InvalidMaxLength {
        /// Value supplied by the caller.
        max_length: f64,
    },
    /// A span is too long, or not finite, to split under the given limit
    /// without exceeding [`MAX_PIECES_PER_SPAN`](crate::MAX_PIECES_PER_SPAN)
    /// pieces.
    #[error("span of length {length} cannot be split into pieces of at most {max_length}")]
    SpanTooLong {
        /// Length of the offending span.
        length: f64,
        /// Limit the span was split against.
        max_length: f64,
    },
    /// The operation does not accept this geometry variant.
    #[error("{operation} does not support {geometry_type} geometries")]
    UnsupportedGeometry {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Type name of the offending geometry, as returned by
        /// [`geometry_type`](crate::geometry_type).
        geometry_type: &'static str,
    },
}
