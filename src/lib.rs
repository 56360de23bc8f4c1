//! Facade crate for the waymerge line-merging toolkit.
//!
//! This crate re-exports the geometry model and operations from
//! `waymerge-core` and, behind the default `ingest` feature, the OSM PBF
//! reader and batch pipeline from `waymerge-data`.

#![forbid(unsafe_code)]

pub use waymerge_core::{
    Geometry, GeometryError, MAX_PIECES_PER_SPAN, NodeRef, Way, WayBuffer, area, centroid,
    create_linestring, create_multilinestring, create_point, geometry_type, line_merge,
    num_geometries, segmentize,
};

#[cfg(feature = "ingest")]
pub use waymerge_data::{
    Batch, BatchMode, IngestOptions, LineFeature, LinePipeline, OsmIngestError, OsmIngestSummary,
    OsmWayReport, PipelineError, PipelineOptions, RelationWays, ingest_osm_pbf, pool_size,
};
