//! OSM ingestion and batch processing for the waymerge pipeline.
//!
//! Responsibilities:
//! - Read OSM PBF files and resolve way node references to coordinates.
//! - Group ways into batches (one per relation, or one per way).
//! - Run build, merge and segmentize over batches on a sized worker pool.
//!
//! Boundaries:
//! - Geometry rules live in `waymerge-core`; this crate only feeds them.
//! - No persistence. Callers decide where features go.
//!
//! Invariants:
//! - Output order is deterministic regardless of decode or worker
//!   parallelism.
//! - No global mutable state.

mod ingest;
mod pipeline;
mod pool;

pub use ingest::{
    IngestOptions, OsmIngestError, OsmIngestSummary, OsmWayReport, RelationWays, ingest_osm_pbf,
};
pub use pipeline::{Batch, BatchMode, LineFeature, LinePipeline, PipelineError, PipelineOptions};
pub use pool::{MAX_POOL_THREADS, available_cores, pool_size};
