//! Batch processing of ways into merged line features.
//!
//! A [`Batch`] is the unit of work: its ways are built into a
//! multilinestring, merged, and optionally split into bounded pieces.
//! Batches are independent, so [`LinePipeline::run`] spreads them over a
//! dedicated `rayon` pool and reassembles the results in input order.

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use waymerge_core::{
    Geometry, GeometryError, WayBuffer, create_multilinestring, num_geometries, segmentize,
};

use crate::OsmWayReport;
use crate::pool::{available_cores, pool_size};

/// Ways processed together into one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Identifier carried through to the output feature.
    pub id: i64,
    /// Ways whose lines are merged together.
    pub ways: WayBuffer,
}

/// How ways from an ingestion report are grouped into batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// One batch per selected relation, holding its member ways.
    #[default]
    Relations,
    /// One batch per selected way.
    Ways,
}

/// A merged geometry produced from one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    /// Identifier of the originating batch.
    pub id: i64,
    /// Merged, and possibly segmentized, multilinestring.
    pub geometry: Geometry,
}

/// Settings for [`LinePipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineOptions {
    /// Split merged lines into pieces no longer than this, when set.
    pub split_at: Option<f64>,
    /// Requested worker count; see [`pool_size`](crate::pool_size).
    pub threads: i32,
}

/// Errors raised while configuring or running a [`LinePipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The worker pool could not be created.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] ThreadPoolBuildError),
    /// The configured split length is unusable.
    #[error("invalid split length")]
    SplitLength {
        #[source]
        source: GeometryError,
    },
    /// A batch could not be processed, for instance because one of its spans
    /// needs more pieces than the split length allows.
    #[error("failed to process batch {id}")]
    Geometry {
        /// Identifier of the failing batch.
        id: i64,
        #[source]
        source: GeometryError,
    },
}

/// Builds, merges and segmentizes batches on a sized worker pool.
#[derive(Debug)]
pub struct LinePipeline {
    pool: ThreadPool,
    split_at: Option<f64>,
}

impl LinePipeline {
    /// Validate `options` and start the worker pool.
    ///
    /// # Errors
    /// Returns [`PipelineError::SplitLength`] when `split_at` is not a finite
    /// positive number and [`PipelineError::ThreadPool`] when the pool cannot
    /// be started.
    pub fn new(options: PipelineOptions) -> Result<Self, PipelineError> {
        if let Some(split_at) = options.split_at {
            segmentize(&Geometry::Null, split_at)
                .map_err(|source| PipelineError::SplitLength { source })?;
        }
        let threads = pool_size(options.threads, available_cores());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("waymerge-{index}"))
            .build()?;
        debug!("started line pipeline with {threads} worker(s)");
        Ok(Self {
            pool,
            split_at: options.split_at,
        })
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Process every batch, returning features in batch order.
    ///
    /// Batches whose ways produce no line parts are dropped.
    ///
    /// # Errors
    /// Returns [`PipelineError::Geometry`] for the first batch, in input
    /// order, whose processing failed.
    pub fn run(&self, batches: &[Batch]) -> Result<Vec<LineFeature>, PipelineError> {
        let outcomes: Vec<Result<Option<LineFeature>, PipelineError>> = self.pool.install(|| {
            batches
                .par_iter()
                .map(|batch| self.process(batch))
                .collect()
        });
        // Folded sequentially so the reported failure does not depend on
        // scheduling.
        let features = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(features.into_iter().flatten().collect())
    }

    fn process(&self, batch: &Batch) -> Result<Option<LineFeature>, PipelineError> {
        let wrap = |source| PipelineError::Geometry {
            id: batch.id,
            source,
        };
        let merged = create_multilinestring(&batch.ways)
            .line_merged()
            .map_err(wrap)?;
        let geometry = match self.split_at {
            Some(split_at) => segmentize(&merged, split_at).map_err(wrap)?,
            None => merged,
        };
        if num_geometries(&geometry) == 0 {
            debug!(
                "batch {} of {} way(s) produced no lines; dropped",
                batch.id,
                batch.ways.len()
            );
            return Ok(None);
        }
        Ok(Some(LineFeature {
            id: batch.id,
            geometry,
        }))
    }
}

impl OsmWayReport {
    /// Group the report's ways into batches.
    ///
    /// [`BatchMode::Relations`] yields one batch per relation keyed by the
    /// relation identifier. [`BatchMode::Ways`] yields one batch per selected
    /// way keyed by the way identifier.
    #[must_use]
    pub fn into_batches(self, mode: BatchMode) -> Vec<Batch> {
        match mode {
            BatchMode::Relations => self
                .relations
                .into_iter()
                .map(|relation| Batch {
                    id: relation.id,
                    ways: relation.members,
                })
                .collect(),
            BatchMode::Ways => self
                .ways
                .into_iter()
                .map(|way| Batch {
                    id: way.id,
                    ways: std::iter::once(way).collect(),
                })
                .collect(),
        }
    }
}
