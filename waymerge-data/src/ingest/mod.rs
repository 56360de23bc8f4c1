//! OSM PBF ingestion producing ways with resolved node locations.

use std::path::{Path, PathBuf};

use geo::{Coord, Rect};
use log::{info, warn};
use osmpbf::{Element, ElementReader};
use thiserror::Error;
use waymerge_core::WayBuffer;

mod accumulator;
mod tags;

use accumulator::OsmWayAccumulator;

/// Summary of raw OSM elements discovered during ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmIngestSummary {
    /// Number of nodes discovered, including dense-node entries.
    pub nodes: u64,
    /// Number of ways discovered.
    pub ways: u64,
    /// Number of relations discovered.
    pub relations: u64,
    /// Bounding box covering all valid node coordinates, if any.
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    pub bounds: Option<Rect<f64>>,
}

impl OsmIngestSummary {
    fn combine(mut self, other: Self) -> Self {
        self.nodes += other.nodes;
        self.ways += other.ways;
        self.relations += other.relations;
        if let Some(bounds) = other.bounds {
            self.include_bounds(bounds);
        }
        self
    }

    fn include_bounds(&mut self, bounds: Rect<f64>) {
        match &mut self.bounds {
            Some(existing) => {
                let min = Coord {
                    x: existing.min().x.min(bounds.min().x),
                    y: existing.min().y.min(bounds.min().y),
                };
                let max = Coord {
                    x: existing.max().x.max(bounds.max().x),
                    y: existing.max().y.max(bounds.max().y),
                };
                *existing = Rect::new(min, max);
            }
            None => self.bounds = Some(bounds),
        }
    }

    fn record_node(&mut self, lon: f64, lat: f64) {
        self.nodes += 1;
        if let Some(coordinate) = validated_coord(lon, lat) {
            self.include_bounds(Rect::new(coordinate, coordinate));
        }
    }

    fn record_way(&mut self) {
        self.ways += 1;
    }

    fn record_relation(&mut self) {
        self.relations += 1;
    }
}

/// Which ways and relations to keep while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Keep ways carrying any of these tag keys. Empty keeps every way.
    pub way_keys: Vec<String>,
    /// Keep relations whose `type` tag is one of these values.
    pub relation_types: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            way_keys: ["highway", "railway", "waterway"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            relation_types: vec!["route".to_owned()],
        }
    }
}

/// The member ways of one selected relation, in member order.
///
/// Members whose way is absent from the file are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationWays {
    /// OSM relation identifier.
    pub id: i64,
    /// Member ways with resolved node locations.
    pub members: WayBuffer,
}

/// Ways and relations read from an OSM PBF file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmWayReport {
    /// Element counts and bounding box information.
    pub summary: OsmIngestSummary,
    /// Ways selected by tag key, ordered by identifier.
    pub ways: WayBuffer,
    /// Relations selected by type, ordered by identifier.
    pub relations: Vec<RelationWays>,
}

impl OsmWayReport {
    /// Number of node references, across ways and relation members, that
    /// have no location.
    #[must_use]
    pub fn unresolved_node_count(&self) -> usize {
        self.ways
            .iter()
            .chain(self.relations.iter().flat_map(|relation| relation.members.iter()))
            .flat_map(|way| way.nodes.iter())
            .filter(|node| node.location.is_none())
            .count()
    }
}

/// Errors returned when ingesting an OSM PBF file.
#[derive(Debug, Error)]
pub enum OsmIngestError {
    /// The file could not be opened.
    #[error("failed to open OSM PBF file at {path:?}")]
    Open {
        #[source]
        source: osmpbf::Error,
        path: PathBuf,
    },
    /// The file contents could not be decoded.
    #[error("failed to decode OSM PBF data at {path:?}")]
    Decode {
        #[source]
        source: osmpbf::Error,
        path: PathBuf,
    },
}

/// Read selected ways and relations from an OSM PBF file.
///
/// The first pass decodes blobs in parallel. Relation member ways that the
/// way filter skipped are picked up by a second pass, and node coordinates
/// by a third. Nodes that are missing or carry invalid coordinates stay
/// unresolved (`location: None`) and are reported with a warning.
///
/// # Errors
/// Returns [`OsmIngestError::Open`] when the file cannot be opened and
/// [`OsmIngestError::Decode`] when its contents are not valid PBF.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use waymerge_data::{IngestOptions, ingest_osm_pbf};
///
/// # fn main() -> Result<(), waymerge_data::OsmIngestError> {
/// let report = ingest_osm_pbf(Path::new("berlin.osm.pbf"), &IngestOptions::default())?;
/// println!("Loaded {} ways", report.ways.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_osm_pbf(
    path: &Path,
    options: &IngestOptions,
) -> Result<OsmWayReport, OsmIngestError> {
    let open = || {
        ElementReader::from_path(path).map_err(|source| OsmIngestError::Open {
            source,
            path: path.to_path_buf(),
        })
    };
    let decode = |source: osmpbf::Error| OsmIngestError::Decode {
        source,
        path: path.to_path_buf(),
    };

    let mut accumulator = open()?
        .par_map_reduce(
            |element| {
                let mut accumulator = OsmWayAccumulator::default();
                accumulator.process_element(element, options);
                accumulator
            },
            OsmWayAccumulator::default,
            OsmWayAccumulator::combine,
        )
        .map_err(decode)?;
    let summary = accumulator.summary();
    info!(
        "Read {} nodes, {} ways and {} relations from {}",
        summary.nodes,
        summary.ways,
        summary.relations,
        path.display()
    );

    let wanted = accumulator.missing_member_ways();
    if !wanted.is_empty() {
        let accumulator_ref = &mut accumulator;
        open()?
            .for_each(|element| {
                if let Element::Way(way) = element
                    && wanted.contains(&way.id())
                {
                    accumulator_ref.capture_way(way.id(), way.refs());
                }
            })
            .map_err(decode)?;
    }

    if accumulator.collect_pending_nodes() {
        let accumulator_ref = &mut accumulator;
        open()?
            .for_each(|element| match element {
                Element::Node(node) => {
                    accumulator_ref.resolve_node(node.id(), node.lon(), node.lat());
                }
                Element::DenseNode(node) => {
                    accumulator_ref.resolve_node(node.id(), node.lon(), node.lat());
                }
                Element::Way(_) | Element::Relation(_) => {}
            })
            .map_err(decode)?;
    }

    let report = accumulator.into_report();
    let unresolved = report.unresolved_node_count();
    if unresolved > 0 {
        warn!("{unresolved} way node references have no coordinates");
    }
    Ok(report)
}

fn validated_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    (lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat))
    .then_some(Coord { x: lon, y: lat })
}
