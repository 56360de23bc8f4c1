//! Internal accumulator for OpenStreetMap (OSM) PBF way ingestion.
//!
//! The parallel first pass records element counts, selected ways and
//! selected relations. Later sequential passes capture relation member ways
//! the first pass skipped and resolve node references to coordinates.
use std::collections::{HashMap, HashSet};

use geo::Coord;
use osmpbf::{Element, RelMemberType};
use waymerge_core::{NodeRef, Way, WayBuffer};

use super::tags::{has_selected_key, has_selected_type};
use super::{IngestOptions, OsmIngestSummary, OsmWayReport, RelationWays, validated_coord};

#[derive(Debug, Default)]
pub(super) struct OsmWayAccumulator {
    summary: OsmIngestSummary,
    selected_ways: HashSet<i64>,
    way_refs: HashMap<i64, Vec<i64>>,
    relations: Vec<RelationCandidate>,
    nodes: HashMap<i64, Coord<f64>>,
    pending_nodes: HashSet<i64>,
}

#[derive(Debug)]
struct RelationCandidate {
    id: i64,
    way_members: Vec<i64>,
}

impl OsmWayAccumulator {
    pub(super) fn process_element(&mut self, element: Element<'_>, options: &IngestOptions) {
        match element {
            Element::Node(node) => self.summary.record_node(node.lon(), node.lat()),
            Element::DenseNode(node) => self.summary.record_node(node.lon(), node.lat()),
            Element::Way(way) => self.process_way(way.id(), way.tags(), way.refs(), options),
            Element::Relation(relation) => {
                let way_members = relation
                    .members()
                    .filter(|member| matches!(member.member_type, RelMemberType::Way))
                    .map(|member| member.member_id);
                self.process_relation(relation.id(), relation.tags(), way_members, options);
            }
        }
    }

    fn process_way<'a, T, R>(&mut self, id: i64, tags: T, refs: R, options: &IngestOptions)
    where
        T: IntoIterator<Item = (&'a str, &'a str)>,
        R: IntoIterator<Item = i64>,
    {
        self.summary.record_way();
        if !has_selected_key(tags, &options.way_keys) {
            return;
        }
        self.selected_ways.insert(id);
        self.way_refs.insert(id, refs.into_iter().collect());
    }

    fn process_relation<'a, T, M>(&mut self, id: i64, tags: T, way_members: M, options: &IngestOptions)
    where
        T: IntoIterator<Item = (&'a str, &'a str)>,
        M: IntoIterator<Item = i64>,
    {
        self.summary.record_relation();
        if !has_selected_type(tags, &options.relation_types) {
            return;
        }
        self.relations.push(RelationCandidate {
            id,
            way_members: way_members.into_iter().collect(),
        });
    }

    pub(super) fn combine(mut self, other: Self) -> Self {
        self.summary = self.summary.combine(other.summary);
        self.selected_ways.extend(other.selected_ways);
        for (id, refs) in other.way_refs {
            self.way_refs.entry(id).or_insert(refs);
        }
        self.relations.extend(other.relations);
        self
    }

    pub(super) const fn summary(&self) -> &OsmIngestSummary {
        &self.summary
    }

    /// Relation member ways the first pass did not capture.
    pub(super) fn missing_member_ways(&self) -> HashSet<i64> {
        self.relations
            .iter()
            .flat_map(|relation| relation.way_members.iter().copied())
            .filter(|id| !self.way_refs.contains_key(id))
            .collect()
    }

    pub(super) fn capture_way<R>(&mut self, id: i64, refs: R)
    where
        R: IntoIterator<Item = i64>,
    {
        self.way_refs
            .entry(id)
            .or_insert_with(|| refs.into_iter().collect());
    }

    /// Mark every node referenced by a captured way as pending.
    ///
    /// Returns whether any node needs resolving.
    pub(super) fn collect_pending_nodes(&mut self) -> bool {
        self.pending_nodes = self
            .way_refs
            .values()
            .flatten()
            .copied()
            .filter(|id| !self.nodes.contains_key(id))
            .collect();
        !self.pending_nodes.is_empty()
    }

    pub(super) fn resolve_node(&mut self, id: i64, lon: f64, lat: f64) {
        if !self.pending_nodes.remove(&id) {
            return;
        }
        if let Some(location) = validated_coord(lon, lat) {
            self.nodes.insert(id, location);
        }
    }

    pub(super) fn into_report(self) -> OsmWayReport {
        let Self {
            summary,
            selected_ways,
            way_refs,
            mut relations,
            nodes,
            ..
        } = self;

        let build_way = |id: i64| {
            way_refs.get(&id).map(|refs| {
                let node_refs = refs
                    .iter()
                    .map(|node_id| NodeRef {
                        id: *node_id,
                        location: nodes.get(node_id).copied(),
                    })
                    .collect();
                Way::new(id, node_refs)
            })
        };

        let mut selected: Vec<i64> = selected_ways.into_iter().collect();
        selected.sort_unstable();
        let ways: WayBuffer = selected.into_iter().filter_map(build_way).collect();

        relations.sort_by_key(|relation| relation.id);
        let relations = relations
            .into_iter()
            .map(|relation| RelationWays {
                id: relation.id,
                members: relation
                    .way_members
                    .iter()
                    .filter_map(|id| build_way(*id))
                    .collect(),
            })
            .collect();

        OsmWayReport {
            summary,
            ways,
            relations,
        }
    }
}
