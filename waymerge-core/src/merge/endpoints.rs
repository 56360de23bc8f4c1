//! Endpoint adjacency for the merge walk.
//!
//! Each segment contributes two ends. A segment that closes on itself is
//! linked to itself. The other ends meeting at a location are paired two at a
//! time in input order, so only an odd last end at a branch point stays free.
//! Ends with a non-finite coordinate never meet anything.

use std::collections::HashMap;

use geo::Coord;
use log::debug;

use super::Segment;

/// Which end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum End {
    Start,
    Finish,
}

impl End {
    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::Start => Self::Finish,
            Self::Finish => Self::Start,
        }
    }
}

/// One end of one segment in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EndRef {
    pub(super) segment: usize,
    pub(super) end: End,
}

const NEGATIVE_ZERO_BITS: u64 = 1 << 63;

/// Exact location key. `-0.0` and `0.0` hash alike so they meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LocationKey {
    x: u64,
    y: u64,
}

impl LocationKey {
    /// `None` for NaN or infinite coordinates, which equal no other point.
    const fn new(coord: Coord<f64>) -> Option<Self> {
        if coord.x.is_finite() && coord.y.is_finite() {
            Some(Self {
                x: canonical_bits(coord.x),
                y: canonical_bits(coord.y),
            })
        } else {
            None
        }
    }
}

const fn canonical_bits(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits == NEGATIVE_ZERO_BITS { 0 } else { bits }
}

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    start: Option<EndRef>,
    finish: Option<EndRef>,
}

impl Links {
    const fn get(&self, end: End) -> Option<EndRef> {
        match end {
            End::Start => self.start,
            End::Finish => self.finish,
        }
    }

    const fn slot_mut(&mut self, end: End) -> &mut Option<EndRef> {
        match end {
            End::Start => &mut self.start,
            End::Finish => &mut self.finish,
        }
    }
}

/// Symmetric pairing of segment ends that share a location.
#[derive(Debug, Clone, Default)]
pub(super) struct EndpointIndex {
    links: Vec<Links>,
}

impl EndpointIndex {
    pub(super) fn build(segments: &[Segment<'_>]) -> Self {
        let mut index = Self {
            links: vec![Links::default(); segments.len()],
        };
        let mut by_location: HashMap<LocationKey, Vec<EndRef>> = HashMap::new();
        for (position, segment) in segments.iter().enumerate() {
            let start = LocationKey::new(segment.point(End::Start));
            let finish = LocationKey::new(segment.point(End::Finish));
            if start.is_some() && start == finish {
                index.pair(
                    EndRef {
                        segment: position,
                        end: End::Start,
                    },
                    EndRef {
                        segment: position,
                        end: End::Finish,
                    },
                );
                continue;
            }
            for (end, key) in [(End::Start, start), (End::Finish, finish)] {
                if let Some(key) = key {
                    by_location.entry(key).or_default().push(EndRef {
                        segment: position,
                        end,
                    });
                }
            }
        }

        for ends in by_location.values() {
            let pairs = ends.chunks_exact(2);
            if let [free] = pairs.remainder()
                && ends.len() > 2
                && let Some(segment) = segments.get(free.segment)
            {
                let at = segment.point(free.end);
                debug!(
                    "{} line ends meet at ({}, {}); the last one stays free",
                    ends.len(),
                    at.x,
                    at.y
                );
            }
            for pair in pairs {
                if let [one, other] = pair {
                    index.pair(*one, *other);
                }
            }
        }
        index
    }

    fn pair(&mut self, one: EndRef, other: EndRef) {
        if let Some(links) = self.links.get_mut(one.segment) {
            *links.slot_mut(one.end) = Some(other);
        }
        if let Some(links) = self.links.get_mut(other.segment) {
            *links.slot_mut(other.end) = Some(one);
        }
    }

    /// The end linked to `from`, if `from` sits on a merge point.
    pub(super) fn link(&self, from: EndRef) -> Option<EndRef> {
        self.links
            .get(from.segment)
            .and_then(|links| links.get(from.end))
    }

    pub(super) fn is_linked(&self, from: EndRef) -> bool {
        self.link(from).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn negative_zero_shares_a_key_with_zero() {
        assert_eq!(
            LocationKey::new(Coord { x: -0.0, y: 1.0 }),
            LocationKey::new(Coord { x: 0.0, y: 1.0 })
        );
        assert_ne!(
            LocationKey::new(Coord { x: 1.0, y: 0.0 }),
            LocationKey::new(Coord { x: 0.0, y: 1.0 })
        );
    }

    #[rstest]
    #[case::nan_x(Coord { x: f64::NAN, y: 1.0 })]
    #[case::nan_y(Coord { x: 1.0, y: f64::NAN })]
    #[case::infinite(Coord { x: f64::INFINITY, y: 0.0 })]
    fn non_finite_locations_have_no_key(#[case] coord: Coord<f64>) {
        assert_eq!(LocationKey::new(coord), None);
    }

    #[rstest]
    fn opposite_ends_swap() {
        assert_eq!(End::Start.opposite(), End::Finish);
        assert_eq!(End::Finish.opposite(), End::Start);
    }
}
