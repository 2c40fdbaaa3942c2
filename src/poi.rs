//! Points of interest: mapping physical locations onto model members

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;
use crate::math;
use crate::model::{ModelState, SegmentModel};

/// Identifier of a POI reference on a model
pub type PoiId = u64;

/// Identifier of a point of interest in the bridge model
pub type ExternalPoiId = u64;

/// A location where analysis results will be requested
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Bridge model identity
    pub id: ExternalPoiId,
    /// Position (distance from start of segment)
    pub x: f64,
}

impl PointOfInterest {
    /// Create a point of interest
    pub fn new(id: ExternalPoiId, x: f64) -> Self {
        Self { id, x }
    }
}

/// A POI placed on a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPoi {
    /// Unique reference id
    pub id: PoiId,
    /// Member holding the POI
    pub member: MemberId,
    /// Distance from the member's start joint
    pub offset: f64,
}

/// Issues POI reference ids.
///
/// Ids only increase and are never reused for the lifetime of the counter.
/// Each analysis context owns one; concurrent analyses use separate counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiIdCounter {
    next: PoiId,
}

impl PoiIdCounter {
    /// Counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose first id is `first`
    pub fn starting_at(first: PoiId) -> Self {
        Self { next: first }
    }

    /// Issue the next id
    pub fn next_id(&mut self) -> PoiId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` returns
    pub fn peek(&self) -> PoiId {
        self.next
    }
}

/// External POI to model reference mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoiMap {
    map: BTreeMap<ExternalPoiId, Vec<PoiId>>,
}

impl PoiMap {
    /// Record the references of an external POI
    pub fn insert(&mut self, poi: ExternalPoiId, references: Vec<PoiId>) {
        self.map.entry(poi).or_default().extend(references);
    }

    /// References of an external POI. Two references mean the POI sits on an
    /// interior support: the first is at the end of the member on the left,
    /// the second at the start of the member on the right.
    pub fn get(&self, poi: ExternalPoiId) -> Option<&[PoiId]> {
        self.map.get(&poi).map(Vec::as_slice)
    }

    /// First reference of an external POI
    pub fn model_poi(&self, poi: ExternalPoiId) -> Option<PoiId> {
        self.get(poi).and_then(|ids| ids.first().copied())
    }

    /// Iterate over external POIs and their references
    pub fn iter(&self) -> impl Iterator<Item = (ExternalPoiId, &[PoiId])> {
        self.map.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of mapped external POIs
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing is mapped
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Places points of interest on a built model, drawing ids from a counter
/// owned by the caller
#[derive(Debug)]
pub struct PoiLocator<'a> {
    ids: &'a mut PoiIdCounter,
}

impl<'a> PoiLocator<'a> {
    /// Create a locator issuing ids from `ids`
    pub fn new(ids: &'a mut PoiIdCounter) -> Self {
        Self { ids }
    }

    /// Place one POI, returning the ids of the one or two references created
    pub fn locate(&mut self, model: &mut SegmentModel, poi: &PointOfInterest) -> Vec<PoiId> {
        let ids: Vec<PoiId> = resolve(model, poi.x)
            .into_iter()
            .map(|(member, offset)| {
                let id = self.ids.next_id();
                model.add_poi(id, member, offset);
                id
            })
            .collect();
        model.advance_state(ModelState::Queried);
        ids
    }

    /// Place every POI and collect the mapping
    pub fn locate_all(&mut self, model: &mut SegmentModel, pois: &[PointOfInterest]) -> PoiMap {
        let mut map = PoiMap::default();
        for poi in pois {
            let ids = self.locate(model, poi);
            map.insert(poi.id, ids);
        }
        map
    }
}

/// Member references for position `x`.
///
/// # Panics
/// If the model has no members, if `x` lies beyond an end joint that is not a
/// support, or if no member holds `x`.
fn resolve(model: &SegmentModel, x: f64) -> Vec<(MemberId, f64)> {
    let joints = model.joints();
    let tol = model.merge_tolerance();
    assert!(!model.members().is_empty(), "cannot place POI at {x} on a model without members");

    let member_ending_at = |joint: usize| model.members().iter().position(|m| m.end_joint == joint);
    let member_starting_at =
        |joint: usize| model.members().iter().position(|m| m.start_joint == joint);
    let length = |member: MemberId| model.member_length(member).unwrap_or(0.0);

    let first = &joints[0];
    let last = &joints[joints.len() - 1];

    // beyond the model, on an unmodeled cantilever
    if x < first.x - tol {
        assert!(first.support, "POI at {x} lies before joint {} which is not a support", first.id);
        log::trace!("POI at {x} clamped to left support at {}", first.x);
        if let Some(member) = member_starting_at(first.id) {
            return vec![(member, 0.0)];
        }
    } else if last.x + tol < x {
        assert!(last.support, "POI at {x} lies after joint {} which is not a support", last.id);
        log::trace!("POI at {x} clamped to right support at {}", last.x);
        if let Some(member) = member_ending_at(last.id) {
            return vec![(member, length(member))];
        }
    }

    // on a joint
    if let Some(joint) = joints.iter().find(|j| math::is_equal(x, j.x, tol)) {
        let left = member_ending_at(joint.id);
        let right = member_starting_at(joint.id);
        return match (left, right) {
            (Some(left), Some(right)) if joint.support => vec![(left, length(left)), (right, 0.0)],
            (Some(left), _) => vec![(left, length(left))],
            (None, Some(right)) => vec![(right, 0.0)],
            (None, None) => panic!("joint {} at {} has no members", joint.id, joint.x),
        };
    }

    // between two joints
    for pair in joints.windows(2) {
        if pair[0].x < x && x < pair[1].x {
            if let Some(member) = member_starting_at(pair[0].id) {
                return vec![(member, x - pair[0].x)];
            }
        }
    }

    panic!("POI at {x} could not be located on the segment model");
}
