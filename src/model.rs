//! Segment model - the discretized beam handed to the external solver

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::elements::{DofReleases, Joint, JointId, Member, MemberId};
use crate::error::{ModelError, ModelResult};
use crate::loads::{LoadCaseId, Loading};
use crate::math::{self, ZERO_TOLERANCE};
use crate::poi::{ModelPoi, PoiId};

/// Equilibrium tolerances the solver checks its results against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumTolerances {
    /// Force equilibrium tolerance
    pub force: f64,
    /// Moment equilibrium tolerance
    pub moment: f64,
}

impl Default for EquilibriumTolerances {
    fn default() -> Self {
        Self {
            force: 1.0e-6,
            moment: 1.0e-6,
        }
    }
}

/// Lifecycle state of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ModelState {
    /// Nothing built yet
    #[default]
    Empty,
    /// Joints, members and loads populated
    Built,
    /// Points of interest resolved
    Queried,
}

/// A 2D beam model of one girder segment.
///
/// Joints and members live in index arenas: a joint's id is its position in
/// `joints`, and joints are kept in strictly increasing position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentModel {
    joints: Vec<Joint>,
    members: Vec<Member>,
    loadings: BTreeMap<LoadCaseId, Loading>,
    pois: Vec<ModelPoi>,
    tolerances: EquilibriumTolerances,
    /// Positional tolerance the model was discretized with
    merge_tolerance: f64,
    state: ModelState,
}

impl SegmentModel {
    /// Create an empty model with the given equilibrium tolerances
    pub fn new(tolerances: EquilibriumTolerances) -> Self {
        Self {
            tolerances,
            merge_tolerance: ZERO_TOLERANCE,
            ..Default::default()
        }
    }

    /// Remove all joints, members, loads and POIs, keeping the tolerances
    pub fn clear(&mut self) {
        self.joints.clear();
        self.members.clear();
        self.loadings.clear();
        self.pois.clear();
        self.merge_tolerance = ZERO_TOLERANCE;
        self.state = ModelState::Empty;
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a joint at `x`; positions must strictly increase
    pub fn add_joint(&mut self, x: f64) -> ModelResult<JointId> {
        if let Some(last) = self.joints.last() {
            if x <= last.x {
                return Err(ModelError::InvalidGeometry(format!(
                    "joint at {x} does not follow joint {} at {}",
                    last.id, last.x
                )));
            }
        }
        let id = self.joints.len();
        self.joints.push(Joint::new(id, x));
        Ok(id)
    }

    /// Apply a support boundary condition to an existing joint
    pub fn add_support(&mut self, joint: JointId, releases: DofReleases) -> ModelResult<()> {
        let jnt = self
            .joints
            .get_mut(joint)
            .ok_or_else(|| ModelError::InvalidInput(format!("joint {joint} not found")))?;
        jnt.support = true;
        jnt.releases = releases;
        Ok(())
    }

    /// Add a member between two consecutive joints
    pub fn add_member(
        &mut self,
        start_joint: JointId,
        end_joint: JointId,
    ) -> ModelResult<MemberId> {
        if end_joint != start_joint + 1 || end_joint >= self.joints.len() {
            return Err(ModelError::InvalidGeometry(format!(
                "member must connect consecutive joints, got {start_joint} -> {end_joint}"
            )));
        }
        let id = self.members.len();
        self.members.push(Member::new(id, start_joint, end_joint));
        Ok(id)
    }

    pub(crate) fn set_merge_tolerance(&mut self, tolerance: f64) {
        self.merge_tolerance = tolerance;
    }

    pub(crate) fn advance_state(&mut self, state: ModelState) {
        debug_assert!(state >= self.state, "model state cannot regress");
        if state > self.state {
            self.state = state;
        }
    }

    /// Get the loading for a load case, creating it if needed
    pub fn loading_mut(&mut self, case: LoadCaseId) -> &mut Loading {
        self.loadings.entry(case).or_insert_with(|| Loading::new(case))
    }

    pub(crate) fn add_poi(&mut self, id: PoiId, member: MemberId, offset: f64) {
        self.pois.push(ModelPoi { id, member, offset });
    }

    // ========================
    // Queries
    // ========================

    /// Joints ordered by position
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Members ordered by position
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> impl Iterator<Item = &mut Member> {
        self.members.iter_mut()
    }

    /// Get a joint by id
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id)
    }

    /// Get a member by id
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// Start and end positions of a member
    pub fn member_span(&self, id: MemberId) -> Option<(f64, f64)> {
        let member = self.members.get(id)?;
        Some((self.joints[member.start_joint].x, self.joints[member.end_joint].x))
    }

    /// Length of a member
    pub fn member_length(&self, id: MemberId) -> Option<f64> {
        self.member_span(id).map(|(x1, x2)| x2 - x1)
    }

    /// Supported joints, left to right
    pub fn support_joints(&self) -> impl Iterator<Item = &Joint> {
        self.joints.iter().filter(|j| j.support)
    }

    /// Positions of the first and last joint
    pub fn extent(&self) -> Option<(f64, f64)> {
        Some((self.joints.first()?.x, self.joints.last()?.x))
    }

    /// Find the member containing `x`, returning it with the distance from its
    /// start joint. A position on a joint resolves to the member ending there.
    ///
    /// Positions within the merge tolerance of the model's ends resolve to the
    /// end members; the offset always lies on the member.
    pub fn find_member(&self, x: f64) -> Option<(MemberId, f64)> {
        let span = |m: &Member| (self.joints[m.start_joint].x, self.joints[m.end_joint].x);
        if let Some(m) = self.members.iter().find(|&m| {
            let (x1, x2) = span(m);
            x1 <= x && x <= x2
        }) {
            return Some((m.id, x - span(m).0));
        }

        let tol = self.merge_tolerance;
        self.members.iter().find_map(|m| {
            let (x1, x2) = span(m);
            math::in_range(x1, x, x2, tol).then(|| (m.id, (x - x1).clamp(0.0, x2 - x1)))
        })
    }

    /// Get the loading for a load case
    pub fn loading(&self, case: LoadCaseId) -> Option<&Loading> {
        self.loadings.get(&case)
    }

    /// All loadings keyed by load case
    pub fn loadings(&self) -> &BTreeMap<LoadCaseId, Loading> {
        &self.loadings
    }

    /// Resolved POI references
    pub fn pois(&self) -> &[ModelPoi] {
        &self.pois
    }

    /// Get a POI reference by id
    pub fn poi(&self, id: PoiId) -> Option<&ModelPoi> {
        self.pois.iter().find(|p| p.id == id)
    }

    /// Position along the segment recovered from a POI reference
    pub fn poi_position(&self, id: PoiId) -> Option<f64> {
        let poi = self.poi(id)?;
        let (x1, _) = self.member_span(poi.member)?;
        Some(x1 + poi.offset)
    }

    /// Equilibrium tolerances configured for the solver
    pub fn tolerances(&self) -> EquilibriumTolerances {
        self.tolerances
    }

    /// Positional tolerance used to discretize this model
    pub fn merge_tolerance(&self) -> f64 {
        self.merge_tolerance
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModelState {
        self.state
    }
}
