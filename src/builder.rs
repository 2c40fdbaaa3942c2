//! Model builder - turns deduplicated discretization points into joints and members

use serde::{Deserialize, Serialize};

use crate::elements::{DofReleases, JointId};
use crate::error::ModelResult;
use crate::math;
use crate::model::{EquilibriumTolerances, ModelState, SegmentModel};
use crate::points::DiscretizationPoint;
use crate::segment::SupportLocations;

/// Which end cantilevers are part of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CantileverPolicy {
    /// Model the region before the left support
    pub left: bool,
    /// Model the region after the right support
    pub right: bool,
}

impl CantileverPolicy {
    /// Model neither cantilever
    pub fn none() -> Self {
        Self::default()
    }

    /// Model both cantilevers
    pub fn both() -> Self {
        Self {
            left: true,
            right: true,
        }
    }

    /// Decide per end whether to model the cantilever.
    ///
    /// An end is modeled when `requested` and its overhang is longer than
    /// `tolerance`; shorter overhangs would produce a member the solver
    /// cannot handle. Loads are not considered.
    pub fn decide(
        points: &[DiscretizationPoint],
        supports: SupportLocations,
        requested: bool,
        tolerance: f64,
    ) -> Self {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Self::none();
        };
        Self {
            left: requested && supports.left - first.x > tolerance,
            right: requested && last.x - supports.right > tolerance,
        }
    }
}

/// Builds the joints and members of a segment model
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder {
    tolerance: f64,
}

impl ModelBuilder {
    /// Create a builder using `tolerance` to match points to supports
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Build a new model from `points`
    pub fn build(
        &self,
        tolerances: EquilibriumTolerances,
        points: &[DiscretizationPoint],
        supports: SupportLocations,
        cantilevers: CantileverPolicy,
    ) -> ModelResult<SegmentModel> {
        let mut model = SegmentModel::new(tolerances);
        self.build_into(&mut model, points, supports, cantilevers)?;
        Ok(model)
    }

    /// Clear `model` and populate it with joints and members from `points`.
    ///
    /// # Panics
    /// If either support has no joint after construction. The points come from
    /// the collector, which always inserts both supports, so a missing support
    /// means upstream geometry is broken and the model would be unstable.
    pub fn build_into(
        &self,
        model: &mut SegmentModel,
        points: &[DiscretizationPoint],
        supports: SupportLocations,
        cantilevers: CantileverPolicy,
    ) -> ModelResult<()> {
        let tol = self.tolerance;
        model.clear();
        model.set_merge_tolerance(tol);

        let lo = if cantilevers.left { f64::NEG_INFINITY } else { supports.left - tol };
        let hi = if cantilevers.right { f64::INFINITY } else { supports.right + tol };

        let mut left_support: Option<JointId> = None;
        let mut right_support: Option<JointId> = None;

        for point in points.iter().filter(|p| lo <= p.x && p.x <= hi) {
            let joint = model.add_joint(point.x)?;
            if !point.is_support() {
                continue;
            }
            if left_support.is_none() && math::is_equal(point.x, supports.left, tol) {
                model.add_support(joint, DofReleases::roller())?;
                left_support = Some(joint);
            } else if right_support.is_none() && math::is_equal(point.x, supports.right, tol) {
                model.add_support(joint, DofReleases::pin())?;
                right_support = Some(joint);
            }
        }

        assert!(
            left_support.is_some() && right_support.is_some(),
            "support joints missing from segment model (left {:?} at {}, right {:?} at {})",
            left_support,
            supports.left,
            right_support,
            supports.right
        );

        let joint_count = model.joints().len();
        for end in 1..joint_count {
            model.add_member(end - 1, end)?;
        }

        model.advance_state(ModelState::Built);
        log::debug!(
            "Built segment model: {} joints, {} members, cantilevers left={} right={}",
            joint_count,
            model.members().len(),
            cantilevers.left,
            cantilevers.right
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointAttributes;

    fn scenario_points() -> Vec<DiscretizationPoint> {
        vec![
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE),
            DiscretizationPoint::new(5.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(40.0, PointAttributes::SECTION_CHANGE),
            DiscretizationPoint::new(95.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(100.0, PointAttributes::END_FACE),
        ]
    }

    #[test]
    fn test_build_with_cantilevers() {
        let supports = SupportLocations::new(5.0, 95.0);
        let model = ModelBuilder::new(0.01)
            .build(
                EquilibriumTolerances::default(),
                &scenario_points(),
                supports,
                CantileverPolicy::both(),
            )
            .unwrap();

        let xs: Vec<f64> = model.joints().iter().map(|j| j.x).collect();
        assert_eq!(xs, vec![0.0, 5.0, 40.0, 95.0, 100.0]);
        assert_eq!(model.members().len(), 4);
        assert_eq!(model.state(), ModelState::Built);

        let left = &model.joints()[1];
        assert!(left.support);
        assert_eq!(left.releases, DofReleases::roller());
        let right = &model.joints()[3];
        assert!(right.support);
        assert_eq!(right.releases, DofReleases::pin());
        assert_eq!(model.support_joints().count(), 2);
    }

    #[test]
    fn test_build_without_cantilevers() {
        let supports = SupportLocations::new(5.0, 95.0);
        let model = ModelBuilder::new(0.01)
            .build(
                EquilibriumTolerances::default(),
                &scenario_points(),
                supports,
                CantileverPolicy::none(),
            )
            .unwrap();

        let xs: Vec<f64> = model.joints().iter().map(|j| j.x).collect();
        assert_eq!(xs, vec![5.0, 40.0, 95.0]);
        assert_eq!(model.members().len(), model.joints().len() - 1);
        assert!(model.joints()[0].support);
        assert!(model.joints()[2].support);
    }

    #[test]
    fn test_one_sided_cantilever() {
        let supports = SupportLocations::new(5.0, 95.0);
        let policy = CantileverPolicy { left: true, right: false };
        let model = ModelBuilder::new(0.01)
            .build(EquilibriumTolerances::default(), &scenario_points(), supports, policy)
            .unwrap();
        assert_eq!(model.extent(), Some((0.0, 95.0)));
        assert_eq!(model.members().len(), 3);
    }

    #[test]
    fn test_cantilever_decision_uses_length_only() {
        let points = scenario_points();
        let supports = SupportLocations::new(5.0, 95.0);
        let requested = CantileverPolicy::decide(&points, supports, true, 0.01);
        assert_eq!(requested, CantileverPolicy::both());
        let declined = CantileverPolicy::decide(&points, supports, false, 0.01);
        assert_eq!(declined, CantileverPolicy::none());

        let flush = vec![
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE | PointAttributes::SUPPORT),
            DiscretizationPoint::new(95.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(100.0, PointAttributes::END_FACE),
        ];
        let policy = CantileverPolicy::decide(&flush, SupportLocations::new(0.0, 95.0), true, 0.01);
        assert!(!policy.left);
        assert!(policy.right);
    }

    #[test]
    #[should_panic(expected = "support joints missing")]
    fn test_missing_support_panics() {
        let points = vec![
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE),
            DiscretizationPoint::new(5.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(100.0, PointAttributes::END_FACE),
        ];
        let _ = ModelBuilder::new(0.01).build(
            EquilibriumTolerances::default(),
            &points,
            SupportLocations::new(5.0, 95.0),
            CantileverPolicy::both(),
        );
    }

    #[test]
    fn test_rebuild_clears_previous_contents() {
        let builder = ModelBuilder::new(0.01);
        let mut model = builder
            .build(
                EquilibriumTolerances::default(),
                &scenario_points(),
                SupportLocations::new(5.0, 95.0),
                CantileverPolicy::both(),
            )
            .unwrap();
        model.loading_mut(0).add_distributed(0, 0.0, 5.0, 1.0, 1.0);

        builder
            .build_into(
                &mut model,
                &scenario_points(),
                SupportLocations::new(5.0, 95.0),
                CantileverPolicy::none(),
            )
            .unwrap();
        assert_eq!(model.joints().len(), 3);
        assert!(model.loadings().is_empty());
    }
}
