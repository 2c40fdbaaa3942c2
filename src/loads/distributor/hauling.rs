//! Hauling loads: self-weight factored differently on the overhangs and
//! between the truck supports

use crate::elements::MemberId;
use crate::error::{ModelError, ModelResult};
use crate::loads::load_case::{LoadCaseId, LC_GIRDER};
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

use super::{apply_factored_loads, LoadDistributor};

/// Applies self-weight and diaphragm loads for a girder on a hauling rig.
///
/// Loads on members lying entirely outside the two supports are multiplied by
/// `overhang_factor`, all others by `interior_factor`. Both cantilevers are
/// always modeled.
#[derive(Debug, Clone, Copy)]
pub struct HaulingLoads {
    /// Load case receiving the loads
    pub load_case: LoadCaseId,
    /// Factor on loads beyond the supports
    pub overhang_factor: f64,
    /// Factor on loads between the supports
    pub interior_factor: f64,
}

impl HaulingLoads {
    /// Create a hauling distributor writing to the girder load case
    pub fn new(overhang_factor: f64, interior_factor: f64) -> Self {
        Self {
            load_case: LC_GIRDER,
            overhang_factor,
            interior_factor,
        }
    }

    /// Write to `load_case` instead of the girder load case
    pub fn with_load_case(mut self, load_case: LoadCaseId) -> Self {
        self.load_case = load_case;
        self
    }

    fn factor(&self, model: &SegmentModel, member: MemberId, supports: (f64, f64)) -> f64 {
        let tol = model.merge_tolerance();
        let (left, right) = supports;
        match model.member_span(member) {
            Some((x1, x2)) if x2 <= left + tol || right - tol <= x1 => self.overhang_factor,
            _ => self.interior_factor,
        }
    }
}

impl LoadDistributor for HaulingLoads {
    fn models_cantilevers(&self, _requested: bool) -> bool {
        true
    }

    fn apply_loads(
        &self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        _interval: IntervalIndex,
    ) -> ModelResult<()> {
        if !(self.overhang_factor.is_finite() && self.interior_factor.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "hauling factors must be finite, got overhang {} interior {}",
                self.overhang_factor, self.interior_factor
            )));
        }

        let mut supports = model.support_joints().map(|j| j.x);
        let (Some(left), Some(right)) = (supports.next(), supports.last()) else {
            return Err(ModelError::InvalidInput(
                "hauling loads need a model with two supports".to_string(),
            ));
        };

        let mut segments = source.self_weight_loads();
        segments.extend(source.closure_joint_loads());
        let diaphragms = source.diaphragm_loads();

        let factor = |m: &SegmentModel, member: MemberId| self.factor(m, member, (left, right));
        let count = apply_factored_loads(model, self.load_case, &segments, &diaphragms, factor)?;
        log::debug!(
            "Applied {count} hauling loads (overhang x{}, interior x{})",
            self.overhang_factor,
            self.interior_factor
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CantileverPolicy, ModelBuilder};
    use crate::elements::SectionProperties;
    use crate::loads::ConcentratedLoad;
    use crate::model::EquilibriumTolerances;
    use crate::points::{DiscretizationPoint, PointAttributes};
    use crate::segment::{SegmentData, SupportLocations};
    use approx::assert_relative_eq;

    fn hauling_model() -> SegmentModel {
        let points = [
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE),
            DiscretizationPoint::new(10.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(90.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(100.0, PointAttributes::END_FACE),
        ];
        ModelBuilder::new(0.01)
            .build(
                EquilibriumTolerances::default(),
                &points,
                SupportLocations::new(10.0, 90.0),
                CantileverPolicy::both(),
            )
            .unwrap()
    }

    #[test]
    fn test_always_models_cantilevers() {
        let hauling = HaulingLoads::new(1.1, 1.0);
        assert!(hauling.models_cantilevers(false));
        assert!(hauling.models_cantilevers(true));
    }

    #[test]
    fn test_point_loads_are_factored() {
        let mut model = hauling_model();
        let segment = SegmentData::new(100.0, SectionProperties::symmetric(1.0, 1.0, 1.0), 1.0)
            .with_diaphragm(ConcentratedLoad::force(5.0, 10.0))
            .with_diaphragm(ConcentratedLoad::force(50.0, 10.0));
        HaulingLoads::new(1.2, 0.9).apply_loads(&mut model, &segment, 0).unwrap();

        let loading = model.loading(LC_GIRDER).unwrap();
        assert_eq!(loading.point.len(), 2);
        assert_relative_eq!(loading.point[0].fy, 12.0);
        assert_relative_eq!(loading.point[1].fy, 9.0);
    }

    #[test]
    fn test_non_finite_factor_rejected() {
        let mut model = hauling_model();
        let segment = SegmentData::new(100.0, SectionProperties::symmetric(1.0, 1.0, 1.0), 1.0);
        assert!(HaulingLoads::new(f64::NAN, 1.0).apply_loads(&mut model, &segment, 0).is_err());
    }
}
