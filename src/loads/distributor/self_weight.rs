//! Girder self-weight, closure joint and diaphragm loads

use crate::error::ModelResult;
use crate::loads::load_case::{LoadCaseId, LC_GIRDER};
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

use super::{apply_factored_loads, LoadDistributor};

/// Applies the segment's self-weight, closure joint loads and precast
/// diaphragm loads to a single load case
#[derive(Debug, Clone, Copy)]
pub struct SelfWeightLoads {
    /// Load case receiving the loads
    pub load_case: LoadCaseId,
}

impl SelfWeightLoads {
    /// Create a distributor for `load_case`
    pub fn new(load_case: LoadCaseId) -> Self {
        Self { load_case }
    }
}

impl Default for SelfWeightLoads {
    fn default() -> Self {
        Self::new(LC_GIRDER)
    }
}

impl LoadDistributor for SelfWeightLoads {
    fn apply_loads(
        &self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        _interval: IntervalIndex,
    ) -> ModelResult<()> {
        let mut segments = source.self_weight_loads();
        segments.extend(source.closure_joint_loads());
        let diaphragms = source.diaphragm_loads();

        let count =
            apply_factored_loads(model, self.load_case, &segments, &diaphragms, |_, _| 1.0)?;
        log::debug!("Applied {count} self-weight loads to load case {}", self.load_case);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CantileverPolicy, ModelBuilder};
    use crate::elements::SectionProperties;
    use crate::loads::{ConcentratedLoad, LinearLoad};
    use crate::model::EquilibriumTolerances;
    use crate::points::{DiscretizationPoint, PointAttributes};
    use crate::segment::{SegmentData, SupportLocations};
    use approx::assert_relative_eq;

    fn build(policy: CantileverPolicy) -> SegmentModel {
        let points = [
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE),
            DiscretizationPoint::new(5.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(40.0, PointAttributes::SECTION_CHANGE),
            DiscretizationPoint::new(95.0, PointAttributes::SUPPORT),
            DiscretizationPoint::new(100.0, PointAttributes::END_FACE),
        ];
        let supports = SupportLocations::new(5.0, 95.0);
        ModelBuilder::new(0.01)
            .build(EquilibriumTolerances::default(), &points, supports, policy)
            .unwrap()
    }

    fn segment() -> SegmentData {
        SegmentData::new(100.0, SectionProperties::symmetric(1.0, 1.0, 1.0), 1.0)
            .with_self_weight(LinearLoad::uniform(0.0, 60.0, 10.0))
            .with_self_weight(LinearLoad::new(60.0, 100.0, 10.0, 6.0))
            .with_diaphragm(ConcentratedLoad::force(50.0, 25.0))
    }

    #[test]
    fn test_self_weight_with_cantilevers() {
        let mut model = build(CantileverPolicy::both());
        SelfWeightLoads::default().apply_loads(&mut model, &segment(), 0).unwrap();

        let loading = model.loading(LC_GIRDER).unwrap();
        // 0-5, 5-40, 40-60 from the first segment; 60-95, 95-100 from the second
        assert_eq!(loading.distributed.len(), 5);
        assert_eq!(loading.point.len(), 1);
        assert_eq!(loading.point[0].member, 2);
        assert_relative_eq!(loading.point[0].x, 10.0);
        assert_relative_eq!(loading.total_transverse_force(), 600.0 + 320.0 + 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_self_weight_clipped_at_supports() {
        let mut model = build(CantileverPolicy::none());
        SelfWeightLoads::default().apply_loads(&mut model, &segment(), 0).unwrap();

        let loading = model.loading(LC_GIRDER).unwrap();
        let expected = segment()
            .self_weight
            .iter()
            .map(|l| l.total_force_within(5.0, 95.0))
            .sum::<f64>()
            + 25.0;
        assert_relative_eq!(loading.total_transverse_force(), expected, epsilon = 1e-9);
        assert!(loading.distributed.iter().all(|l| l.member < model.members().len()));
    }

    #[test]
    fn test_empty_loading_still_created() {
        let mut model = build(CantileverPolicy::none());
        let bare = SegmentData::new(100.0, SectionProperties::symmetric(1.0, 1.0, 1.0), 1.0);
        SelfWeightLoads::new(7).apply_loads(&mut model, &bare, 0).unwrap();
        assert!(model.loading(7).unwrap().is_empty());
    }
}
