//! Equivalent pretension loads

use crate::error::ModelResult;
use crate::loads::load_case::{LoadCaseId, LC_PRETENSION};
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

use super::{apply_factored_loads, LoadDistributor};

/// Places the point forces and moments equivalent to the strand pretension
#[derive(Debug, Clone, Copy)]
pub struct PretensionLoads {
    /// Load case receiving the loads
    pub load_case: LoadCaseId,
}

impl Default for PretensionLoads {
    fn default() -> Self {
        Self {
            load_case: LC_PRETENSION,
        }
    }
}

impl LoadDistributor for PretensionLoads {
    fn apply_loads(
        &self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        _interval: IntervalIndex,
    ) -> ModelResult<()> {
        let loads = source.equivalent_pretension_loads();
        let count = apply_factored_loads(model, self.load_case, &[], &loads, |_, _| 1.0)?;
        log::debug!("Applied {count} equivalent pretension loads");
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

    #[test]
    fn test_force_and_moment_placed() {
        let points = [
            DiscretizationPoint::new(0.0, PointAttributes::END_FACE | PointAttributes::SUPPORT),
            DiscretizationPoint::new(20.0, PointAttributes::SECTION_CHANGE),
            DiscretizationPoint::new(60.0, PointAttributes::END_FACE | PointAttributes::SUPPORT),
        ];
        let mut model = ModelBuilder::new(0.006)
            .build(
                EquilibriumTolerances::default(),
                &points,
                SupportLocations::new(0.0, 60.0),
                CantileverPolicy::none(),
            )
            .unwrap();
        let segment = SegmentData::new(60.0, SectionProperties::symmetric(1.0, 1.0, 1.0), 1.0)
            .with_pretension(ConcentratedLoad::with_moment(3.0, -50.0, 120.0))
            .with_pretension(ConcentratedLoad::with_moment(57.0, -50.0, -120.0));
        PretensionLoads::default().apply_loads(&mut model, &segment, 0).unwrap();

        let loading = model.loading(LC_PRETENSION).unwrap();
        assert_eq!(loading.point.len(), 2);
        assert_eq!(loading.point[0].member, 0);
        assert_eq!(loading.point[0].mz, 120.0);
        assert_eq!(loading.point[1].member, 1);
        assert!((loading.point[1].x - 37.0).abs() < 1e-12);
        assert!(loading.distributed.is_empty());
    }
}
