//! Analysis options and the model-building pipeline

use serde::{Deserialize, Serialize};

use crate::builder::{CantileverPolicy, ModelBuilder};
use crate::elements::apply_section_stiffness;
use crate::error::{ModelError, ModelResult};
use crate::loads::LoadDistributor;
use crate::model::{EquilibriumTolerances, SegmentModel};
use crate::points::{self, PointAttributes};
use crate::poi::{PoiId, PoiIdCounter, PoiLocator, PoiMap, PointOfInterest};
use crate::segment::{IntervalIndex, SegmentSource, SupportLocations};

/// Options controlling how a segment is discretized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Merge tolerance as a fraction of the segment length
    pub merge_tolerance_ratio: f64,
    /// Model the end cantilevers when the load distributor allows it
    pub include_cantilevers: bool,
    /// Transition tags that become joints
    pub transition_filter: PointAttributes,
    /// Equilibrium tolerances handed to the solver
    pub tolerances: EquilibriumTolerances,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            merge_tolerance_ratio: 1.0e-4,
            include_cantilevers: true,
            transition_filter: PointAttributes::TRANSITIONS,
            tolerances: EquilibriumTolerances::default(),
        }
    }
}

impl ModelOptions {
    /// Set the merge tolerance ratio
    pub fn with_merge_tolerance_ratio(mut self, ratio: f64) -> Self {
        self.merge_tolerance_ratio = ratio;
        self
    }

    /// Enable or disable cantilever modeling
    pub fn with_cantilevers(mut self, include: bool) -> Self {
        self.include_cantilevers = include;
        self
    }

    /// Set which transition tags become joints
    pub fn with_transition_filter(mut self, filter: PointAttributes) -> Self {
        self.transition_filter = filter;
        self
    }

    /// Set the equilibrium tolerances
    pub fn with_tolerances(mut self, force: f64, moment: f64) -> Self {
        self.tolerances = EquilibriumTolerances { force, moment };
        self
    }

    fn validate(&self) -> ModelResult<()> {
        if !(self.merge_tolerance_ratio.is_finite() && self.merge_tolerance_ratio > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "merge tolerance ratio must be positive, got {}",
                self.merge_tolerance_ratio
            )));
        }
        if !(self.tolerances.force > 0.0 && self.tolerances.moment > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "equilibrium tolerances must be positive, got {:?}",
                self.tolerances
            )));
        }
        Ok(())
    }
}

/// One model to build: the interval, where the segment sits and where results
/// are wanted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Analysis interval
    pub interval: IntervalIndex,
    /// Support locations for this interval
    pub supports: Option<SupportLocations>,
    /// Points of interest to map onto the model
    #[serde(default)]
    pub pois: Vec<PointOfInterest>,
}

impl AnalysisRequest {
    /// Request a model for `interval` resting on `supports`
    pub fn new(interval: IntervalIndex, supports: SupportLocations) -> Self {
        Self {
            interval,
            supports: Some(supports),
            pois: Vec::new(),
        }
    }

    /// Add a point of interest
    pub fn with_poi(mut self, poi: PointOfInterest) -> Self {
        self.pois.push(poi);
        self
    }

    /// Add several points of interest
    pub fn with_pois(mut self, pois: impl IntoIterator<Item = PointOfInterest>) -> Self {
        self.pois.extend(pois);
        self
    }
}

/// A built model and where its points of interest ended up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    /// The loaded model
    pub model: SegmentModel,
    /// External POI to model reference mapping
    pub poi_map: PoiMap,
    /// Which cantilevers were modeled
    pub cantilevers: CantileverPolicy,
}

/// Owns the options and the POI id counter shared by every model built
/// through it
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    options: ModelOptions,
    poi_ids: PoiIdCounter,
}

impl AnalysisContext {
    /// Create a context with the given options
    pub fn new(options: ModelOptions) -> Self {
        Self {
            options,
            poi_ids: PoiIdCounter::new(),
        }
    }

    /// Start issuing POI ids from `counter`
    pub fn with_poi_ids(mut self, counter: PoiIdCounter) -> Self {
        self.poi_ids = counter;
        self
    }

    /// Current options
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// The id the next POI reference receives
    pub fn next_poi_id(&self) -> PoiId {
        self.poi_ids.peek()
    }

    /// Build, load and query a fresh model
    pub fn build(
        &mut self,
        source: &dyn SegmentSource,
        request: &AnalysisRequest,
        distributor: &dyn LoadDistributor,
    ) -> ModelResult<SegmentAnalysis> {
        let mut model = SegmentModel::new(self.options.tolerances);
        let (poi_map, cantilevers) = self.build_into(&mut model, source, request, distributor)?;
        Ok(SegmentAnalysis {
            model,
            poi_map,
            cantilevers,
        })
    }

    /// Rebuild `model` in place. Anything it held before is discarded.
    pub fn build_into(
        &mut self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        request: &AnalysisRequest,
        distributor: &dyn LoadDistributor,
    ) -> ModelResult<(PoiMap, CantileverPolicy)> {
        self.options.validate()?;
        let supports = request
            .supports
            .ok_or_else(|| {
                ModelError::InvalidInput("analysis request has no supports".to_string())
            })?;

        let (start, end) = source.end_faces();
        if !(start.is_finite() && end.is_finite()) || end <= start {
            return Err(ModelError::InvalidGeometry(format!(
                "segment end faces must be ordered, got {start} and {end}"
            )));
        }
        supports.validate(start, end)?;

        let candidates = points::collect_points(source, self.options.transition_filter, supports);
        let tolerance = points::merge_tolerance(&candidates, self.options.merge_tolerance_ratio);
        if supports.span() <= tolerance {
            return Err(ModelError::InvalidSupports {
                left: supports.left,
                right: supports.right,
            });
        }
        let points = points::deduplicate(candidates, tolerance);

        let requested = distributor.models_cantilevers(self.options.include_cantilevers);
        let cantilevers = CantileverPolicy::decide(&points, supports, requested, tolerance);

        ModelBuilder::new(tolerance).build_into(model, &points, supports, cantilevers)?;
        apply_section_stiffness(model, source, request.interval)?;
        distributor.apply_loads(model, source, request.interval)?;

        let poi_map = PoiLocator::new(&mut self.poi_ids).locate_all(model, &request.pois);
        log::info!(
            "Segment model for interval {}: {} joints, {} members, {} load cases, {} POIs",
            request.interval,
            model.joints().len(),
            model.members().len(),
            model.loadings().len(),
            poi_map.len()
        );
        Ok((poi_map, cantilevers))
    }
}
