//! Segment Model - beam models for precast girder segments
//!
//! This library turns the description of one girder segment into a 2D beam
//! model ready for a line-element solver:
//! - Discretization at section transitions, end faces and supports
//! - Merging of near-coincident points without losing supports or end faces
//! - Joints, members and boundary conditions, with or without end cantilevers
//! - Mid-span section stiffness for every member
//! - Self-weight, hauling, staged deck and pretension load mapping
//! - Points of interest mapped onto member references
//!
//! ## Example
//! ```rust
//! use segment_model::prelude::*;
//!
//! let segment = SegmentData::new(100.0, SectionProperties::rectangular(1.0, 2.0), 4000.0)
//!     .with_transition(TransitionMarker::new(40.0, PointAttributes::SECTION_CHANGE))
//!     .with_uniform_self_weight(0.8);
//!
//! let request = AnalysisRequest::new(0, SupportLocations::new(5.0, 95.0))
//!     .with_poi(PointOfInterest::new(1, 50.0));
//!
//! let mut context = AnalysisContext::new(ModelOptions::default());
//! let analysis = context
//!     .build(&segment, &request, &SelfWeightLoads::default())
//!     .unwrap();
//!
//! // joints at 0, 5, 40, 95 and 100
//! assert_eq!(analysis.model.members().len(), 4);
//!
//! let reference = analysis.poi_map.model_poi(1).unwrap();
//! let x = analysis.model.poi_position(reference).unwrap();
//! assert!((x - 50.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod builder;
pub mod elements;
pub mod error;
pub mod influence;
pub mod loads;
pub mod math;
pub mod model;
pub mod poi;
pub mod points;
pub mod segment;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisContext, AnalysisRequest, ModelOptions, SegmentAnalysis};
    pub use crate::builder::{CantileverPolicy, ModelBuilder};
    pub use crate::elements::{DofReleases, Joint, Member, SectionProperties, Stiffness};
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::influence::{add_unit_load_cases, UnitLoadCases, UNIT_LOAD_CASE_BASE};
    pub use crate::loads::{
        ConcentratedLoad, DeckLoadStation, DeckLoads, DistributedLoad, HaulingLoads, LinearLoad,
        LoadDistributor, Loading, PointLoad, PretensionLoads, SelfWeightLoads, LC_GIRDER,
        LC_PRETENSION, LC_SLAB, LC_SLAB_PAD,
    };
    pub use crate::model::{EquilibriumTolerances, ModelState, SegmentModel};
    pub use crate::poi::{PoiIdCounter, PoiLocator, PoiMap, PointOfInterest};
    pub use crate::points::{DiscretizationPoint, PointAttributes};
    pub use crate::segment::{SegmentData, SegmentSource, SupportLocations, TransitionMarker};
}
