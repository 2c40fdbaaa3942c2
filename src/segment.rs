//! Upstream description of a girder segment
//!
//! The bridge model that owns piers, spans and segment geometry lives outside
//! this crate. [`SegmentSource`] is the slice of it the model builder reads;
//! [`SegmentData`] is a plain in-memory implementation that can be loaded from
//! JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::SectionProperties;
use crate::error::{ModelError, ModelResult};
use crate::loads::{ConcentratedLoad, DeckLoadStation, LinearLoad};
use crate::points::PointAttributes;

/// Index of an analysis interval (construction stage)
pub type IntervalIndex = usize;

/// The two support locations bounding the analysis region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportLocations {
    /// Left support (distance from start of segment)
    pub left: f64,
    /// Right support (distance from start of segment)
    pub right: f64,
}

impl SupportLocations {
    /// Create support locations
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Supports set in from each end of a segment of length `length`
    pub fn from_overhangs(length: f64, left_overhang: f64, right_overhang: f64) -> Self {
        Self::new(left_overhang, length - right_overhang)
    }

    /// Distance between supports
    pub fn span(&self) -> f64 {
        self.right - self.left
    }

    /// Check the supports are ordered and lie on the segment `[start, end]`
    pub fn validate(&self, start: f64, end: f64) -> ModelResult<()> {
        if !(self.left.is_finite() && self.right.is_finite()) || self.right <= self.left {
            return Err(ModelError::InvalidSupports {
                left: self.left,
                right: self.right,
            });
        }
        for location in [self.left, self.right] {
            if location < start || end < location {
                return Err(ModelError::SupportOutsideSegment { location, start, end });
            }
        }
        Ok(())
    }
}

/// A cross-section transition reported by the bridge model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMarker {
    /// Upstream identity of the location
    #[serde(default)]
    pub id: Option<u64>,
    /// Position (distance from start of segment)
    pub x: f64,
    /// Transition tags
    pub attributes: PointAttributes,
}

impl TransitionMarker {
    /// Create a marker
    pub fn new(x: f64, attributes: PointAttributes) -> Self {
        Self {
            id: None,
            x,
            attributes,
        }
    }
}

/// What the model builder needs to know about a segment
pub trait SegmentSource {
    /// Total segment length
    fn segment_length(&self) -> f64;

    /// Start and end face positions
    fn end_faces(&self) -> (f64, f64) {
        (0.0, self.segment_length())
    }

    /// Cross-section transitions, ordered by position
    fn section_transitions(&self) -> Vec<TransitionMarker>;

    /// Section properties at `x` during `interval`
    fn section_properties(&self, interval: IntervalIndex, x: f64) -> SectionProperties;

    /// Elastic modulus of the segment concrete during `interval`
    fn elastic_modulus(&self, interval: IntervalIndex) -> f64;

    /// Girder self-weight as consecutive load segments
    fn self_weight_loads(&self) -> Vec<LinearLoad>;

    /// Precast diaphragm loads
    fn diaphragm_loads(&self) -> Vec<ConcentratedLoad> {
        Vec::new()
    }

    /// Loads from closure joints cast against the segment
    fn closure_joint_loads(&self) -> Vec<LinearLoad> {
        Vec::new()
    }

    /// Sampled deck and haunch loads for a staged analysis
    fn deck_load_stations(&self, _interval: IntervalIndex) -> Vec<DeckLoadStation> {
        Vec::new()
    }

    /// Point loads equivalent to the pretension force
    fn equivalent_pretension_loads(&self) -> Vec<ConcentratedLoad> {
        Vec::new()
    }
}

/// In-memory segment description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentData {
    /// Segment length
    pub length: f64,
    /// Cross-section transitions
    #[serde(default)]
    pub transitions: Vec<TransitionMarker>,
    /// Prismatic section properties
    pub section: SectionProperties,
    /// Elastic modulus
    pub modulus: f64,
    /// Self-weight load segments
    #[serde(default)]
    pub self_weight: Vec<LinearLoad>,
    /// Diaphragm loads
    #[serde(default)]
    pub diaphragms: Vec<ConcentratedLoad>,
    /// Closure joint load segments
    #[serde(default)]
    pub closure_joints: Vec<LinearLoad>,
    /// Deck load stations
    #[serde(default)]
    pub deck_stations: Vec<DeckLoadStation>,
    /// Equivalent pretension loads
    #[serde(default)]
    pub pretension: Vec<ConcentratedLoad>,
}

impl SegmentData {
    /// Create a prismatic segment with no loads
    pub fn new(length: f64, section: SectionProperties, modulus: f64) -> Self {
        Self {
            length,
            transitions: Vec::new(),
            section,
            modulus,
            self_weight: Vec::new(),
            diaphragms: Vec::new(),
            closure_joints: Vec::new(),
            deck_stations: Vec::new(),
            pretension: Vec::new(),
        }
    }

    /// Add a cross-section transition
    pub fn with_transition(mut self, marker: TransitionMarker) -> Self {
        self.transitions.push(marker);
        self
    }

    /// Add a self-weight load segment
    pub fn with_self_weight(mut self, load: LinearLoad) -> Self {
        self.self_weight.push(load);
        self
    }

    /// Add a uniform self-weight over the whole segment
    pub fn with_uniform_self_weight(self, w: f64) -> Self {
        let length = self.length;
        self.with_self_weight(LinearLoad::uniform(0.0, length, w))
    }

    /// Add a diaphragm load
    pub fn with_diaphragm(mut self, load: ConcentratedLoad) -> Self {
        self.diaphragms.push(load);
        self
    }

    /// Add a deck load station
    pub fn with_deck_station(mut self, station: DeckLoadStation) -> Self {
        self.deck_stations.push(station);
        self
    }

    /// Add an equivalent pretension load
    pub fn with_pretension(mut self, load: ConcentratedLoad) -> Self {
        self.pretension.push(load);
        self
    }

    /// Parse a segment description from JSON
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Read a segment description from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the description is usable
    pub fn validate(&self) -> ModelResult<()> {
        if !(self.length > 0.0) {
            return Err(ModelError::InvalidGeometry(format!(
                "segment length must be positive, got {}",
                self.length
            )));
        }
        if let Some(marker) = self.transitions.iter().find(|m| m.x < 0.0 || m.x > self.length) {
            return Err(ModelError::InvalidGeometry(format!(
                "transition at {} lies outside the segment",
                marker.x
            )));
        }
        for load in self.self_weight.iter().chain(&self.closure_joints) {
            load.validate()?;
        }
        for load in self.diaphragms.iter().chain(&self.pretension) {
            load.validate()?;
        }
        Ok(())
    }
}

impl SegmentSource for SegmentData {
    fn segment_length(&self) -> f64 {
        self.length
    }

    fn section_transitions(&self) -> Vec<TransitionMarker> {
        let mut transitions = self.transitions.clone();
        transitions.sort_by(|a, b| a.x.total_cmp(&b.x));
        transitions
    }

    fn section_properties(&self, _interval: IntervalIndex, _x: f64) -> SectionProperties {
        self.section
    }

    fn elastic_modulus(&self, _interval: IntervalIndex) -> f64 {
        self.modulus
    }

    fn self_weight_loads(&self) -> Vec<LinearLoad> {
        self.self_weight.clone()
    }

    fn diaphragm_loads(&self) -> Vec<ConcentratedLoad> {
        self.diaphragms.clone()
    }

    fn closure_joint_loads(&self) -> Vec<LinearLoad> {
        self.closure_joints.clone()
    }

    fn deck_load_stations(&self, _interval: IntervalIndex) -> Vec<DeckLoadStation> {
        self.deck_stations.clone()
    }

    fn equivalent_pretension_loads(&self) -> Vec<ConcentratedLoad> {
        self.pretension.clone()
    }
}
