//! Point loads: concentrated loads in segment coordinates and on members

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;
use crate::error::{ModelError, ModelResult};

use super::load_case::LoadId;

/// A concentrated load at a position along the segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedLoad {
    /// Position (distance from start of segment)
    pub x: f64,
    /// Transverse force
    pub p: f64,
    /// Concentrated moment
    #[serde(default)]
    pub m: f64,
}

impl ConcentratedLoad {
    /// Create a transverse force
    pub fn force(x: f64, p: f64) -> Self {
        Self { x, p, m: 0.0 }
    }

    /// Create a force with an accompanying moment
    pub fn with_moment(x: f64, p: f64, m: f64) -> Self {
        Self { x, p, m }
    }

    pub(crate) fn validate(&self) -> ModelResult<()> {
        if !(self.x.is_finite() && self.p.is_finite() && self.m.is_finite()) {
            return Err(ModelError::InvalidLoad(format!("non-finite point load {self:?}")));
        }
        Ok(())
    }
}

/// A concentrated load on a member, as handed to the solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load identifier within its loading
    pub id: LoadId,
    /// Loaded member
    pub member: MemberId,
    /// Distance from the member's start joint
    pub x: f64,
    /// Axial force
    pub fx: f64,
    /// Transverse force
    pub fy: f64,
    /// Moment
    pub mz: f64,
}
