//! Distributed loads: physical load segments and their per-member pieces

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;
use crate::error::{ModelError, ModelResult};
use crate::math;

use super::load_case::LoadId;

/// A piecewise-linear load segment in segment coordinates.
///
/// Self-weight, closure-joint and deck loads are described as runs of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearLoad {
    /// Start position (distance from start of segment)
    pub start: f64,
    /// End position (distance from start of segment)
    pub end: f64,
    /// Intensity at `start`
    pub w_start: f64,
    /// Intensity at `end`
    pub w_end: f64,
}

impl LinearLoad {
    /// Create a new load segment
    pub fn new(start: f64, end: f64, w_start: f64, w_end: f64) -> Self {
        Self {
            start,
            end,
            w_start,
            w_end,
        }
    }

    /// Create a uniform load segment
    pub fn uniform(start: f64, end: f64, w: f64) -> Self {
        Self::new(start, end, w, w)
    }

    /// Intensity at `x`, extrapolating linearly outside the segment
    pub fn intensity_at(&self, x: f64) -> f64 {
        math::lin_interp(x, self.start, self.w_start, self.end, self.w_end)
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Total force from this load
    pub fn total_force(&self) -> f64 {
        math::trapezoid_area(self.w_start, self.w_end, self.length())
    }

    /// Total force from the part of this load lying within `[lo, hi]`
    pub fn total_force_within(&self, lo: f64, hi: f64) -> f64 {
        let a = self.start.max(lo);
        let b = self.end.min(hi);
        if b <= a {
            return 0.0;
        }
        math::trapezoid_area(self.intensity_at(a), self.intensity_at(b), b - a)
    }

    pub(crate) fn validate(&self) -> ModelResult<()> {
        let values = [self.start, self.end, self.w_start, self.w_end];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidLoad(format!("non-finite load segment {self:?}")));
        }
        if self.end < self.start {
            return Err(ModelError::InvalidLoad(format!(
                "load segment ends at {} before it starts at {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// A linearly varying transverse load on one member, as handed to the solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load identifier within its loading
    pub id: LoadId,
    /// Loaded member
    pub member: MemberId,
    /// Start position (distance from the member's start joint)
    pub x1: f64,
    /// End position (distance from the member's start joint)
    pub x2: f64,
    /// Start magnitude
    pub w1: f64,
    /// End magnitude
    pub w2: f64,
}

impl DistributedLoad {
    /// Loaded length
    pub fn length(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        math::trapezoid_area(self.w1, self.w2, self.length())
    }
}
