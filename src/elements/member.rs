//! Member element - prismatic beam between two consecutive joints

use serde::{Deserialize, Serialize};

use super::joint::JointId;

/// Index of a member in the model's member arena
pub type MemberId = usize;

/// A 2D beam member with uniform stiffness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Arena index
    pub id: MemberId,
    /// Start joint (lower position)
    pub start_joint: JointId,
    /// End joint (higher position)
    pub end_joint: JointId,
    /// Axial stiffness E·A
    pub ea: f64,
    /// Flexural stiffness E·I
    pub ei: f64,
}

impl Member {
    /// Create a member without stiffness; the section evaluator assigns it later
    pub fn new(id: MemberId, start_joint: JointId, end_joint: JointId) -> Self {
        Self {
            id,
            start_joint,
            end_joint,
            ea: 0.0,
            ei: 0.0,
        }
    }

    /// Check if stiffness has been assigned
    pub fn has_stiffness(&self) -> bool {
        self.ea > 0.0 && self.ei > 0.0
    }
}
