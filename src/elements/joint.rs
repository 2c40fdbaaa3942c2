//! Joint element - a discrete analysis node on the segment axis

use serde::{Deserialize, Serialize};

/// Index of a joint in the model's joint arena
pub type JointId = usize;

/// Degrees of freedom released at a supported joint.
///
/// A support restrains all three planar DOFs (axial, transverse, rotation)
/// except the ones released here. Transverse translation is never released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DofReleases {
    /// Axial (Fx) translation is free
    pub axial: bool,
    /// Rotation (Mz) is free
    pub rotation: bool,
}

impl DofReleases {
    /// No released DOFs (fully fixed when supported)
    pub fn none() -> Self {
        Self::default()
    }

    /// Pinned-roller: axial translation and rotation released
    pub fn roller() -> Self {
        Self {
            axial: true,
            rotation: true,
        }
    }

    /// Pin: rotation released only
    pub fn pin() -> Self {
        Self {
            axial: false,
            rotation: true,
        }
    }
}

/// A joint of the 2D beam model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joint {
    /// Arena index
    pub id: JointId,
    /// Position measured from the start of the segment
    pub x: f64,
    /// Joint carries a support boundary condition
    pub support: bool,
    /// Released DOFs (only meaningful when `support` is set)
    pub releases: DofReleases,
}

impl Joint {
    /// Create a new unsupported joint
    pub fn new(id: JointId, x: f64) -> Self {
        Self {
            id,
            x,
            support: false,
            releases: DofReleases::none(),
        }
    }
}
