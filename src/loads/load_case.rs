//! Loadings: the loads of one load case, grouped for the solver

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;

use super::distributed::DistributedLoad;
use super::point_load::PointLoad;

/// Identifier of a load case
pub type LoadCaseId = i32;

/// Identifier of a load within a loading
pub type LoadId = usize;

/// Load case for girder self-weight
pub const LC_GIRDER: LoadCaseId = 0;
/// Load case for the primary deck channel (slab and panels)
pub const LC_SLAB: LoadCaseId = 1;
/// Load case for the haunch pad channel
pub const LC_SLAB_PAD: LoadCaseId = 2;
/// Load case for equivalent pretension loads
pub const LC_PRETENSION: LoadCaseId = 3;

/// All loads belonging to one load case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loading {
    /// Load case
    pub case: LoadCaseId,
    /// Member distributed loads
    pub distributed: Vec<DistributedLoad>,
    /// Member point loads
    pub point: Vec<PointLoad>,
}

impl Loading {
    /// Create an empty loading
    pub fn new(case: LoadCaseId) -> Self {
        Self {
            case,
            distributed: Vec::new(),
            point: Vec::new(),
        }
    }

    fn next_id(&self) -> LoadId {
        self.distributed.len() + self.point.len()
    }

    /// Add a linearly varying load on `member` between `x1` and `x2`
    pub fn add_distributed(
        &mut self,
        member: MemberId,
        x1: f64,
        x2: f64,
        w1: f64,
        w2: f64,
    ) -> LoadId {
        let id = self.next_id();
        self.distributed.push(DistributedLoad {
            id,
            member,
            x1,
            x2,
            w1,
            w2,
        });
        id
    }

    /// Add a point load on `member` at `x`
    pub fn add_point(&mut self, member: MemberId, x: f64, fx: f64, fy: f64, mz: f64) -> LoadId {
        let id = self.next_id();
        self.point.push(PointLoad {
            id,
            member,
            x,
            fx,
            fy,
            mz,
        });
        id
    }

    /// Check if the loading holds no loads
    pub fn is_empty(&self) -> bool {
        self.distributed.is_empty() && self.point.is_empty()
    }

    /// Total transverse force of all loads in this loading
    pub fn total_transverse_force(&self) -> f64 {
        let distributed: f64 = self.distributed.iter().map(|l| l.total_force()).sum();
        let point: f64 = self.point.iter().map(|l| l.fy).sum();
        distributed + point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_ids_are_shared() {
        let mut loading = Loading::new(LC_GIRDER);
        assert!(loading.is_empty());
        assert_eq!(loading.add_distributed(0, 0.0, 5.0, 1.0, 1.0), 0);
        assert_eq!(loading.add_point(0, 2.0, 0.0, 3.0, 0.0), 1);
        assert_eq!(loading.add_distributed(1, 0.0, 5.0, 1.0, 3.0), 2);
        assert_relative_eq!(loading.total_transverse_force(), 5.0 + 3.0 + 10.0);
    }
}
