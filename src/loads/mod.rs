//! Load types, loadings and the distributors that place loads on a model

mod distributed;
pub mod distributor;
mod load_case;
mod point_load;

pub use distributed::{DistributedLoad, LinearLoad};
pub use distributor::{
    DeckLoadStation, DeckLoads, HaulingLoads, LoadDistributor, PretensionLoads, SelfWeightLoads,
};
pub use load_case::{LoadCaseId, LoadId, Loading, LC_GIRDER, LC_PRETENSION, LC_SLAB, LC_SLAB_PAD};
pub use point_load::{ConcentratedLoad, PointLoad};
