//! Unit load cases for influence lines
//!
//! For each mapped point of interest a unit transverse force and a unit
//! moment are placed in load cases of their own. Their ids count down from a
//! negative base so they never collide with the named load cases.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::loads::LoadCaseId;
use crate::model::SegmentModel;
use crate::poi::{ExternalPoiId, PoiMap};

/// First unit load case id
pub const UNIT_LOAD_CASE_BASE: LoadCaseId = -1;

/// Load cases created for one point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLoadCases {
    /// Point of interest the unit loads are placed at
    pub poi: ExternalPoiId,
    /// Load case holding the unit transverse force
    pub force: LoadCaseId,
    /// Load case holding the unit moment
    pub moment: LoadCaseId,
}

/// Add a unit force case and a unit moment case for every POI in `poi_map`.
///
/// POIs are visited in id order; the first gets `base` and `base - 1`, the
/// next `base - 2` and `base - 3`, and so on. A POI sitting on an interior
/// support is loaded at its first reference.
pub fn add_unit_load_cases(
    model: &mut SegmentModel,
    poi_map: &PoiMap,
    base: LoadCaseId,
) -> ModelResult<Vec<UnitLoadCases>> {
    if base >= 0 {
        return Err(ModelError::InvalidInput(format!(
            "unit load case ids must be negative, got base {base}"
        )));
    }

    let mut cases = Vec::with_capacity(poi_map.len());
    let mut next = base;
    for (poi, refs) in poi_map.iter() {
        let reference = refs
            .first()
            .and_then(|&id| model.poi(id).copied())
            .ok_or(ModelError::PoiNotPlaced(poi))?;

        let force = next;
        let moment = next - 1;
        next -= 2;
        if model.loading(force).is_some() || model.loading(moment).is_some() {
            return Err(ModelError::InvalidLoad(format!(
                "load case {force} or {moment} already exists"
            )));
        }

        model
            .loading_mut(force)
            .add_point(reference.member, reference.offset, 0.0, 1.0, 0.0);
        model
            .loading_mut(moment)
            .add_point(reference.member, reference.offset, 0.0, 0.0, 1.0);
        cases.push(UnitLoadCases { poi, force, moment });
    }

    log::debug!("Added {} unit load cases", cases.len() * 2);
    Ok(cases)
}
