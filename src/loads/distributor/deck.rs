//! Staged deck loads: slab, panel and haunch pad weight sampled along the segment

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::loads::load_case::{LoadCaseId, LC_SLAB, LC_SLAB_PAD};
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

use super::{distribute_linear, LoadDistributor};

/// Deck load intensities sampled at one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeckLoadStation {
    /// Position (distance from start of segment)
    pub x: f64,
    /// Cast slab weight per unit length
    pub slab: f64,
    /// Stay-in-place deck panel weight per unit length
    #[serde(default)]
    pub panel: f64,
    /// Haunch pad weight per unit length
    #[serde(default)]
    pub pad: f64,
}

impl DeckLoadStation {
    /// Create a station
    pub fn new(x: f64, slab: f64, panel: f64, pad: f64) -> Self {
        Self { x, slab, panel, pad }
    }

    /// Intensity of the primary channel (slab plus panels)
    pub fn primary(&self) -> f64 {
        self.slab + self.panel
    }

    fn validate(&self) -> ModelResult<()> {
        if [self.x, self.slab, self.panel, self.pad].iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(ModelError::InvalidLoad(format!("non-finite deck load station {self:?}")))
        }
    }
}

/// Applies deck loads for a staged analysis.
///
/// Consecutive stations bound linear pieces of two channels, the slab/panel
/// load and the haunch pad load, which are split across members together and
/// written to their own load cases. Self-weight is not applied.
#[derive(Debug, Clone, Copy)]
pub struct DeckLoads {
    /// Load case for the slab and panel channel
    pub slab_case: LoadCaseId,
    /// Load case for the pad channel
    pub pad_case: LoadCaseId,
}

impl Default for DeckLoads {
    fn default() -> Self {
        Self {
            slab_case: LC_SLAB,
            pad_case: LC_SLAB_PAD,
        }
    }
}

impl LoadDistributor for DeckLoads {
    fn apply_loads(
        &self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        interval: IntervalIndex,
    ) -> ModelResult<()> {
        let stations = source.deck_load_stations(interval);
        for station in &stations {
            station.validate()?;
        }
        if let Some(pair) = stations.windows(2).find(|pair| pair[1].x < pair[0].x) {
            return Err(ModelError::InvalidLoad(format!(
                "deck load stations out of order at {} and {}",
                pair[0].x, pair[1].x
            )));
        }

        model.loading_mut(self.slab_case);
        model.loading_mut(self.pad_case);
        if stations.len() < 2 {
            log::debug!(
                "Interval {interval}: fewer than two deck load stations, no deck loads applied"
            );
            return Ok(());
        }

        let mut count = 0;
        for pair in stations.windows(2) {
            let (s0, s1) = (&pair[0], &pair[1]);
            let pieces = distribute_linear(
                model,
                s0.x,
                s1.x,
                [s0.primary(), s0.pad],
                [s1.primary(), s1.pad],
            );
            for piece in pieces {
                if piece.w1[0] != 0.0 || piece.w2[0] != 0.0 {
                    model.loading_mut(self.slab_case).add_distributed(
                        piece.member,
                        piece.x1,
                        piece.x2,
                        piece.w1[0],
                        piece.w2[0],
                    );
                    count += 1;
                }
                if piece.w1[1] != 0.0 || piece.w2[1] != 0.0 {
                    model.loading_mut(self.pad_case).add_distributed(
                        piece.member,
                        piece.x1,
                        piece.x2,
                        piece.w1[1],
                        piece.w2[1],
                    );
                    count += 1;
                }
            }
        }
        log::debug!("Interval {interval}: applied {count} deck loads");
        Ok(())
    }
}
