//! Load distributors: map segment loads onto the members of a built model
//!
//! Every distributor shares one algorithm. A load segment is clipped to the
//! modeled region, the members holding its two ends are located, and one
//! piece is emitted per member with intensities interpolated from the
//! unclipped segment ends. Point loads go to the member bracketing them.

mod deck;
mod hauling;
mod pretension;
mod self_weight;

pub use deck::{DeckLoadStation, DeckLoads};
pub use hauling::HaulingLoads;
pub use pretension::PretensionLoads;
pub use self_weight::SelfWeightLoads;

use crate::elements::MemberId;
use crate::error::ModelResult;
use crate::math;
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

use super::distributed::LinearLoad;
use super::load_case::LoadCaseId;
use super::point_load::ConcentratedLoad;

/// Applies one family of loads to an already-built model
pub trait LoadDistributor {
    /// Whether the model should include the end cantilevers, given what the
    /// analysis requested
    fn models_cantilevers(&self, requested: bool) -> bool {
        requested
    }

    /// Add this distributor's loads to `model`
    fn apply_loads(
        &self,
        model: &mut SegmentModel,
        source: &dyn SegmentSource,
        interval: IntervalIndex,
    ) -> ModelResult<()>;
}

/// Part of a load segment lying on one member, for `N` synchronized channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MemberLoadPiece<const N: usize> {
    pub member: MemberId,
    /// Start, measured from the member's start joint
    pub x1: f64,
    /// End, measured from the member's start joint
    pub x2: f64,
    pub w1: [f64; N],
    pub w2: [f64; N],
}

#[derive(Clone, Copy)]
enum Side {
    Start,
    End,
}

/// Member holding `x`. A position on an interior joint belongs to the member
/// starting there when `side` is `Start`, to the member ending there otherwise.
fn member_containing(model: &SegmentModel, x: f64, side: Side) -> Option<MemberId> {
    let tol = model.merge_tolerance();
    (0..model.members().len()).find(|&id| match model.member_span(id) {
        Some((x1, x2)) => match side {
            Side::Start => x1 - tol <= x && x < x2 - tol,
            Side::End => x1 + tol < x && x <= x2 + tol,
        },
        None => false,
    })
}

/// Split the load running linearly from `w_start` at `start` to `w_end` at
/// `end` into per-member pieces, clipped to the modeled region.
///
/// Pieces no longer than the model tolerance are dropped.
pub(crate) fn distribute_linear<const N: usize>(
    model: &SegmentModel,
    start: f64,
    end: f64,
    w_start: [f64; N],
    w_end: [f64; N],
) -> Vec<MemberLoadPiece<N>> {
    let Some((lo, hi)) = model.extent() else {
        return Vec::new();
    };
    let tol = model.merge_tolerance();
    let intensity = |x: f64| -> [f64; N] {
        std::array::from_fn(|k| math::lin_interp(x, start, w_start[k], end, w_end[k]))
    };

    // clip to the modeled region
    let a = start.max(lo);
    let b = end.min(hi);
    if b - a <= tol {
        log::debug!("Dropped load piece [{start}, {end}] outside modeled region [{lo}, {hi}]");
        return Vec::new();
    }

    let (Some(first), Some(last)) = (
        member_containing(model, a, Side::Start),
        member_containing(model, b, Side::End),
    ) else {
        log::warn!("No member found for load piece [{a}, {b}]");
        return Vec::new();
    };

    let mut pieces = Vec::with_capacity((last + 1).saturating_sub(first));
    for member in first..=last {
        let Some((x1, x2)) = model.member_span(member) else {
            continue;
        };
        let pa = a.max(x1);
        let pb = b.min(x2);
        if pb - pa <= tol {
            continue;
        }
        pieces.push(MemberLoadPiece {
            member,
            x1: pa - x1,
            x2: pb - x1,
            w1: intensity(pa),
            w2: intensity(pb),
        });
    }
    pieces
}

/// Member and offset for a point load at `x`, or `None` outside the model
pub(crate) fn locate_point_load(model: &SegmentModel, x: f64) -> Option<(MemberId, f64)> {
    let (lo, hi) = model.extent()?;
    let tol = model.merge_tolerance();
    if x < lo - tol || hi + tol < x {
        return None;
    }
    model.find_member(x.clamp(lo, hi))
}

/// Apply load segments and point loads to `case`, scaling every emitted load
/// by `factor(model, member)`. Returns the number of loads emitted.
pub(crate) fn apply_factored_loads<F>(
    model: &mut SegmentModel,
    case: LoadCaseId,
    segments: &[LinearLoad],
    points: &[ConcentratedLoad],
    factor: F,
) -> ModelResult<usize>
where
    F: Fn(&SegmentModel, MemberId) -> f64,
{
    for load in segments {
        load.validate()?;
    }
    for load in points {
        load.validate()?;
    }

    // the load case exists even when nothing lands on the model
    model.loading_mut(case);
    let mut count = 0;

    for load in segments {
        let pieces = distribute_linear(model, load.start, load.end, [load.w_start], [load.w_end]);
        for piece in pieces {
            let f = factor(model, piece.member);
            model.loading_mut(case).add_distributed(
                piece.member,
                piece.x1,
                piece.x2,
                piece.w1[0] * f,
                piece.w2[0] * f,
            );
            count += 1;
        }
    }

    for load in points {
        match locate_point_load(model, load.x) {
            Some((member, x)) => {
                let f = factor(model, member);
                model.loading_mut(case).add_point(member, x, 0.0, load.p * f, load.m * f);
                count += 1;
            }
            None => log::debug!("Dropped point load at {} outside the modeled region", load.x),
        }
    }

    Ok(count)
}
