//! Discretization points: collecting candidate joint locations for a segment
//! and merging the ones that nearly coincide.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::segment::{SegmentSource, SupportLocations};

/// Attribute tags carried by a discretization point.
///
/// Tags combine with `|`. `SUPPORT`, `END_FACE` and the two face markers are
/// protected: a merge may move a protected point but never drops its tags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointAttributes(u16);

impl PointAttributes {
    pub const NONE: Self = Self(0);
    /// Interior cross-section transition
    pub const SECTION_CHANGE: Self = Self(1 << 0);
    /// Left face of a cross-section transition
    pub const LEFT_FACE: Self = Self(1 << 1);
    /// Right face of a cross-section transition
    pub const RIGHT_FACE: Self = Self(1 << 2);
    /// Start or end face of the segment
    pub const END_FACE: Self = Self(1 << 3);
    /// Support location
    pub const SUPPORT: Self = Self(1 << 4);

    /// Every transition marker
    pub const TRANSITIONS: Self =
        Self(Self::SECTION_CHANGE.0 | Self::LEFT_FACE.0 | Self::RIGHT_FACE.0);
    /// Tags a merge must preserve
    pub const PROTECTED: Self =
        Self(Self::LEFT_FACE.0 | Self::RIGHT_FACE.0 | Self::END_FACE.0 | Self::SUPPORT.0);

    const FACES: Self = Self(Self::LEFT_FACE.0 | Self::RIGHT_FACE.0);
    const BOUNDARY: Self = Self(Self::END_FACE.0 | Self::SUPPORT.0);

    /// Check if every tag of `other` is present
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if any tag of `other` is present
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if any protected tag is present
    pub fn is_protected(self) -> bool {
        self.intersects(Self::PROTECTED)
    }

    /// Check if the only protected tags are transition face markers
    fn is_face_marker(self) -> bool {
        self.intersects(Self::FACES) && !self.intersects(Self::BOUNDARY)
    }
}

impl BitOr for PointAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PointAttributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for PointAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PointAttributes, &str); 5] = [
            (PointAttributes::SECTION_CHANGE, "SECTION_CHANGE"),
            (PointAttributes::LEFT_FACE, "LEFT_FACE"),
            (PointAttributes::RIGHT_FACE, "RIGHT_FACE"),
            (PointAttributes::END_FACE, "END_FACE"),
            (PointAttributes::SUPPORT, "SUPPORT"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(tag, _)| self.contains(*tag))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

/// A candidate joint location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscretizationPoint {
    /// Upstream identity, when the point came from a tracked location
    pub id: Option<u64>,
    /// Position (distance from start of segment)
    pub x: f64,
    /// Attribute tags
    pub attributes: PointAttributes,
}

impl DiscretizationPoint {
    /// Create an anonymous point
    pub fn new(x: f64, attributes: PointAttributes) -> Self {
        Self {
            id: None,
            x,
            attributes,
        }
    }

    /// Attach an upstream identity
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check if the point is tagged as a support
    pub fn is_support(&self) -> bool {
        self.attributes.contains(PointAttributes::SUPPORT)
    }

    fn absorb(mut self, other: &DiscretizationPoint) -> Self {
        self.attributes |= other.attributes;
        self
    }
}

/// Collect the candidate joint locations for a segment, sorted by position.
///
/// Transition markers are kept when they carry any tag in `filter`. The two
/// end faces and both supports are always present; a point landing exactly on
/// an existing one adds its tags there instead of duplicating it.
pub fn collect_points(
    source: &dyn SegmentSource,
    filter: PointAttributes,
    supports: SupportLocations,
) -> Vec<DiscretizationPoint> {
    let mut points: Vec<DiscretizationPoint> = source
        .section_transitions()
        .into_iter()
        .filter(|marker| marker.attributes.intersects(filter))
        .map(|marker| DiscretizationPoint {
            id: marker.id,
            x: marker.x,
            attributes: marker.attributes,
        })
        .collect();

    let (start, end) = source.end_faces();
    insert_unique(&mut points, DiscretizationPoint::new(start, PointAttributes::END_FACE));
    insert_unique(&mut points, DiscretizationPoint::new(end, PointAttributes::END_FACE));
    insert_unique(&mut points, DiscretizationPoint::new(supports.left, PointAttributes::SUPPORT));
    insert_unique(&mut points, DiscretizationPoint::new(supports.right, PointAttributes::SUPPORT));

    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    log::trace!("Collected {} discretization points", points.len());
    points
}

fn insert_unique(points: &mut Vec<DiscretizationPoint>, point: DiscretizationPoint) {
    match points.iter_mut().find(|p| p.x == point.x) {
        Some(existing) => existing.attributes |= point.attributes,
        None => points.push(point),
    }
}

/// Merge tolerance for a sorted point list: its span times `ratio`
pub fn merge_tolerance(points: &[DiscretizationPoint], ratio: f64) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => (last.x - first.x) * ratio,
        _ => 0.0,
    }
}

/// Merge adjacent points closer than `tolerance`.
///
/// The scan restarts after every merge, which is quadratic in the number of
/// points. Segments carry a few dozen points at most, so this is accepted.
pub fn deduplicate(
    mut points: Vec<DiscretizationPoint>,
    tolerance: f64,
) -> Vec<DiscretizationPoint> {
    'scan: loop {
        for i in 1..points.len() {
            if points[i].x - points[i - 1].x >= tolerance {
                continue;
            }
            if let Some(merged) = merge_pair(&points[i - 1], &points[i]) {
                log::trace!(
                    "Merged points at {} ({:?}) and {} ({:?}) into {}",
                    points[i - 1].x,
                    points[i - 1].attributes,
                    points[i].x,
                    points[i].attributes,
                    merged.x
                );
                points[i - 1] = merged;
                points.remove(i);
                continue 'scan;
            }
        }
        break;
    }

    debug_assert!(points
        .windows(2)
        .all(|w| w[0].x < w[1].x || (w[0].is_support() && w[1].is_support())));
    points
}

/// Merge two near-coincident points, or `None` when both are supports.
fn merge_pair(a: &DiscretizationPoint, b: &DiscretizationPoint) -> Option<DiscretizationPoint> {
    // same upstream location reported twice
    if a.id.is_some() && a.id == b.id {
        return Some(a.absorb(b));
    }

    if !b.attributes.is_protected() {
        return Some(a.absorb(b));
    }
    if !a.attributes.is_protected() {
        return Some(b.absorb(a));
    }

    if a.attributes.is_face_marker() && b.attributes.is_face_marker() {
        return Some(a.absorb(b));
    }

    // Both protected and incompatible. A support keeps its position, then an
    // end face, then the left point; tags are always unioned.
    if a.is_support() && b.is_support() {
        log::warn!("Supports at {} and {} are closer than the merge tolerance", a.x, b.x);
        return None;
    }
    let keep_b = b.is_support()
        || (!a.is_support()
            && b.attributes.contains(PointAttributes::END_FACE)
            && !a.attributes.contains(PointAttributes::END_FACE));
    if keep_b {
        Some(b.absorb(a))
    } else {
        Some(a.absorb(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, attributes: PointAttributes) -> DiscretizationPoint {
        DiscretizationPoint::new(x, attributes)
    }

    #[test]
    fn test_attribute_ops() {
        let tags = PointAttributes::SUPPORT | PointAttributes::END_FACE;
        assert!(tags.contains(PointAttributes::SUPPORT));
        assert!(!tags.contains(PointAttributes::SECTION_CHANGE));
        assert!(tags.is_protected());
        assert!(!PointAttributes::SECTION_CHANGE.is_protected());
        assert_eq!(format!("{:?}", tags), "END_FACE | SUPPORT");
        assert_eq!(format!("{:?}", PointAttributes::NONE), "NONE");
    }

    #[test]
    fn test_unprotected_point_folds_into_support() {
        let points = vec![
            point(0.0, PointAttributes::END_FACE),
            point(5.0, PointAttributes::SUPPORT),
            point(5.0005, PointAttributes::SECTION_CHANGE),
            point(100.0, PointAttributes::END_FACE),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].x, 5.0);
        assert!(merged[1].is_support());
        assert!(merged[1].attributes.contains(PointAttributes::SECTION_CHANGE));
    }

    #[test]
    fn test_support_keeps_position_over_end_face() {
        let points = vec![
            point(0.0, PointAttributes::END_FACE),
            point(0.004, PointAttributes::SUPPORT),
            point(100.0, PointAttributes::END_FACE | PointAttributes::SUPPORT),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].x, 0.004);
        let tags = PointAttributes::END_FACE | PointAttributes::SUPPORT;
        assert!(merged[0].attributes.contains(tags));
    }

    #[test]
    fn test_end_face_keeps_position_over_face_marker() {
        let points = vec![
            point(0.0, PointAttributes::END_FACE),
            point(0.004, PointAttributes::LEFT_FACE),
            point(99.996, PointAttributes::RIGHT_FACE),
            point(100.0, PointAttributes::END_FACE),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].x, 0.0);
        let tags = PointAttributes::END_FACE | PointAttributes::LEFT_FACE;
        assert!(merged[0].attributes.contains(tags));
        // end face on the right of the pair
        assert_eq!(merged[1].x, 100.0);
        let tags = PointAttributes::END_FACE | PointAttributes::RIGHT_FACE;
        assert!(merged[1].attributes.contains(tags));
    }

    #[test]
    fn test_face_markers_merge() {
        let points = vec![
            point(40.0, PointAttributes::LEFT_FACE),
            point(40.001, PointAttributes::RIGHT_FACE),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 1);
        let tags = PointAttributes::LEFT_FACE | PointAttributes::RIGHT_FACE;
        assert!(merged[0].attributes.contains(tags));
    }

    #[test]
    fn test_same_identity_dropped() {
        let points = vec![
            point(10.0, PointAttributes::LEFT_FACE).with_id(7),
            point(10.002, PointAttributes::LEFT_FACE).with_id(7),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, Some(7));
        assert_eq!(merged[0].x, 10.0);
    }

    #[test]
    fn test_supports_never_merge_with_each_other() {
        let points = vec![
            point(5.0, PointAttributes::SUPPORT),
            point(5.001, PointAttributes::SUPPORT),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_chain_of_close_points() {
        let points = vec![
            point(0.0, PointAttributes::END_FACE),
            point(0.003, PointAttributes::SECTION_CHANGE),
            point(0.006, PointAttributes::SECTION_CHANGE),
            point(0.009, PointAttributes::SECTION_CHANGE),
            point(50.0, PointAttributes::SUPPORT),
        ];
        let merged = deduplicate(points, 0.01);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].x, 0.0);
        let tags = PointAttributes::END_FACE | PointAttributes::SECTION_CHANGE;
        assert!(merged[0].attributes.contains(tags));
    }

    #[test]
    fn test_merge_tolerance() {
        let points = vec![
            point(2.0, PointAttributes::END_FACE),
            point(102.0, PointAttributes::END_FACE),
        ];
        assert!((merge_tolerance(&points, 1.0e-4) - 0.01).abs() < 1e-12);
        assert_eq!(merge_tolerance(&[], 1.0e-4), 0.0);
    }
}
