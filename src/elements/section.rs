//! Section properties and the stiffness shared by every member of a segment model

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::SegmentModel;
use crate::segment::{IntervalIndex, SegmentSource};

/// Gross cross-section properties at a point along the segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Gross area
    pub ag: f64,
    /// Moment of inertia about the horizontal centroidal axis
    pub ixx: f64,
    /// Moment of inertia about the vertical centroidal axis
    pub iyy: f64,
    /// Product of inertia (zero for symmetric sections)
    pub ixy: f64,
}

impl SectionProperties {
    /// Create section properties
    pub fn new(ag: f64, ixx: f64, iyy: f64, ixy: f64) -> Self {
        Self { ag, ixx, iyy, ixy }
    }

    /// Create properties for a doubly symmetric section
    pub fn symmetric(ag: f64, ixx: f64, iyy: f64) -> Self {
        Self::new(ag, ixx, iyy, 0.0)
    }

    /// Solid rectangle `width` wide and `depth` deep
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self::symmetric(
            width * depth,
            width * depth.powi(3) / 12.0,
            depth * width.powi(3) / 12.0,
        )
    }

    /// Moment of inertia for bending in the vertical plane, corrected for
    /// biaxial coupling: (Ixx·Iyy − Ixy²)/Iyy
    pub fn effective_ixx(&self) -> f64 {
        (self.ixx * self.iyy - self.ixy * self.ixy) / self.iyy
    }

    fn validate(&self) -> ModelResult<()> {
        if !(self.ag > 0.0) {
            return Err(ModelError::InvalidSection(format!(
                "area must be positive, got {}",
                self.ag
            )));
        }
        if !(self.iyy > 0.0) || !(self.ixx > 0.0) {
            return Err(ModelError::InvalidSection(format!(
                "moments of inertia must be positive, got Ixx={} Iyy={}",
                self.ixx, self.iyy
            )));
        }
        if !(self.effective_ixx() > 0.0) {
            return Err(ModelError::InvalidSection(format!(
                "product of inertia {} leaves no flexural stiffness",
                self.ixy
            )));
        }
        Ok(())
    }
}

/// Axial and flexural stiffness pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stiffness {
    /// E·Ag
    pub ea: f64,
    /// E·(Ixx·Iyy − Ixy²)/Iyy
    pub ei: f64,
}

impl Stiffness {
    /// Compute the stiffness pair for modulus `e` and `section`
    pub fn from_section(e: f64, section: &SectionProperties) -> ModelResult<Self> {
        if !(e > 0.0) {
            return Err(ModelError::InvalidSection(format!(
                "elastic modulus must be positive, got {e}"
            )));
        }
        section.validate()?;
        Ok(Self {
            ea: e * section.ag,
            ei: e * section.effective_ixx(),
        })
    }
}

/// Evaluate section properties at the segment's mid-span and assign the
/// resulting stiffness to every member of `model`.
///
/// The section is taken as prismatic even where the real one varies.
pub fn apply_section_stiffness(
    model: &mut SegmentModel,
    source: &dyn SegmentSource,
    interval: IntervalIndex,
) -> ModelResult<Stiffness> {
    let (start, end) = source.end_faces();
    let mid_span = (start + end) / 2.0;
    let section = source.section_properties(interval, mid_span);
    let stiffness = Stiffness::from_section(source.elastic_modulus(interval), &section)?;

    for member in model.members_mut() {
        member.ea = stiffness.ea;
        member.ei = stiffness.ei;
    }
    log::debug!(
        "Assigned EA={:.6e} EI={:.6e} to {} members (mid-span at {mid_span})",
        stiffness.ea,
        stiffness.ei,
        model.members().len()
    );
    Ok(stiffness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_stiffness() {
        let section = SectionProperties::symmetric(2.0, 4.0, 1.5);
        let stiffness = Stiffness::from_section(30.0, &section).unwrap();
        assert_relative_eq!(stiffness.ea, 60.0);
        assert_relative_eq!(stiffness.ei, 120.0);
    }

    #[test]
    fn test_product_of_inertia_reduces_ei() {
        let section = SectionProperties::new(2.0, 4.0, 2.0, 1.0);
        let stiffness = Stiffness::from_section(10.0, &section).unwrap();
        // (4*2 - 1)/2 = 3.5
        assert_relative_eq!(stiffness.ei, 35.0);
    }

    #[test]
    fn test_rectangular_section() {
        let section = SectionProperties::rectangular(0.5, 1.0);
        assert_relative_eq!(section.ag, 0.5);
        assert_relative_eq!(section.ixx, 0.5 / 12.0);
        assert_relative_eq!(section.iyy, 0.125 / 12.0);
    }

    #[test]
    fn test_invalid_sections() {
        let unit = SectionProperties::symmetric(1.0, 1.0, 1.0);
        assert!(Stiffness::from_section(0.0, &unit).is_err());
        let flat = SectionProperties::symmetric(1.0, 1.0, 0.0);
        assert!(Stiffness::from_section(1.0, &flat).is_err());
        assert!(Stiffness::from_section(1.0, &SectionProperties::new(1.0, 1.0, 1.0, 1.0)).is_err());
    }
}
