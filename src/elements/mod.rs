//! Structural elements module

mod joint;
mod member;
pub mod section;

pub use joint::{DofReleases, Joint, JointId};
pub use member::{Member, MemberId};
pub use section::{apply_section_stiffness, SectionProperties, Stiffness};
