//! Output-container emission.
//!
//! Turns the reconstructed block list into a strictly valid
//! word-processing package: a ZIP archive of cross-referenced XML parts
//! plus the embedded media files.

mod package;
mod units;
mod xml;

pub use package::PackageAssembler;
pub use units::{
    points_to_emu, points_to_half_points, EMU_PER_POINT, MAX_EXTENT_EMU, MIN_EXTENT_EMU,
};
pub use xml::{escape_text, XmlWriter};
