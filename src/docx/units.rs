//! Length-unit conversions for the container's drawing schema.

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Largest accepted drawing extent: 20 inches.
pub const MAX_EXTENT_EMU: i64 = 18_288_000;

/// Placeholder extent for degenerate (non-positive) dimensions.
pub const MIN_EXTENT_EMU: i64 = 1_000;

/// Convert a length in points to clamped EMU.
///
/// Each dimension is clamped independently: oversized extents are capped
/// at [`MAX_EXTENT_EMU`] and non-positive ones are raised to
/// [`MIN_EXTENT_EMU`], so the emitted markup never carries a value a
/// consuming application would reject.
pub fn points_to_emu(points: f32) -> i64 {
    let emu = (f64::from(points) * EMU_PER_POINT as f64).round() as i64;
    emu.clamp(MIN_EXTENT_EMU, MAX_EXTENT_EMU)
}

/// Convert a font size in points to the schema's half-point unit.
pub fn points_to_half_points(points: f32) -> u32 {
    (f64::from(points) * 2.0).round().max(0.0) as u32
}
