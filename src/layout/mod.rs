//! Layout reconstruction: raw positioned items into paragraph blocks.

mod reconstruct;

pub use reconstruct::{
    merge_adjacent_runs, reconstruct, sort_reading_order, MERGE_BASELINE_TOLERANCE,
    MERGE_SIZE_TOLERANCE, PARAGRAPH_BAND, SAME_ROW_TOLERANCE, SPACE_GAP_FACTOR,
};
