//! Geometric resize engine and region subdivision (pure).

pub mod regions;
pub mod resize;

pub use regions::{compose, frame_of, split_frame, to_cells, Composition, LeafRegion, Region, SplitRegion};
pub use resize::{
    collapse_survivor, pending_ratio, pointer_to_ratio, snap, Frame, ResizeFrame, ResizeSettings,
};
