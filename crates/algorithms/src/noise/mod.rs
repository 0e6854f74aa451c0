//! Noise-line stripping and guide removal
//!
//! - [`NoiseLineStripper`]: iterative removal of near-vertical segments
//!   above the plant top, driven by an [`EdgeDetector`] and a
//!   [`SegmentDetector`]
//! - [`MorphologicalEdges`] / [`ProgressiveHough`]: the default
//!   collaborators
//! - [`remove_guide`]: guide survey, stripping, classification and cleanup
//!   chained on an owned copy of the mask

mod collaborators;
mod edges;
mod hough;
mod removal;
mod stripper;

pub use collaborators::{EdgeDetector, Segment, SegmentDetector, SegmentSearch};
pub use edges::{EdgeKind, MorphologicalEdges};
pub use hough::ProgressiveHough;
pub use removal::{remove_guide, GuideRemoval, GuideRemovalOutput, GuideRemovalParams};
pub use stripper::{
    strip_noise_lines, NoiseLineStripper, NoiseStripping, StripParams, StripReport, StrippedMask,
    Termination,
};
