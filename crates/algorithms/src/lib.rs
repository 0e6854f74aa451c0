//! # phenomask algorithms
//!
//! Row-profile analysis and cleanup of binary plant masks.
//!
//! ## Available Algorithm Categories
//!
//! - **profile**: Scanline profiles, quantile partition, shape statistics
//! - **lines**: Isolated horizontal streak detection and removal
//! - **guide**: Plant-guide classification and plant-top estimate
//! - **noise**: Near-vertical noise-line stripping, guide removal
//! - **morphology**: Binary erosion, dilation, gradient

pub mod guide;
pub mod lines;
pub mod morphology;
pub mod noise;
pub mod profile;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::guide::{GuideClassification, GuideClassifier, GuideParams, GuideSurvey};
    pub use crate::lines::{
        erase_isolated_lines, HorizontalLine, IsolatedLineDetector, IsolatedLineParams,
        IsolatedLines,
    };
    pub use crate::morphology::{
        dilate, erode, gradient, inner_gradient, Dilate, Erode, Gradient, StructuringElement,
    };
    pub use crate::noise::{
        remove_guide, strip_noise_lines, EdgeDetector, GuideRemoval, GuideRemovalParams,
        MorphologicalEdges, NoiseLineStripper, NoiseStripping, ProgressiveHough, Segment,
        SegmentDetector, SegmentSearch, StripParams, StripReport, Termination,
    };
    pub use crate::profile::{
        scanline_analysis, Position, RowProfile, RowTag, RowTags, ScanlineAnalysis,
        ScanlineProfile, ShapeStats,
    };
    pub use phenomask_core::prelude::*;
}
