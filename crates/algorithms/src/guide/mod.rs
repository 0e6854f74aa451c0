//! Plant guide classification
//!
//! Tags the rows of a scanline profile to find where the support guide ends
//! and the plant begins, and renders the mask without the guide rows.
//!
//! Two passes share the same per-row rules:
//! - [`GuideClassifier::survey`] stops at the first plant-top row and only
//!   decides whether a guide is there at all
//! - [`GuideClassifier::classify`] tags every row and feeds
//!   [`GuideClassifier::clean`]

mod classifier;

pub use classifier::{
    GuideClassification, GuideClassifier, GuideParams, GuideSurvey, SOLID_ROW_SOLIDITY,
    SPARSE_ROW_SOLIDITY,
};
