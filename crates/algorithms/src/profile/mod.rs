//! Scanline profiles of binary masks
//!
//! A [`ScanlineProfile`] summarizes a mask as one [`RowProfile`] per row
//! (span, count, solidity, foreground columns). It is the input of the
//! streak detector and the guide classifier and answers the quantile
//! shape queries used as extracted features.
//!
//! Row classification lives in a separate [`RowTags`] value so the profile
//! stays immutable once built.

mod analysis;
mod quantile;
mod row;
mod scanline;
mod tags;

pub use analysis::{scanline_analysis, ScanlineAnalysis, ScanlineAnalysisParams, ScanlineReport};
pub use quantile::{quantile_bounds, ShapeStats};
pub use row::RowProfile;
pub use scanline::{Position, ProfileSummary, ScanlineProfile};
pub use tags::{RowTag, RowTags};
