//! Per-row guide classification
//!
//! Plants photographed in a light barrier are tied to a thin mechanical
//! guide stick. Seen from the top of the mask downwards, the guide shows up
//! as a run of narrow rows until the plant widens the rows out. Each row is
//! labelled from its span and solidity, first matching rule wins:
//!
//! 1. `no_pixels`: the row is empty
//! 2. `stop_checking`: already stopped, the investigation window is used up,
//!    `span >= investigate_upper_bound` with solidity above 0.7, or
//!    `span >= keep_and_stop_too_wide`
//! 3. `plant_and_guide` / `plant_start`: `investigate_lower_bound < span <
//!    investigate_upper_bound`, split on solidity 0.4
//! 4. `to_small`: `span < delete_too_narrow`
//! 5. `unknown`
//!
//! `stop_checking` is sticky: every later non-empty row gets it too.

use phenomask_core::raster::Mask;
use phenomask_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::profile::{RowProfile, RowTag, RowTags, ScanlineProfile};

/// Solidity above which a wide row is taken as plant body
pub const SOLID_ROW_SOLIDITY: f64 = 0.7;

/// Solidity below which an investigated row still holds guide pixels
pub const SPARSE_ROW_SOLIDITY: f64 = 0.4;

/// Width thresholds of the guide classifier, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideParams {
    /// Rows narrower than this are guide only
    pub delete_too_narrow: usize,
    /// Lower bound (exclusive) of the investigated span range
    pub investigate_lower_bound: usize,
    /// Upper bound (exclusive) of the investigated span range
    pub investigate_upper_bound: usize,
    /// Rows at least this wide are plant, and stop the search
    pub keep_and_stop_too_wide: usize,
    /// Rows examined from the profile top before the search gives up.
    ///
    /// A heuristic: a guide taller than this is not looked for.
    pub investigation_window: usize,
}

impl Default for GuideParams {
    fn default() -> Self {
        Self {
            delete_too_narrow: 10,
            investigate_lower_bound: 10,
            investigate_upper_bound: 40,
            keep_and_stop_too_wide: 60,
            investigation_window: 100,
        }
    }
}

impl GuideParams {
    pub fn validate(&self) -> Result<()> {
        if self.investigation_window == 0 {
            return Err(Error::InvalidParameter {
                name: "investigation_window",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.investigate_lower_bound > self.investigate_upper_bound {
            return Err(Error::InvalidParameter {
                name: "investigate_lower_bound",
                value: self.investigate_lower_bound.to_string(),
                reason: format!(
                    "must not exceed investigate_upper_bound ({})",
                    self.investigate_upper_bound
                ),
            });
        }
        Ok(())
    }
}

/// Running state of one top-to-bottom scan
#[derive(Debug, Default)]
struct ScanState {
    stopped: bool,
    rows_examined: usize,
}

fn classify_row(row: &RowProfile, params: &GuideParams, state: &mut ScanState) -> RowTag {
    let span = row.span();
    let solidity = row.solidity();

    let tag = if span == 0 {
        RowTag::NoPixels
    } else if state.stopped
        || state.rows_examined >= params.investigation_window
        || (span >= params.investigate_upper_bound && solidity > SOLID_ROW_SOLIDITY)
        || span >= params.keep_and_stop_too_wide
    {
        state.stopped = true;
        RowTag::StopChecking
    } else if params.investigate_lower_bound < span && span < params.investigate_upper_bound {
        if solidity < SPARSE_ROW_SOLIDITY {
            RowTag::PlantAndGuide
        } else {
            RowTag::PlantStart
        }
    } else if span < params.delete_too_narrow {
        RowTag::TooSmall
    } else {
        RowTag::Unknown
    };

    state.rows_examined += 1;
    tag
}

fn marks_plant_top(tag: &RowTag) -> bool {
    matches!(tag, RowTag::StopChecking | RowTag::PlantAndGuide)
}

fn keeps_pixels(tag: &RowTag) -> bool {
    matches!(
        tag,
        RowTag::StopChecking | RowTag::PlantAndGuide | RowTag::PlantStart | RowTag::Unknown
    )
}

/// Result of a full classification pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideClassification {
    pub tags: RowTags,
    /// First row tagged `stop_checking` or `plant_and_guide`
    pub plant_top: Option<usize>,
}

/// Result of the coarse survey pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideSurvey {
    /// Narrow rows above the plant top are tagged [`RowTag::Guide`], the
    /// rest stay [`RowTag::None`]
    pub tags: RowTags,
    pub plant_top: Option<usize>,
}

impl GuideSurvey {
    /// Absolute indices of the rows taken for guide
    pub fn guide_rows(&self) -> Vec<usize> {
        self.tags
            .iter()
            .filter(|(_, tag)| **tag == RowTag::Guide)
            .map(|(row, _)| row)
            .collect()
    }

    pub fn guide_present(&self) -> bool {
        self.tags.count(&RowTag::Guide) > 0
    }
}

/// Locates the end of the plant guide in a scanline profile
#[derive(Debug, Clone, Default)]
pub struct GuideClassifier {
    params: GuideParams,
}

impl GuideClassifier {
    pub fn new(params: GuideParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GuideParams {
        &self.params
    }

    /// Tag every profiled row and report the plant top
    pub fn classify(&self, profile: &ScanlineProfile<'_>) -> Result<GuideClassification> {
        let mut tags = profile.new_tags();
        let mut state = ScanState::default();
        let mut plant_top = None;

        for row in profile.rows() {
            let tag = classify_row(row, &self.params, &mut state);
            if plant_top.is_none() && marks_plant_top(&tag) {
                plant_top = Some(row.row_index());
            }
            tags.set(row.row_index(), tag)?;
        }

        tracing::info!(
            plant_top = ?plant_top,
            rows = profile.len(),
            too_small = tags.count(&RowTag::TooSmall),
            "guide classification done"
        );

        Ok(GuideClassification { tags, plant_top })
    }

    /// Walk down to the first plant-top row only, noting the narrow rows
    /// passed on the way
    pub fn survey(&self, profile: &ScanlineProfile<'_>) -> Result<GuideSurvey> {
        let mut tags = profile.new_tags();
        let mut state = ScanState::default();
        let mut plant_top = None;

        for row in profile.rows() {
            let tag = classify_row(row, &self.params, &mut state);
            if marks_plant_top(&tag) {
                plant_top = Some(row.row_index());
                break;
            }
            if tag == RowTag::TooSmall {
                tags.set(row.row_index(), RowTag::Guide)?;
            }
        }

        Ok(GuideSurvey { tags, plant_top })
    }

    /// Mask keeping the pixels of rows whose tag marks plant tissue
    pub fn clean(&self, profile: &ScanlineProfile<'_>, tags: &RowTags) -> Mask {
        let mut out = profile.mask().like(0);
        let data = out.data_mut();
        for row in profile.rows() {
            if tags.get(row.row_index()).is_some_and(keeps_pixels) {
                for &col in row.positions() {
                    data[(row.row_index(), col)] = Mask::FOREGROUND;
                }
            }
        }
        out
    }
}
