//! Guide removal: survey, strip, classify, clean

use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::collaborators::{EdgeDetector, SegmentDetector};
use super::edges::MorphologicalEdges;
use super::hough::ProgressiveHough;
use super::stripper::{NoiseLineStripper, StripParams, StripReport};
use crate::guide::{GuideClassifier, GuideParams};
use crate::profile::{RowTags, ScanlineProfile};

/// Parameters for guide removal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideRemovalParams {
    pub guide: GuideParams,
    /// `plant_top_row` is replaced by the survey's estimate when it has one
    pub strip: StripParams,
    pub edges: MorphologicalEdges,
    pub hough: ProgressiveHough,
}

/// Mask without its guide, and how it was found
#[derive(Debug, Clone, PartialEq)]
pub struct GuideRemovalOutput {
    pub mask: Mask,
    pub plant_top: Option<usize>,
    /// Full-pass tags of the stripped mask, or survey tags when no guide
    /// was found
    pub tags: RowTags,
    /// `None` when no guide was found and nothing was stripped
    pub strip: Option<StripReport>,
}

/// Guide removal with the default collaborators
#[derive(Debug, Clone, Default)]
pub struct GuideRemoval;

impl Algorithm for GuideRemoval {
    type Input = Mask;
    type Output = GuideRemovalOutput;
    type Params = GuideRemovalParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GuideRemoval"
    }

    fn description(&self) -> &'static str {
        "Remove the plant support guide and the noise lines above the plant"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        remove_guide(&input, &params, &params.edges, &params.hough)
    }
}

/// Remove the support guide from `mask`.
///
/// The survey pass decides whether a guide is there and estimates the plant
/// top. If so, near-vertical noise lines above that row are stripped from a
/// copy of the mask, the copy is profiled again and only the rows the full
/// classification keeps are rendered.
pub fn remove_guide<E, S>(
    mask: &Mask,
    params: &GuideRemovalParams,
    edges: &E,
    segments: &S,
) -> Result<GuideRemovalOutput>
where
    E: EdgeDetector + ?Sized,
    S: SegmentDetector + ?Sized,
{
    let classifier = GuideClassifier::new(params.guide.clone())?;
    let survey = classifier.survey(&ScanlineProfile::new(mask))?;

    if !survey.guide_present() {
        tracing::info!("no guide found, mask left as is");
        return Ok(GuideRemovalOutput {
            mask: mask.clone(),
            plant_top: survey.plant_top,
            tags: survey.tags,
            strip: None,
        });
    }

    let strip_params = StripParams {
        plant_top_row: survey.plant_top.or(params.strip.plant_top_row),
        ..params.strip.clone()
    };
    let stripper = NoiseLineStripper::new(strip_params)?;

    let mut working = mask.clone();
    let report = stripper.strip(&mut working, edges, segments)?;

    let profile = ScanlineProfile::new(&working);
    let classification = classifier.classify(&profile)?;
    let cleaned = classifier.clean(&profile, &classification.tags);

    Ok(GuideRemovalOutput {
        mask: cleaned,
        plant_top: classification.plant_top,
        tags: classification.tags,
        strip: Some(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{Segment, SegmentSearch, Termination};
    use crate::profile::RowTag;

    struct NoSegments;

    impl SegmentDetector for NoSegments {
        fn detect_segments(&self, _: &Mask, _: &SegmentSearch) -> Result<Vec<Segment>> {
            Ok(Vec::new())
        }
    }

    /// Thin guide above a wide plant
    fn guided_plant() -> Mask {
        let mut mask = Mask::new(40, 80);
        for r in 2..20 {
            mask.set(r, 40, 255).unwrap();
            mask.set(r, 41, 255).unwrap();
        }
        for r in 20..35 {
            for c in 5..75 {
                mask.set(r, c, 255).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_guide_rows_dropped() {
        let mask = guided_plant();
        let out = remove_guide(
            &mask,
            &GuideRemovalParams::default(),
            &MorphologicalEdges::default(),
            &NoSegments,
        )
        .unwrap();

        assert_eq!(out.plant_top, Some(20));
        assert_eq!(out.mask.foreground_count(), 15 * 70);
        assert_eq!(out.tags.get(5), Some(&RowTag::TooSmall));
        let report = out.strip.unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.termination, Termination::Stable);
    }

    #[test]
    fn test_without_guide_mask_unchanged() {
        let mut mask = Mask::new(20, 80);
        for r in 5..15 {
            for c in 5..75 {
                mask.set(r, c, 255).unwrap();
            }
        }
        let out = GuideRemoval.execute_default(mask.clone()).unwrap();
        assert_eq!(out.mask, mask);
        assert_eq!(out.plant_top, Some(5));
        assert!(out.strip.is_none());
    }

    #[test]
    fn test_default_collaborators_strip_guide() {
        let out = GuideRemoval.execute_default(guided_plant()).unwrap();
        assert_eq!(out.plant_top, Some(20));
        for r in 0..20 {
            assert!(out.mask.foreground_columns(r).unwrap().is_empty());
        }
        // erasing the guide may nick the top rows of the plant, nothing more
        for r in 22..35 {
            for c in 5..75 {
                assert_eq!(out.mask.get(r, c).unwrap(), 255);
            }
        }
        assert!(out.mask.foreground_count() >= 15 * 70 - 20);
        assert!(out.strip.unwrap().lines_removed >= 1);
    }
}
