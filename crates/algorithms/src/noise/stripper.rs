//! Iterative removal of near-vertical noise lines
//!
//! Each pass derives an edge map from the current mask, asks the segment
//! detector for straight segments, and paints out every segment whose
//! absolute angle lies strictly inside `(min_angle, max_angle)` unless both
//! of its endpoints lie in the plant region, i.e. on the plant-top row or
//! below it. The loop ends when a pass
//! deletes nothing, when no segment is found at all, or after
//! `max_iterations` passes.
//!
//! The stripper edits the mask in place, so it takes `&mut Mask`: no
//! [`ScanlineProfile`](crate::profile::ScanlineProfile) over the mask can be
//! alive across the call. Rebuild profiles afterwards.

use phenomask_core::raster::{Mask, Neighborhood};
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::collaborators::{EdgeDetector, Segment, SegmentDetector, SegmentSearch};
use super::edges::MorphologicalEdges;
use super::hough::ProgressiveHough;

/// Parameters for noise-line stripping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripParams {
    /// Lower bound (exclusive) of the deleted angle band, degrees
    pub min_angle: f64,
    /// Upper bound (exclusive) of the deleted angle band, degrees
    pub max_angle: f64,
    /// First row of the plant; segments with both ends on or below it are
    /// kept
    pub plant_top_row: Option<usize>,
    /// Accumulator votes a segment needs
    pub line_threshold: usize,
    pub min_line_length: usize,
    pub max_line_gap: usize,
    /// Hard cap on detection passes
    pub max_iterations: usize,
    /// Width of the stroke used to paint out a segment, in pixels
    pub erase_thickness: usize,
}

impl Default for StripParams {
    fn default() -> Self {
        Self {
            min_angle: 60.0,
            max_angle: 120.0,
            plant_top_row: None,
            line_threshold: 10,
            min_line_length: 10,
            max_line_gap: 3,
            max_iterations: 100,
            erase_thickness: 3,
        }
    }
}

impl StripParams {
    pub fn validate(&self) -> Result<()> {
        if !self.min_angle.is_finite() || !self.max_angle.is_finite() {
            return Err(Error::InvalidParameter {
                name: "min_angle",
                value: format!("{}..{}", self.min_angle, self.max_angle),
                reason: "angle bounds must be finite".into(),
            });
        }
        if self.min_angle > self.max_angle {
            return Err(Error::InvalidParameter {
                name: "min_angle",
                value: self.min_angle.to_string(),
                reason: format!("must not exceed max_angle ({})", self.max_angle),
            });
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iterations",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.line_threshold == 0 {
            return Err(Error::InvalidParameter {
                name: "line_threshold",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn search(&self) -> SegmentSearch {
        SegmentSearch {
            threshold: self.line_threshold,
            min_line_length: self.min_line_length,
            max_line_gap: self.max_line_gap,
        }
    }

    /// Whether `segment` is painted out
    pub fn deletes(&self, segment: &Segment) -> bool {
        let angle = segment.angle_degrees().abs();
        let in_band = self.min_angle < angle && angle < self.max_angle;
        let inside_plant = self
            .plant_top_row
            .is_some_and(|top| segment.lies_below(top));
        in_band && !inside_plant
    }
}

/// How the stripping loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A pass found nothing to delete
    Stable,
    /// `max_iterations` passes ran and the last one still deleted segments
    IterationCap,
}

/// Diagnostics of one stripping run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripReport {
    /// Segments painted out over all passes
    pub lines_removed: usize,
    /// Foreground pixels lost over all passes
    pub pixels_removed: usize,
    pub iterations: usize,
    pub termination: Termination,
    /// Deleted segments of every pass, one entry per pass
    pub removed_per_iteration: Vec<Vec<Segment>>,
}

/// Removes near-vertical noise lines from a mask
#[derive(Debug, Clone, Default)]
pub struct NoiseLineStripper {
    params: StripParams,
}

impl NoiseLineStripper {
    pub fn new(params: StripParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &StripParams {
        &self.params
    }

    /// Run the stripping loop on `mask` in place
    pub fn strip<E, S>(&self, mask: &mut Mask, edges: &E, segments: &S) -> Result<StripReport>
    where
        E: EdgeDetector + ?Sized,
        S: SegmentDetector + ?Sized,
    {
        let before = mask.foreground_count();
        let search = self.params.search();
        let brush = Neighborhood::brush(self.params.erase_thickness).offsets();

        let mut removed_per_iteration = Vec::new();
        let mut termination = Termination::IterationCap;

        for iteration in 1..=self.params.max_iterations {
            let edge_map = edges.detect_edges(mask)?;
            let found = segments.detect_segments(&edge_map, &search)?;
            let found_count = found.len();

            let deleted: Vec<Segment> = found
                .into_iter()
                .filter(|segment| self.params.deletes(segment))
                .collect();
            for segment in &deleted {
                erase_segment(mask, segment, &brush);
            }

            tracing::debug!(
                "strip pass {}: {} segments found, {} deleted",
                iteration,
                found_count,
                deleted.len()
            );

            let done = deleted.is_empty();
            removed_per_iteration.push(deleted);
            if done {
                termination = Termination::Stable;
                break;
            }
        }

        let report = StripReport {
            lines_removed: removed_per_iteration.iter().map(Vec::len).sum(),
            pixels_removed: before.saturating_sub(mask.foreground_count()),
            iterations: removed_per_iteration.len(),
            termination,
            removed_per_iteration,
        };

        if report.termination == Termination::IterationCap {
            tracing::warn!(
                "noise stripping still deleting after {} passes, giving up",
                report.iterations
            );
        }
        tracing::info!(
            "noise stripping {:?} after {} passes: {} lines, {} pixels removed",
            report.termination,
            report.iterations,
            report.lines_removed,
            report.pixels_removed
        );

        Ok(report)
    }
}

/// Paint `segment` out of `mask` with a round brush
fn erase_segment(mask: &mut Mask, segment: &Segment, brush: &[(isize, isize)]) {
    let (rows, cols) = mask.shape();
    let data = mask.data_mut();

    for (x, y) in bresenham(segment) {
        for &(dr, dc) in brush {
            let (row, col) = (y + dr, x + dc);
            if row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols {
                data[(row as usize, col as usize)] = 0;
            }
        }
    }
}

/// Pixels of the segment from `(x1, y1)` to `(x2, y2)`, endpoints included
fn bresenham(segment: &Segment) -> Vec<(isize, isize)> {
    let (mut x, mut y) = (segment.x1, segment.y1);
    let dx = (segment.x2 - segment.x1).abs();
    let dy = -(segment.y2 - segment.y1).abs();
    let sx = if segment.x1 < segment.x2 { 1 } else { -1 };
    let sy = if segment.y1 < segment.y2 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        points.push((x, y));
        if x == segment.x2 && y == segment.y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Stripped mask and its diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct StrippedMask {
    pub mask: Mask,
    pub report: StripReport,
}

/// Noise-line stripping with the morphological edge detector and the
/// progressive probabilistic Hough transform
#[derive(Debug, Clone, Default)]
pub struct NoiseStripping;

impl Algorithm for NoiseStripping {
    type Input = Mask;
    type Output = StrippedMask;
    type Params = StripParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "NoiseStripping"
    }

    fn description(&self) -> &'static str {
        "Iteratively remove near-vertical noise lines above the plant"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut mask = input;
        let report = strip_noise_lines(
            &mut mask,
            params,
            &MorphologicalEdges::default(),
            &ProgressiveHough::default(),
        )?;
        Ok(StrippedMask { mask, report })
    }
}

/// Strip near-vertical noise lines from `mask` in place
pub fn strip_noise_lines<E, S>(
    mask: &mut Mask,
    params: StripParams,
    edges: &E,
    segments: &S,
) -> Result<StripReport>
where
    E: EdgeDetector + ?Sized,
    S: SegmentDetector + ?Sized,
{
    NoiseLineStripper::new(params)?.strip(mask, edges, segments)
}
