//! Isolated horizontal line detection
//!
//! A run of horizontally contiguous foreground pixels with no vertical
//! support from the rows above and below is almost always a scan artifact
//! of the light barrier rather than plant tissue.
//!
//! For rows that are effectively a solid band (solidity >= 0.99) the
//! comparison rows are the nearest rows above and below that are not part of
//! the same blob, found with
//! [`ScanlineProfile::find_first_non_full_neighbors`]. Every other row is
//! compared with its direct neighbors.

use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use crate::profile::{RowProfile, ScanlineProfile};

/// Solidity from which a row counts as a solid band
pub const SOLID_BAND_SOLIDITY: f64 = 0.99;

/// A horizontal run of foreground pixels, columns inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorizontalLine {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl HorizontalLine {
    pub fn new(row: usize, start: usize, end: usize) -> Self {
        Self { row, start, end }
    }

    /// Number of pixels in the run
    pub fn length(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Parameters for isolated line detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolatedLineParams {
    /// Shortest run reported, in pixels
    pub min_length: usize,
    /// Reject pixels supported from either side; when false only pixels
    /// supported from both sides are rejected
    pub fully_isolated: bool,
}

impl Default for IsolatedLineParams {
    fn default() -> Self {
        Self {
            min_length: 5,
            fully_isolated: true,
        }
    }
}

impl IsolatedLineParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(Error::InvalidParameter {
                name: "min_length",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Finds isolated horizontal lines in the rows of a profile
#[derive(Debug, Clone, Default)]
pub struct IsolatedLineDetector {
    params: IsolatedLineParams,
}

impl IsolatedLineDetector {
    pub fn new(params: IsolatedLineParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &IsolatedLineParams {
        &self.params
    }

    /// Isolated runs of the row at `row_index`, left to right.
    ///
    /// Fails with [`Error::RowNotFound`] when the profile has no such row and
    /// with [`Error::RowTooShort`] when the row has fewer foreground pixels
    /// than `min_length`.
    pub fn detect(&self, profile: &ScanlineProfile<'_>, row_index: usize) -> Result<Vec<HorizontalLine>> {
        let row = profile
            .find_row(row_index)
            .ok_or(Error::RowNotFound { row: row_index })?;

        if row.count() < self.params.min_length {
            return Err(Error::RowTooShort {
                row: row_index,
                count: row.count(),
                min_length: self.params.min_length,
            });
        }

        let (up, down) = if row.solidity() >= SOLID_BAND_SOLIDITY {
            profile.find_first_non_full_neighbors(row_index)
        } else {
            (row_index.checked_sub(1), row_index.checked_add(1))
        };
        let up = up.and_then(|r| profile.find_row(r));
        let down = down.and_then(|r| profile.find_row(r));

        Ok(self.isolated_runs(row, up, down))
    }

    /// Like [`detect`](Self::detect), but a missing or short row yields no
    /// lines. The cause is reported as a debug event.
    pub fn horizontal_lines_at(&self, profile: &ScanlineProfile<'_>, row_index: usize) -> Vec<HorizontalLine> {
        match self.detect(profile, row_index) {
            Ok(lines) => lines,
            Err(err) => {
                tracing::debug!(row = row_index, %err, "no isolated lines");
                Vec::new()
            }
        }
    }

    /// Isolated runs of every profiled row, top to bottom
    pub fn detect_all(&self, profile: &ScanlineProfile<'_>) -> Vec<HorizontalLine> {
        profile
            .rows()
            .iter()
            .flat_map(|row| self.horizontal_lines_at(profile, row.row_index()))
            .collect()
    }

    fn isolated_runs(
        &self,
        row: &RowProfile,
        up: Option<&RowProfile>,
        down: Option<&RowProfile>,
    ) -> Vec<HorizontalLine> {
        let mut lines = Vec::new();
        let mut run: Option<(usize, usize)> = None;

        let mut close = |run: &mut Option<(usize, usize)>| {
            if let Some((start, end)) = run.take() {
                if end - start + 1 >= self.params.min_length {
                    lines.push(HorizontalLine::new(row.row_index(), start, end));
                }
            }
        };

        for &col in row.positions() {
            let above = up.is_some_and(|r| r.contains(col));
            let below = down.is_some_and(|r| r.contains(col));
            let supported = (self.params.fully_isolated && (above || below)) || (above && below);

            if supported {
                close(&mut run);
                continue;
            }

            run = match run {
                Some((start, end)) if col == end + 1 => Some((start, col)),
                _ => {
                    close(&mut run);
                    Some((col, col))
                }
            };
        }
        close(&mut run);

        lines
    }
}

/// Mask with the isolated lines removed, and the lines that were removed
#[derive(Debug, Clone, PartialEq)]
pub struct StreakRemoval {
    pub mask: Mask,
    pub lines: Vec<HorizontalLine>,
}

/// Isolated line removal algorithm
#[derive(Debug, Clone, Default)]
pub struct IsolatedLines;

impl Algorithm for IsolatedLines {
    type Input = Mask;
    type Output = StreakRemoval;
    type Params = IsolatedLineParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "IsolatedLines"
    }

    fn description(&self) -> &'static str {
        "Remove thin horizontal streaks without vertical support"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erase_isolated_lines(&input, params)
    }
}

/// Set every isolated horizontal line of `mask` to background
pub fn erase_isolated_lines(mask: &Mask, params: IsolatedLineParams) -> Result<StreakRemoval> {
    let detector = IsolatedLineDetector::new(params)?;
    let lines = detector.detect_all(&ScanlineProfile::new(mask));

    let mut cleaned = mask.clone();
    let data = cleaned.data_mut();
    for line in &lines {
        for col in line.start..=line.end {
            data[(line.row, col)] = 0;
        }
    }

    Ok(StreakRemoval {
        mask: cleaned,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Mask {
        let data: Vec<Vec<u8>> = rows
            .iter()
            .map(|r| r.bytes().map(|b| if b == b'#' { 255 } else { 0 }).collect())
            .collect();
        Mask::from_rows(&data).unwrap()
    }

    fn detector(min_length: usize, fully_isolated: bool) -> IsolatedLineDetector {
        IsolatedLineDetector::new(IsolatedLineParams {
            min_length,
            fully_isolated,
        })
        .unwrap()
    }

    #[test]
    fn test_single_row_without_neighbors() {
        let mask = Mask::from_vec(vec![0, 0, 255, 255, 255, 0, 0], 1, 7).unwrap();
        let profile = ScanlineProfile::new(&mask);
        let lines = detector(2, true).detect(&profile, 0).unwrap();
        assert_eq!(lines, vec![HorizontalLine::new(0, 2, 4)]);
        assert_eq!(lines[0].length(), 3);
    }

    #[test]
    fn test_missing_row_is_typed_failure() {
        let mask = mask_from(&["..###.."]);
        let profile = ScanlineProfile::new(&mask);
        let det = detector(2, true);
        assert!(matches!(
            det.detect(&profile, 3),
            Err(Error::RowNotFound { row: 3 })
        ));
        assert!(det.horizontal_lines_at(&profile, 3).is_empty());
    }

    #[test]
    fn test_short_row_is_typed_failure() {
        let mask = mask_from(&["..#.#.."]);
        let profile = ScanlineProfile::new(&mask);
        assert!(matches!(
            detector(3, true).detect(&profile, 0),
            Err(Error::RowTooShort {
                row: 0,
                count: 2,
                min_length: 3
            })
        ));
    }

    #[test]
    fn test_supported_pixels_split_runs() {
        let mask = mask_from(&[
            "...#......", //
            "#########.", //
            "..........",
        ]);
        let profile = ScanlineProfile::new(&mask);
        // solidity 1.0 and nothing above row 0 covers the row, so the
        // neighbors are the direct rows 0 and 2
        let lines = detector(2, true).detect(&profile, 1).unwrap();
        assert_eq!(
            lines,
            vec![HorizontalLine::new(1, 0, 2), HorizontalLine::new(1, 4, 8)]
        );
        // the supported column belongs to no run
        assert!(lines.iter().all(|l| !(l.start..=l.end).contains(&3)));
    }

    #[test]
    fn test_partial_isolation_tolerates_one_side() {
        let mask = mask_from(&[
            "..##....", //
            "#######.", //
            "...##...",
        ]);
        let profile = ScanlineProfile::new(&mask);

        let strict = detector(1, true).detect(&profile, 1).unwrap();
        assert_eq!(
            strict,
            vec![
                HorizontalLine::new(1, 0, 1),
                HorizontalLine::new(1, 5, 6)
            ]
        );

        // only column 3 is supported from both sides
        let relaxed = detector(1, false).detect(&profile, 1).unwrap();
        assert_eq!(
            relaxed,
            vec![
                HorizontalLine::new(1, 0, 2),
                HorizontalLine::new(1, 4, 6)
            ]
        );
    }

    #[test]
    fn test_gap_starts_new_run() {
        let mask = mask_from(&["###..####"]);
        let profile = ScanlineProfile::new(&mask);
        let lines = detector(3, true).detect(&profile, 0).unwrap();
        assert_eq!(
            lines,
            vec![HorizontalLine::new(0, 0, 2), HorizontalLine::new(0, 5, 8)]
        );
        let lines = detector(4, true).detect(&profile, 0).unwrap();
        assert_eq!(lines, vec![HorizontalLine::new(0, 5, 8)]);
    }

    #[test]
    fn test_solid_band_compares_against_blob_neighbors() {
        let mask = mask_from(&[
            "#.........", // 0
            "##########", // 1
            "##########", // 2
            "##########", // 3
            ".........#", // 4
        ]);
        let profile = ScanlineProfile::new(&mask);
        // row 2 is covered by rows 1 and 3, so it is compared with rows 0 and 4
        let lines = detector(3, true).detect(&profile, 2).unwrap();
        assert_eq!(lines, vec![HorizontalLine::new(2, 1, 8)]);
    }

    #[test]
    fn test_erase_isolated_lines() {
        let mask = mask_from(&[
            "..........", //
            ".######...", //
            "..........", //
            "....##....", //
            "....##....",
        ]);
        let removal = IsolatedLines
            .execute(
                mask,
                IsolatedLineParams {
                    min_length: 4,
                    fully_isolated: true,
                },
            )
            .unwrap();
        assert_eq!(removal.lines, vec![HorizontalLine::new(1, 1, 6)]);
        assert_eq!(removal.mask.foreground_count(), 4);
        assert_eq!(removal.mask.get(1, 3).unwrap(), 0);
        assert_eq!(removal.mask.get(3, 4).unwrap(), 255);
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let result = IsolatedLineDetector::new(IsolatedLineParams {
            min_length: 0,
            fully_isolated: true,
        });
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "min_length", .. })
        ));
    }
}
