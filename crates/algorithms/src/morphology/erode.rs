//! Binary erosion
//!
//! A foreground pixel survives only if every in-bounds pixel under the
//! structuring element is foreground. Cells outside the mask are ignored, so
//! a blob touching the image border is not eaten from that side.

use crate::maybe_rayon::*;
use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::element::StructuringElement;

/// Parameters for binary erosion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Mask;
    type Output = Mask;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Binary erosion of a mask with a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params.element)
    }
}

/// Erode a binary mask. Output pixels are `0` or `255`.
pub fn erode(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    element.validate()?;

    let (rows, cols) = mask.shape();
    let offsets = element.offsets();

    let output_data: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let center = unsafe { mask.get_unchecked(row, col) };
                if center == 0 {
                    continue;
                }

                let all_set = offsets.iter().all(|&(dr, dc)| {
                    match offset_cell(row, col, dr, dc, rows, cols) {
                        Some((nr, nc)) => (unsafe { mask.get_unchecked(nr, nc) }) != 0,
                        None => true,
                    }
                });

                if all_set {
                    *out = Mask::FOREGROUND;
                }
            }

            row_data
        })
        .collect();

    Mask::from_vec(output_data, rows, cols)
}

/// `(row + dr, col + dc)` if it lies inside a `rows` x `cols` grid
pub(crate) fn offset_cell(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let nr = row.checked_add_signed(dr)?;
    let nc = col.checked_add_signed(dc)?;
    (nr < rows && nc < cols).then_some((nr, nc))
}
