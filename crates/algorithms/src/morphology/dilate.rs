//! Binary dilation
//!
//! A pixel becomes foreground if any in-bounds pixel under the structuring
//! element is foreground.

use crate::maybe_rayon::*;
use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::element::StructuringElement;
use super::erode::offset_cell;

/// Parameters for binary dilation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Mask;
    type Output = Mask;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Binary dilation of a mask with a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params.element)
    }
}

/// Dilate a binary mask. Output pixels are `0` or `255`.
pub fn dilate(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    element.validate()?;

    let (rows, cols) = mask.shape();
    let offsets = element.offsets();

    let output_data: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let any_set = offsets.iter().any(|&(dr, dc)| {
                    offset_cell(row, col, dr, dc, rows, cols)
                        .is_some_and(|(nr, nc)| (unsafe { mask.get_unchecked(nr, nc) }) != 0)
                });

                if any_set {
                    *out = Mask::FOREGROUND;
                }
            }

            row_data
        })
        .collect();

    Mask::from_vec(output_data, rows, cols)
}
