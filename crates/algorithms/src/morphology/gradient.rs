//! Binary morphological gradient (dilation minus erosion)
//!
//! For a binary mask the gradient is the band of pixels that the dilation
//! adds plus the pixels the erosion strips: the contour of every blob. The
//! inner gradient keeps only the stripped pixels, i.e. the blob's own
//! boundary pixels.

use crate::maybe_rayon::*;
use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological gradient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Morphological gradient algorithm
#[derive(Debug, Clone, Default)]
pub struct Gradient;

impl Algorithm for Gradient {
    type Input = Mask;
    type Output = Mask;
    type Params = GradientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "MorphologicalGradient"
    }

    fn description(&self) -> &'static str {
        "Morphological gradient (dilation minus erosion) for mask contours"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        gradient(&input, &params.element)
    }
}

/// Compute the morphological gradient of a binary mask
pub fn gradient(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    let dilated = dilate(mask, element)?;
    let eroded = erode(mask, element)?;
    difference(&dilated, &eroded)
}

/// Foreground pixels of `mask` that erosion removes
pub fn inner_gradient(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    let eroded = erode(mask, element)?;
    difference(mask, &eroded)
}

/// Pixels set in `a` and clear in `b`; both share one shape
fn difference(a: &Mask, b: &Mask) -> Result<Mask> {
    let (rows, cols) = a.shape();

    let output_data: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let keep = unsafe { a.get_unchecked(row, col) };
                let removed = unsafe { b.get_unchecked(row, col) };
                if keep != 0 && removed == 0 {
                    *out = Mask::FOREGROUND;
                }
            }
            row_data
        })
        .collect();

    Mask::from_vec(output_data, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_of_block_is_ring() {
        let mut mask = Mask::new(9, 9);
        for r in 2..7 {
            for c in 2..7 {
                mask.set(r, c, 255).unwrap();
            }
        }
        let result = gradient(&mask, &StructuringElement::Square(1)).unwrap();
        // 7x7 dilated minus 3x3 eroded
        assert_eq!(result.foreground_count(), 49 - 9);
        assert_eq!(result.get(4, 4).unwrap(), 0);
        assert_eq!(result.get(1, 1).unwrap(), 255);
    }

    #[test]
    fn test_inner_gradient_of_block() {
        let mut mask = Mask::new(9, 9);
        for r in 2..7 {
            for c in 2..7 {
                mask.set(r, c, 255).unwrap();
            }
        }
        let result = inner_gradient(&mask, &StructuringElement::Square(1)).unwrap();
        // 5x5 block minus its 3x3 core
        assert_eq!(result.foreground_count(), 25 - 9);
        assert_eq!(result.get(2, 2).unwrap(), 255);
        assert_eq!(result.get(1, 1).unwrap(), 0);
        assert_eq!(result.get(4, 4).unwrap(), 0);
    }

    #[test]
    fn test_gradient_uniform_is_empty() {
        let full = Mask::filled(6, 6, 255);
        assert_eq!(
            gradient(&full, &StructuringElement::Square(1))
                .unwrap()
                .foreground_count(),
            0
        );
        let empty = Mask::new(6, 6);
        assert_eq!(
            gradient(&empty, &StructuringElement::Square(1))
                .unwrap()
                .foreground_count(),
            0
        );
    }

    #[test]
    fn test_gradient_algorithm_trait() {
        let mut mask = Mask::new(5, 5);
        mask.set(2, 2, 255).unwrap();
        let result = Gradient.execute_default(mask).unwrap();
        assert_eq!(result.foreground_count(), 9);
        assert_eq!(Gradient.name(), "MorphologicalGradient");
    }
}
