//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{Array2, ArrayView1};

/// A 2D raster grid.
///
/// `Raster<T>` stores values of type `T` in row-major order, indexed as
/// `(row, col)`.
///
/// # Type Parameters
///
/// - `T`: The cell value type, must implement [`RasterElement`]
///
/// # Example
///
/// ```
/// use phenomask_core::Raster;
///
/// let mut raster: Raster<u8> = Raster::new(4, 6);
/// raster.set(1, 2, 255).unwrap();
/// assert_eq!(raster.get(1, 2).unwrap(), 255);
/// assert_eq!(raster.foreground_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterElement> {
    /// Raster data stored in row-major order (row, col)
    data: Array2<T>,
}

/// Single-channel binary mask. Any non-zero pixel is foreground.
pub type Mask = Raster<u8>;

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a raster from existing row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a raster from a list of equally long rows
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(Error::SizeMismatch {
                    er: row,
                    ec: cols,
                    ar: row,
                    ac: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Self::from_vec(data, rows.len(), cols)
    }

    /// Create a raster with the same dimensions, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Get a row slice
    pub fn row(&self, row: usize) -> Result<ArrayView1<'_, T>> {
        if row >= self.rows() {
            return Err(Error::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.data.row(row))
    }

    // Mask queries

    /// Number of foreground (non-zero) cells
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_foreground()).count()
    }

    /// Ascending column indices of the foreground cells in `row`
    pub fn foreground_columns(&self, row: usize) -> Result<Vec<usize>> {
        Ok(self
            .row(row)?
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_foreground())
            .map(|(col, _)| col)
            .collect())
    }
}

impl Raster<u8> {
    /// Value written for foreground pixels by mask-producing operations
    pub const FOREGROUND: u8 = 255;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<u8> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
        assert_eq!(raster.foreground_count(), 0);
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Mask = Raster::new(10, 10);
        raster.set(5, 5, 255).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 255);
        assert!(raster.set(10, 0, 1).is_err());
        assert!(matches!(
            raster.get(0, 10),
            Err(Error::IndexOutOfBounds { row: 0, col: 10, .. })
        ));
    }

    #[test]
    fn test_from_rows() {
        let mask = Mask::from_rows(&[[0u8, 1, 0], [1, 1, 1]]).unwrap();
        assert_eq!(mask.shape(), (2, 3));
        assert_eq!(mask.foreground_count(), 4);
        assert_eq!(mask.foreground_columns(0).unwrap(), vec![1]);
        assert_eq!(mask.foreground_columns(1).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 1, 0], vec![1, 1]];
        assert!(matches!(
            Mask::from_rows(&rows),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_sized() {
        let empty: [[u8; 0]; 0] = [];
        let mask = Mask::from_rows(&empty).unwrap();
        assert!(mask.is_empty());
        assert_eq!(mask.shape(), (0, 0));

        let wide = Mask::new(0, 7);
        assert_eq!(wide.foreground_count(), 0);
        assert!(wide.row(0).is_err());
    }

    #[test]
    fn test_from_vec_bad_length() {
        assert!(Mask::from_vec(vec![0; 5], 2, 3).is_err());
    }
}
