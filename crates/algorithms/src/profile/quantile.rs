//! Quantile partition of a profile and per-chunk shape statistics
//!
//! The inclusive row range `[top_index, bottom_index]` is cut into `total`
//! contiguous chunks whose sizes differ by at most one row; the larger
//! chunks sit at the bottom.

use phenomask_core::raster::Mask;
use phenomask_core::{Error, Result};
use serde::Serialize;

use super::row::RowProfile;
use super::scanline::ScanlineProfile;
use super::tags::{RowTag, RowTags};

/// Shape figures of a run of profile rows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ShapeStats {
    /// Sum of foreground counts
    pub area: usize,
    /// Sum of row spans
    pub hull_width_sum: usize,
    /// `area / hull_width_sum`, 0 when no row has pixels
    pub solidity: f64,
    pub min_width: usize,
    pub max_width: usize,
    pub mean_width: f64,
    /// Population standard deviation of the row spans
    pub std_width: f64,
}

impl ShapeStats {
    /// Statistics over `rows`; all zero for an empty slice
    pub fn from_rows(rows: &[RowProfile]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let spans: Vec<usize> = rows.iter().map(RowProfile::span).collect();
        let area: usize = rows.iter().map(RowProfile::count).sum();
        let hull_width_sum: usize = spans.iter().sum();

        let n = spans.len() as f64;
        let mean_width = hull_width_sum as f64 / n;
        let var = spans
            .iter()
            .map(|&s| {
                let d = s as f64 - mean_width;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            area,
            hull_width_sum,
            solidity: if hull_width_sum > 0 {
                area as f64 / hull_width_sum as f64
            } else {
                0.0
            },
            min_width: spans.iter().copied().min().unwrap_or(0),
            max_width: spans.iter().copied().max().unwrap_or(0),
            mean_width,
            std_width: var.sqrt(),
        }
    }
}

/// Absolute `(start, stop)` bounds of chunk `index` when the inclusive range
/// `[first, last]` is cut into `total` near-equal chunks, `stop` exclusive.
///
/// The remainder rows go to the trailing chunks. When the range has fewer
/// rows than `total`, the leading chunks are empty (`start == stop`).
pub fn quantile_bounds(first: usize, last: usize, total: usize, index: usize) -> Result<(usize, usize)> {
    if total == 0 || index >= total || last < first {
        return Err(Error::InvalidQuantile { total, index });
    }

    let n = last - first + 1;
    let base = n / total;
    let remainder = n % total;
    let small_chunks = total - remainder;

    let start = first + index * base + index.saturating_sub(small_chunks);
    let size = if index < small_chunks { base } else { base + 1 };
    Ok((start, start + size))
}

impl ScanlineProfile<'_> {
    /// Absolute row bounds of chunk `index` out of `total`, `stop` exclusive
    pub fn quantile_range(&self, total: usize, index: usize) -> Result<(usize, usize)> {
        let (Some(top), Some(bottom)) = (self.top_index(), self.bottom_index()) else {
            return Err(Error::EmptyProfile);
        };
        quantile_bounds(top, bottom, total, index)
    }

    fn quantile_rows(&self, total: usize, index: usize) -> Result<&[RowProfile]> {
        let (start, stop) = self.quantile_range(total, index)?;
        let top = self.top_index().ok_or(Error::EmptyProfile)?;
        Ok(&self.rows()[start - top..stop - top])
    }

    /// Mask holding only the rows of chunk `index` out of `total`
    pub fn quantile_mask(&self, total: usize, index: usize, fill_value: u8) -> Result<Mask> {
        let (start, stop) = self.quantile_range(total, index)?;
        let top = self.top_index().ok_or(Error::EmptyProfile)?;
        Ok(self.render((start - top)..(stop - top), fill_value))
    }

    /// Shape statistics of chunk `index` out of `total`
    pub fn quantile_shape_stats(&self, total: usize, index: usize) -> Result<ShapeStats> {
        Ok(ShapeStats::from_rows(self.quantile_rows(total, index)?))
    }

    /// Shape statistics of every chunk, top to bottom
    pub fn quantile_features(&self, total: usize) -> Result<Vec<ShapeStats>> {
        (0..total)
            .map(|index| self.quantile_shape_stats(total, index))
            .collect()
    }

    /// Label every row of chunk `index` out of `total` with `tag`
    pub fn tag_quantile(&self, tags: &mut RowTags, total: usize, index: usize, tag: RowTag) -> Result<()> {
        let (start, stop) = self.quantile_range(total, index)?;
        for row in start..stop {
            tags.set(row, tag.clone())?;
        }
        Ok(())
    }
}
