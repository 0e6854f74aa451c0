//! Scanline profile: one [`RowProfile`] per mask row
//!
//! The profile borrows its mask immutably, so the borrow checker rejects any
//! attempt to mutate the mask while a profile over it is alive. Algorithms
//! that edit the mask (noise-line stripping) force callers to drop the
//! profile first and rebuild it afterwards.

use std::cell::OnceCell;
use std::ops::{Bound, RangeBounds};

use phenomask_core::raster::Mask;
use phenomask_core::{Error, Result};
use serde::Serialize;

use super::row::RowProfile;
use super::tags::RowTags;

/// A row reference accepted by the position queries.
///
/// Integers address an absolute row. Fractions `v <= 1` address
/// `bottom_index - height * v`, i.e. a height ratio measured up from the
/// lowest profiled row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Row(usize),
    Fraction(f64),
}

impl From<usize> for Position {
    fn from(row: usize) -> Self {
        Position::Row(row)
    }
}

impl From<f64> for Position {
    fn from(fraction: f64) -> Self {
        Position::Fraction(fraction)
    }
}

#[derive(Debug, Clone, Copy)]
struct Aggregates {
    top_index: Option<usize>,
    bottom_index: Option<usize>,
    height: usize,
    width: usize,
    area: usize,
}

/// Aggregate figures of a profile, detached from the mask borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub top_index: Option<usize>,
    pub bottom_index: Option<usize>,
    pub height: usize,
    pub width: usize,
    pub area: usize,
    pub mask_width: usize,
    pub mask_height: usize,
}

/// Ordered per-row summaries of a mask, built once.
///
/// Leading empty rows are skipped and trailing empty rows trimmed, so the
/// stored rows are either empty or start and end with a non-empty row.
/// Empty rows between the two are kept.
#[derive(Debug)]
pub struct ScanlineProfile<'a> {
    mask: &'a Mask,
    rows: Vec<RowProfile>,
    aggregates: OnceCell<Aggregates>,
}

impl<'a> ScanlineProfile<'a> {
    /// Profile `mask` top to bottom
    pub fn new(mask: &'a Mask) -> Self {
        let mut rows: Vec<RowProfile> = Vec::new();
        let mut previous_span = None;

        for row_index in 0..mask.rows() {
            // row_index is always in bounds
            let positions = mask.foreground_columns(row_index).unwrap_or_default();

            if rows.is_empty() && positions.is_empty() {
                continue;
            }

            let row = RowProfile::new(row_index, positions, previous_span);
            previous_span = Some(row.span());
            rows.push(row);
        }

        while rows.last().is_some_and(RowProfile::is_empty) {
            rows.pop();
        }

        Self {
            mask,
            rows,
            aggregates: OnceCell::new(),
        }
    }

    /// The mask this profile was built from
    pub fn mask(&self) -> &'a Mask {
        self.mask
    }

    pub fn mask_width(&self) -> usize {
        self.mask.cols()
    }

    pub fn mask_height(&self) -> usize {
        self.mask.rows()
    }

    /// Profiled rows from top to bottom
    pub fn rows(&self) -> &[RowProfile] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn aggregates(&self) -> &Aggregates {
        self.aggregates.get_or_init(|| {
            let top_index = self.rows.first().map(RowProfile::row_index);
            let bottom_index = self.rows.last().map(RowProfile::row_index);
            let height = match (top_index, bottom_index) {
                (Some(top), Some(bottom)) => bottom - top,
                _ => 0,
            };
            Aggregates {
                top_index,
                bottom_index,
                height,
                width: self.rows.iter().map(RowProfile::span).max().unwrap_or(0),
                area: self.rows.iter().map(RowProfile::count).sum(),
            }
        })
    }

    /// Row index of the first profiled row
    pub fn top_index(&self) -> Option<usize> {
        self.aggregates().top_index
    }

    /// Row index of the last profiled row
    pub fn bottom_index(&self) -> Option<usize> {
        self.aggregates().bottom_index
    }

    /// `bottom_index - top_index`, 0 for an empty profile
    pub fn height(&self) -> usize {
        self.aggregates().height
    }

    /// Largest row span
    pub fn width(&self) -> usize {
        self.aggregates().width
    }

    /// Total foreground pixel count
    pub fn area(&self) -> usize {
        self.aggregates().area
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            top_index: self.top_index(),
            bottom_index: self.bottom_index(),
            height: self.height(),
            width: self.width(),
            area: self.area(),
            mask_width: self.mask_width(),
            mask_height: self.mask_height(),
        }
    }

    /// Fresh tags for every profiled row, all [`RowTag::None`](super::RowTag::None)
    pub fn new_tags(&self) -> RowTags {
        RowTags::new(self.top_index().unwrap_or(0), self.rows.len())
    }

    /// Row at absolute index `row_index`.
    ///
    /// Rows outside `[top_index, bottom_index]` were never recorded.
    pub fn find_row(&self, row_index: usize) -> Option<&RowProfile> {
        let top = self.top_index()?;
        let row = self.rows.get(row_index.checked_sub(top)?)?;
        debug_assert_eq!(row.row_index(), row_index);
        Some(row)
    }

    /// Paint `fill_value` at the foreground pixels of the rows at list
    /// positions `rows` into a zeroed mask shaped like the source.
    ///
    /// Positions index the profile's row list, not the mask: subtract
    /// `top_index` from absolute rows first. Out-of-range bounds are clamped.
    pub fn render<R: RangeBounds<usize>>(&self, rows: R, fill_value: u8) -> Mask {
        let len = self.rows.len();
        let start = match rows.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match rows.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);

        let mut out = self.mask.like(0);
        let data = out.data_mut();
        for row in &self.rows[start..end] {
            for &col in row.positions() {
                data[(row.row_index(), col)] = fill_value;
            }
        }
        out
    }

    /// Turn a [`Position`] into an absolute row index
    pub fn resolve_position(&self, position: impl Into<Position>) -> Result<usize> {
        match position.into() {
            Position::Row(row) => Ok(row),
            Position::Fraction(v) => {
                if !v.is_finite() || v > 1.0 {
                    return Err(Error::InvalidPosition {
                        value: v.to_string(),
                    });
                }
                let bottom = self.bottom_index().ok_or(Error::EmptyProfile)?;
                let resolved = bottom as f64 - self.height() as f64 * v;
                if resolved < 0.0 {
                    return Err(Error::InvalidPosition {
                        value: v.to_string(),
                    });
                }
                Ok(resolved as usize)
            }
        }
    }

    /// Row at a resolved position, `None` if that row was never profiled
    pub fn row_at(&self, position: impl Into<Position>) -> Result<Option<&RowProfile>> {
        let row = self.resolve_position(position)?;
        Ok(self.find_row(row))
    }

    /// Span at a resolved position, 0 if no row is there
    pub fn width_at(&self, position: impl Into<Position>) -> Result<usize> {
        Ok(self.row_at(position)?.map_or(0, RowProfile::span))
    }

    /// Foreground count at a resolved position, 0 if no row is there
    pub fn count_at(&self, position: impl Into<Position>) -> Result<usize> {
        Ok(self.row_at(position)?.map_or(0, RowProfile::count))
    }

    /// Whether every pixel of the row is foreground
    pub fn is_full_row(&self, row_index: usize) -> bool {
        self.find_row(row_index)
            .is_some_and(|row| row.count() == self.mask_width())
    }

    /// Nearest rows above and below `row_index` that are not part of the
    /// same solid blob.
    ///
    /// Walks upward while the target row is a subset of the searched row,
    /// stopping at `top_index`; same downward towards `bottom_index`. The
    /// returned indices may name rows that were never profiled (e.g. the row
    /// above `top_index`); `None` only means the index would underflow.
    pub fn find_first_non_full_neighbors(&self, row_index: usize) -> (Option<usize>, Option<usize>) {
        let up = row_index.checked_sub(1);
        let down = row_index.checked_add(1);

        let (Some(target), Some(top), Some(bottom)) =
            (self.find_row(row_index), self.top_index(), self.bottom_index())
        else {
            return (up, down);
        };

        let mut up = up;
        while let Some(candidate) = up {
            if candidate <= top || !target.is_subset_of(self.find_row(candidate)) {
                break;
            }
            up = Some(candidate - 1);
        }

        let mut down = down;
        while let Some(candidate) = down {
            if candidate >= bottom || !target.is_subset_of(self.find_row(candidate)) {
                break;
            }
            down = candidate.checked_add(1);
        }

        (up, down)
    }
}
