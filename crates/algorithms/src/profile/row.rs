//! Per-row summary of a mask's foreground pixels

use serde::Serialize;

/// Foreground summary of one mask row.
///
/// `positions` holds the ascending column indices of the row's foreground
/// pixels. Span, count and solidity are derived from it, so a row is
/// immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct RowProfile {
    row_index: usize,
    positions: Vec<usize>,
    previous_span: Option<usize>,
}

impl RowProfile {
    /// Build a row summary. `positions` must be strictly ascending.
    pub fn new(row_index: usize, positions: Vec<usize>, previous_span: Option<usize>) -> Self {
        debug_assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "row positions must be strictly ascending"
        );
        Self {
            row_index,
            positions,
            previous_span,
        }
    }

    /// Absolute row coordinate in the source mask
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Ascending column indices of the foreground pixels
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Width of the interval holding every foreground pixel, 0 for an empty row
    pub fn span(&self) -> usize {
        match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    /// Number of foreground pixels
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// `count / span`, 0 for an empty row
    pub fn solidity(&self) -> f64 {
        match self.span() {
            0 => 0.0,
            span => self.count() as f64 / span as f64,
        }
    }

    /// Span of the row profiled just before this one, if any.
    ///
    /// This is a lookahead hint from the build order and not necessarily the
    /// geometrically adjacent row.
    pub fn previous_span(&self) -> Option<usize> {
        self.previous_span
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Leftmost foreground column
    pub fn first(&self) -> Option<usize> {
        self.positions.first().copied()
    }

    /// Rightmost foreground column
    pub fn last(&self) -> Option<usize> {
        self.positions.last().copied()
    }

    /// Whether column `col` is foreground in this row
    pub fn contains(&self, col: usize) -> bool {
        self.positions.binary_search(&col).is_ok()
    }

    /// Whether every foreground column of this row is foreground in `other`.
    ///
    /// An empty row is a subset of anything, including an absent row. A
    /// non-empty row is never a subset of an absent row.
    pub fn is_subset_of(&self, other: Option<&RowProfile>) -> bool {
        if self.positions.is_empty() {
            return true;
        }
        match other {
            None => false,
            Some(other) => self.positions.iter().all(|&col| other.contains(col)),
        }
    }
}

/// Rows compare by their foreground positions only.
impl PartialEq for RowProfile {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
    }
}

impl Eq for RowProfile {}
