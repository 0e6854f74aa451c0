//! Row classification labels, kept apart from the profile itself

use std::fmt;

use phenomask_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Diagnostic label attached to a profiled row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTag {
    #[default]
    None,
    NoPixels,
    StopChecking,
    PlantAndGuide,
    PlantStart,
    #[serde(rename = "to_small")]
    TooSmall,
    Unknown,
    /// Guide row found by the coarse survey pass
    Guide,
    /// Free-form label, e.g. a quantile name for visualization
    Label(String),
}

impl RowTag {
    pub fn label(text: impl Into<String>) -> Self {
        RowTag::Label(text.into())
    }
}

impl fmt::Display for RowTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowTag::None => f.write_str("none"),
            RowTag::NoPixels => f.write_str("no_pixels"),
            RowTag::StopChecking => f.write_str("stop_checking"),
            RowTag::PlantAndGuide => f.write_str("plant_and_guide"),
            RowTag::PlantStart => f.write_str("plant_start"),
            RowTag::TooSmall => f.write_str("to_small"),
            RowTag::Unknown => f.write_str("unknown"),
            RowTag::Guide => f.write_str("guide"),
            RowTag::Label(text) => f.write_str(text),
        }
    }
}

/// One tag per profiled row, addressed by absolute row index.
///
/// Built alongside a [`ScanlineProfile`](super::ScanlineProfile) with
/// [`ScanlineProfile::new_tags`](super::ScanlineProfile::new_tags); every
/// row starts as [`RowTag::None`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RowTags {
    top_index: usize,
    tags: Vec<RowTag>,
}

impl RowTags {
    /// Tags for `len` consecutive rows starting at `top_index`
    pub fn new(top_index: usize, len: usize) -> Self {
        Self {
            top_index,
            tags: vec![RowTag::None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag of the row at absolute index `row`
    pub fn get(&self, row: usize) -> Option<&RowTag> {
        row.checked_sub(self.top_index)
            .and_then(|i| self.tags.get(i))
    }

    /// Overwrite the tag of the row at absolute index `row`
    pub fn set(&mut self, row: usize, tag: RowTag) -> Result<()> {
        let slot = row
            .checked_sub(self.top_index)
            .and_then(|i| self.tags.get_mut(i))
            .ok_or(Error::RowNotFound { row })?;
        *slot = tag;
        Ok(())
    }

    /// `(row_index, tag)` pairs from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RowTag)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .map(move |(i, tag)| (self.top_index + i, tag))
    }

    /// First row whose tag satisfies `pred`
    pub fn first_row_where(&self, mut pred: impl FnMut(&RowTag) -> bool) -> Option<usize> {
        self.iter().find(|(_, tag)| pred(tag)).map(|(row, _)| row)
    }

    /// Number of rows carrying `tag`
    pub fn count(&self, tag: &RowTag) -> usize {
        self.tags.iter().filter(|t| *t == tag).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(RowTag::None.to_string(), "none");
        assert_eq!(RowTag::TooSmall.to_string(), "to_small");
        assert_eq!(RowTag::PlantAndGuide.to_string(), "plant_and_guide");
        assert_eq!(RowTag::label("q_2_of_4").to_string(), "q_2_of_4");
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&RowTag::TooSmall).unwrap();
        assert_eq!(json, "\"to_small\"");
        let json = serde_json::to_string(&RowTag::StopChecking).unwrap();
        assert_eq!(json, "\"stop_checking\"");
    }

    #[test]
    fn test_set_and_get_by_absolute_row() {
        let mut tags = RowTags::new(10, 3);
        assert_eq!(tags.get(10), Some(&RowTag::None));
        tags.set(12, RowTag::PlantStart).unwrap();
        assert_eq!(tags.get(12), Some(&RowTag::PlantStart));
        assert_eq!(tags.get(9), None);
        assert_eq!(tags.get(13), None);
        assert!(matches!(
            tags.set(13, RowTag::Unknown),
            Err(Error::RowNotFound { row: 13 })
        ));
    }

    #[test]
    fn test_first_row_where_and_count() {
        let mut tags = RowTags::new(5, 4);
        tags.set(6, RowTag::TooSmall).unwrap();
        tags.set(7, RowTag::StopChecking).unwrap();
        tags.set(8, RowTag::StopChecking).unwrap();
        assert_eq!(
            tags.first_row_where(|t| *t == RowTag::StopChecking),
            Some(7)
        );
        assert_eq!(tags.count(&RowTag::StopChecking), 2);
        assert_eq!(tags.first_row_where(|t| *t == RowTag::Unknown), None);
    }
}
