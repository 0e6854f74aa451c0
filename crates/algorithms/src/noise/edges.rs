//! Morphological edge detector

use phenomask_core::raster::Mask;
use phenomask_core::Result;
use serde::{Deserialize, Serialize};

use super::collaborators::EdgeDetector;
use crate::morphology::{gradient, inner_gradient, StructuringElement};

/// Which side of a blob contour is reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The blob's own boundary pixels
    #[default]
    Inner,
    /// Boundary pixels plus the background ring around them
    Gradient,
}

/// Edges of a binary mask from its morphological gradient.
///
/// Inner edges never leave the blob, so the edges of a plant body start on
/// its top row and not one row above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologicalEdges {
    pub element: StructuringElement,
    pub kind: EdgeKind,
}

impl EdgeDetector for MorphologicalEdges {
    fn detect_edges(&self, mask: &Mask) -> Result<Mask> {
        match self.kind {
            EdgeKind::Inner => inner_gradient(mask, &self.element),
            EdgeKind::Gradient => gradient(mask, &self.element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Mask {
        let mut mask = Mask::new(9, 9);
        for r in 3..6 {
            for c in 3..6 {
                mask.set(r, c, 255).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_inner_edges_of_block() {
        let edges = MorphologicalEdges::default().detect_edges(&block()).unwrap();
        // 3x3 block minus its center
        assert_eq!(edges.foreground_count(), 8);
        assert_eq!(edges.get(4, 4).unwrap(), 0);
        assert_eq!(edges.get(3, 3).unwrap(), 255);
        assert_eq!(edges.get(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_gradient_edges_of_block() {
        let detector = MorphologicalEdges {
            kind: EdgeKind::Gradient,
            ..Default::default()
        };
        let edges = detector.detect_edges(&block()).unwrap();
        // dilated 5x5 minus the eroded center pixel
        assert_eq!(edges.foreground_count(), 24);
        assert_eq!(edges.get(2, 2).unwrap(), 255);
    }

    #[test]
    fn test_edges_of_empty_mask() {
        let edges = MorphologicalEdges::default().detect_edges(&Mask::new(4, 6)).unwrap();
        assert_eq!(edges.shape(), (4, 6));
        assert_eq!(edges.foreground_count(), 0);
    }

    #[test]
    fn test_kind_from_json() {
        let edges: MorphologicalEdges = serde_json::from_str(r#"{"kind": "gradient"}"#).unwrap();
        assert_eq!(edges.kind, EdgeKind::Gradient);
        assert_eq!(edges.element, StructuringElement::default());
    }
}
