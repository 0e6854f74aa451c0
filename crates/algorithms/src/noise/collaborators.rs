//! Edge and line-segment detection seams used by the noise-line stripper
//!
//! The stripper only needs an edge map of the current mask and a list of
//! straight segments found in it. Both come from collaborators behind these
//! traits; plain closures with the right signature work too.

use phenomask_core::raster::Mask;
use phenomask_core::Result;
use serde::{Deserialize, Serialize};

/// Straight segment between two pixels, `x` = column, `y` = row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub x1: isize,
    pub y1: isize,
    pub x2: isize,
    pub y2: isize,
}

impl Segment {
    pub fn new(x1: isize, y1: isize, x2: isize, y2: isize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `atan2(y2 - y1, x2 - x1)` in degrees, in `(-180, 180]`
    pub fn angle_degrees(&self) -> f64 {
        let dy = (self.y2 - self.y1) as f64;
        let dx = (self.x2 - self.x1) as f64;
        dy.atan2(dx).to_degrees()
    }

    /// Whether both endpoints lie on row `row` or further down
    pub fn lies_below(&self, row: usize) -> bool {
        let row = row as isize;
        self.y1 >= row && self.y2 >= row
    }
}

/// Search settings handed to the segment detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSearch {
    /// Accumulator votes a line needs
    pub threshold: usize,
    /// Shortest segment reported, in pixels
    pub min_line_length: usize,
    /// Largest gap bridged along a segment, in pixels
    pub max_line_gap: usize,
}

/// Turns a mask into a same-shaped edge mask
pub trait EdgeDetector {
    fn detect_edges(&self, mask: &Mask) -> Result<Mask>;
}

/// Finds straight segments in an edge mask
pub trait SegmentDetector {
    fn detect_segments(&self, edges: &Mask, search: &SegmentSearch) -> Result<Vec<Segment>>;
}

impl<F> EdgeDetector for F
where
    F: Fn(&Mask) -> Result<Mask>,
{
    fn detect_edges(&self, mask: &Mask) -> Result<Mask> {
        self(mask)
    }
}

impl<F> SegmentDetector for F
where
    F: Fn(&Mask, &SegmentSearch) -> Result<Vec<Segment>>,
{
    fn detect_segments(&self, edges: &Mask, search: &SegmentSearch) -> Result<Vec<Segment>> {
        self(edges, search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_angles() {
        assert_relative_eq!(Segment::new(0, 0, 5, 0).angle_degrees(), 0.0);
        assert_relative_eq!(Segment::new(3, 0, 3, 9).angle_degrees(), 90.0);
        assert_relative_eq!(Segment::new(3, 9, 3, 0).angle_degrees(), -90.0);
        assert_relative_eq!(Segment::new(5, 0, 0, 0).angle_degrees(), 180.0);
        assert_relative_eq!(Segment::new(0, 0, 4, 4).angle_degrees(), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lies_below() {
        assert!(Segment::new(0, 11, 0, 20).lies_below(10));
        assert!(Segment::new(0, 10, 0, 20).lies_below(10));
        assert!(!Segment::new(0, 9, 0, 20).lies_below(10));
        assert!(!Segment::new(4, 20, 0, 2).lies_below(10));
    }

    #[test]
    fn test_closures_as_collaborators() {
        let edges = |mask: &Mask| -> Result<Mask> { Ok(mask.clone()) };
        let segments = |_: &Mask, search: &SegmentSearch| -> Result<Vec<Segment>> {
            Ok(vec![Segment::new(0, 0, 0, search.min_line_length as isize)])
        };
        let search = SegmentSearch {
            threshold: 1,
            min_line_length: 4,
            max_line_gap: 0,
        };

        let mask = Mask::new(3, 3);
        let edge_map = edges.detect_edges(&mask).unwrap();
        assert_eq!(edge_map, mask);
        let found = segments.detect_segments(&edge_map, &search).unwrap();
        assert_eq!(found, vec![Segment::new(0, 0, 0, 4)]);
    }
}
