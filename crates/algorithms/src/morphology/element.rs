//! Structuring elements for binary morphology

use serde::{Deserialize, Serialize};
use phenomask_core::raster::Neighborhood;
use phenomask_core::{Error, Result};

/// Shape of a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape", content = "radius")]
pub enum StructuringElement {
    /// Square element of given radius (side = 2*radius + 1)
    Square(usize),
    /// Cross (plus-shaped) element of given radius
    Cross(usize),
    /// Disk element of given radius
    Disk(usize),
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Square(1)
    }
}

impl StructuringElement {
    /// Reject zero-radius elements
    pub fn validate(&self) -> Result<()> {
        if self.radius() == 0 {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: "0".to_string(),
                reason: "structuring element radius must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn radius(&self) -> usize {
        match self {
            StructuringElement::Square(r)
            | StructuringElement::Cross(r)
            | StructuringElement::Disk(r) => *r,
        }
    }

    /// (dr, dc) offsets relative to the center for all active cells
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        match self {
            StructuringElement::Square(r) => Neighborhood::Square(*r).offsets(),
            StructuringElement::Disk(r) => Neighborhood::Circle(*r).offsets(),
            StructuringElement::Cross(r) => {
                let r = *r as isize;
                let mut offsets = Vec::with_capacity(4 * r as usize + 1);
                for d in -r..=r {
                    offsets.push((d, 0));
                    if d != 0 {
                        offsets.push((0, d));
                    }
                }
                offsets
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_offsets() {
        let offsets = StructuringElement::Square(1).offsets();
        assert_eq!(offsets.len(), 9);
        assert!(offsets.contains(&(-1, -1)));
        assert!(offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_cross_offsets() {
        let offsets = StructuringElement::Cross(2).offsets();
        assert_eq!(offsets.len(), 9);
        assert!(offsets.contains(&(0, -2)));
        assert!(offsets.contains(&(2, 0)));
        assert!(!offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_validate_zero_radius() {
        assert!(StructuringElement::Square(0).validate().is_err());
        assert!(StructuringElement::Cross(0).validate().is_err());
        assert!(StructuringElement::Disk(0).validate().is_err());
        assert!(StructuringElement::Disk(1).validate().is_ok());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&StructuringElement::Disk(2)).unwrap();
        assert_eq!(json, r#"{"shape":"disk","radius":2}"#);
        let back: StructuringElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StructuringElement::Disk(2));
    }
}
