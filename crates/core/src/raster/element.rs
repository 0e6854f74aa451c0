//! Raster element trait for generic cell values

use num_traits::Zero;
use std::fmt::Debug;

/// Trait for types that can be stored in a raster cell.
///
/// Any non-zero value counts as foreground when a raster is read as a
/// binary mask.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + Zero + Send + Sync + 'static
{
    /// Whether this value is a foreground pixel
    fn is_foreground(&self) -> bool {
        !self.is_zero()
    }
}

impl RasterElement for u8 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_u8() {
        assert!(!0u8.is_foreground());
        assert!(1u8.is_foreground());
        assert!(255u8.is_foreground());
    }
}
