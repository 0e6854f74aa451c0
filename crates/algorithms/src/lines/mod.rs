//! Horizontal streak detection
//!
//! Light-barrier imagery picks up thin horizontal streaks that are not part
//! of the plant. They show up in a scanline profile as contiguous runs with
//! no foreground directly above or below.

mod isolated;

pub use isolated::{
    erase_isolated_lines, HorizontalLine, IsolatedLineDetector, IsolatedLineParams, IsolatedLines,
    StreakRemoval, SOLID_BAND_SOLIDITY,
};
