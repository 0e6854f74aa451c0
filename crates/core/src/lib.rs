//! # phenomask core
//!
//! Core types and traits shared by the phenomask mask-analysis algorithms.
//!
//! This crate provides:
//! - `Raster<T>`: Generic 2D grid type backed by `ndarray`
//! - `Mask`: Single-channel binary raster (`Raster<u8>`, foreground = non-zero)
//! - `Neighborhood`: Offset patterns used by morphology and line painting
//! - `Error` / `Result`: Typed failures returned by every algorithm
//! - Algorithm traits for consistent API

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Mask, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Mask, Neighborhood, Raster, RasterElement};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in phenomask.
///
/// Algorithms are pipeline "tools": a named transform from an input to an
/// output, steered by a plain parameter struct.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
