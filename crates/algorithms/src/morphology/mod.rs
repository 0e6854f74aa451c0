//! Binary morphology over masks
//!
//! - **Erosion**: shrinks foreground blobs
//! - **Dilation**: grows foreground blobs
//! - **Gradient**: dilation minus erosion, the blob contours; the inner
//!   gradient keeps only the pixels erosion strips
//!
//! Pixels outside the mask never count, so blobs touching the border keep
//! their border-side pixels and produce no contour there.

mod dilate;
mod element;
mod erode;
mod gradient;

pub use dilate::{dilate, Dilate, DilateParams};
pub use element::StructuringElement;
pub use erode::{erode, Erode, ErodeParams};
pub use gradient::{gradient, inner_gradient, Gradient, GradientParams};
