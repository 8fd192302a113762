//! edgescale-core - Basic data structures for image upscaling
//!
//! This crate provides the pixel container used throughout the workspace:
//!
//! - [`Grid`] / [`GridMut`] - 8-bit interleaved pixel grid (immutable / mutable)
//! - [`SampleRead`] - read access shared by both, the seam windowed kernels use
//! - [`SampleDiffResult`] - difference statistics between two grids

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{Grid, GridMut, MAX_CHANNELS, SampleDiffResult, SampleRead};
