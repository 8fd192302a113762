//! Bilinear resampling
//!
//! Uniform four-tap blend of each sampling cell, for any target size.
//! Serves as the non-adaptive baseline the edge-adaptive doubler is
//! compared against.

use crate::TransformResult;
use crate::sampling::{Cell, resample_cells};
use edgescale_core::Grid;

/// Bilinear blend of one cell.
#[inline]
pub fn bilinear_single(cell: &Cell) -> f64 {
    let Cell {
        p1,
        p2,
        p3,
        p4,
        dx,
        dy,
    } = *cell;
    (1.0 - dx) * (1.0 - dy) * p1 + dx * (1.0 - dy) * p2 + (1.0 - dx) * dy * p3 + dx * dy * p4
}

/// Resample `src` to `width x height` with bilinear interpolation.
///
/// # Errors
///
/// Returns [`crate::TransformError::InvalidParameters`] if either target
/// dimension is zero.
pub fn scale_bilinear(src: &Grid, width: u32, height: u32) -> TransformResult<Grid> {
    resample_cells(src, width, height, bilinear_single)
}
