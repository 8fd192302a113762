//! Shared 2x2-cell sampling grid for the baseline resamplers
//!
//! Each output pixel `(dx, dy)` maps to source position
//! `s = (src_dim / dst_dim) * d`. The cell's upper-left corner is
//! `floor(s)`, the fractional part is the distance into the cell, and the
//! right/lower corners are clamped to the last column/row.

use crate::ais::classify::clamp_sample;
use crate::{TransformError, TransformResult};
use edgescale_core::{Grid, GridMut};

/// The four corners of a sampling cell, in reading order, plus the
/// fractional distances `(dx, dy)` into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Source index and fractional distance for every output coordinate.
fn axis_map(src_len: u32, dst_len: u32) -> Vec<(u32, u32, f64)> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let s = scale * d as f64;
            let lo = (s.floor() as u32).min(src_len - 1);
            let hi = (lo + 1).min(src_len - 1);
            (lo, hi, s - s.floor())
        })
        .collect()
}

/// Resample `src` to `width x height`, evaluating `kernel` once per cell
/// and channel.
pub(crate) fn resample_cells<K>(
    src: &Grid,
    width: u32,
    height: u32,
    kernel: K,
) -> TransformResult<Grid>
where
    K: Fn(&Cell) -> f64,
{
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size {}x{} must be non-zero",
            width, height
        )));
    }

    let xs = axis_map(src.width(), width);
    let ys = axis_map(src.height(), height);
    let mut dst = GridMut::new(width, height, src.channels())?;

    for (y, &(y0, y1, dy)) in ys.iter().enumerate() {
        for (x, &(x0, x1, dx)) in xs.iter().enumerate() {
            for c in 0..src.channels() {
                let cell = Cell {
                    p1: src.at(x0, y0, c) as f64,
                    p2: src.at(x1, y0, c) as f64,
                    p3: src.at(x0, y1, c) as f64,
                    p4: src.at(x1, y1, c) as f64,
                    dx,
                    dy,
                };
                dst.put(x as u32, y as u32, c, clamp_sample(kernel(&cell)));
            }
        }
    }

    Ok(dst.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_map_doubling() {
        let map = axis_map(3, 6);
        assert_eq!(map[0], (0, 1, 0.0));
        assert_eq!(map[1], (0, 1, 0.5));
        assert_eq!(map[2], (1, 2, 0.0));
        // last source column is clamped
        assert_eq!(map[4], (2, 2, 0.0));
        assert_eq!(map[5], (2, 2, 0.5));
    }

    #[test]
    fn test_axis_map_downscale() {
        let map = axis_map(10, 4);
        let starts: Vec<u32> = map.iter().map(|m| m.0).collect();
        assert_eq!(starts, vec![0, 2, 5, 7]);
    }

    #[test]
    fn test_zero_target_rejected() {
        let src = Grid::new(4, 4, 1).unwrap();
        assert!(resample_cells(&src, 0, 4, |c| c.p1).is_err());
        assert!(resample_cells(&src, 4, 0, |c| c.p1).is_err());
    }

    #[test]
    fn test_nearest_kernel_copies_corner() {
        let src = Grid::from_fn(3, 2, 3, |x, y, c| (x * 10 + y * 100 + c) as u8).unwrap();
        let out = resample_cells(&src, 3, 2, |c| c.p1).unwrap();
        assert!(out.equals(&src));
    }
}
