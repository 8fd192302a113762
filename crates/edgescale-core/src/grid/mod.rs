//! GRID - The pixel container
//!
//! `Grid` is the image type shared by every crate in the workspace: a
//! contiguous byte buffer of 8-bit samples with a fixed number of
//! interleaved channels.
//!
//! # Sample layout
//!
//! - One byte per sample, no row padding
//! - Channels are interleaved: `index = channels * (y * width + x) + channel`
//! - 1 channel is gray, 2 gray+alpha, 3 RGB, 4 RGBA
//!
//! # Ownership model
//!
//! `Grid` uses `Arc` for efficient cloning (shared ownership).
//! To modify sample data, convert to `GridMut` via [`Grid::try_into_mut`]
//! or [`Grid::to_mut`], then convert back with `Into<Grid>`.

mod access;
pub mod compare;

pub use access::SampleRead;
pub use compare::SampleDiffResult;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: u32 = 4;

/// Internal grid data
#[derive(Debug)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Interleaved samples per pixel
    channels: u32,
    /// Sample bytes, `width * height * channels` long
    data: Vec<u8>,
}

impl GridData {
    fn zeroed(width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = Self::checked_len(width, height, channels)?;
        Ok(GridData {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    fn checked_len(width: u32, height: u32, channels: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(Error::InvalidChannels(channels));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Buffer index of a sample, or `None` when any coordinate is out of range.
    #[inline]
    fn index(&self, x: u32, y: u32, channel: u32) -> Option<usize> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        let pixel = y as usize * self.width as usize + x as usize;
        Some(pixel * self.channels as usize + channel as usize)
    }

    fn out_of_bounds(&self, x: u32, y: u32, channel: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            channel,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}

impl Clone for GridData {
    fn clone(&self) -> Self {
        GridData {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.clone(),
        }
    }
}

/// GRID - Immutable pixel container
///
/// Cloning a `Grid` shares the sample buffer.
///
/// # Examples
///
/// ```
/// use edgescale_core::Grid;
///
/// // Create a new single-channel 640x480 grid
/// let grid = Grid::new(640, 480, 1).unwrap();
/// assert_eq!(grid.width(), 640);
/// assert_eq!(grid.height(), 480);
/// assert_eq!(grid.at(10, 10, 0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    inner: Arc<GridData>,
}

impl Grid {
    /// Create a new zero-initialized grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::InvalidChannels`] if `channels` is not in `1..=4`.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Ok(Grid {
            inner: Arc::new(GridData::zeroed(width, height, channels)?),
        })
    }

    /// Wrap an existing interleaved sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `data.len()` is not
    /// `width * height * channels`, plus the errors of [`Grid::new`].
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = GridData::checked_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Grid {
            inner: Arc::new(GridData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Create a grid by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, channels: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, u32) -> u8,
    {
        let mut grid = GridMut::new(width, height, channels)?;
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    grid.put(x, y, c, f(x, y, c));
                }
            }
        }
        Ok(grid.into())
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of one row, all channels interleaved.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        assert!(y < self.inner.height, "row {y} out of bounds");
        let stride = self.inner.width as usize * self.inner.channels as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Check if two grids have the same width, height and channel count.
    pub fn sizes_equal(&self, other: &Grid) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Geometry as a `(width, height, channels)` triple.
    #[inline]
    pub fn geometry(&self) -> (u32, u32, u32) {
        (self.inner.width, self.inner.height, self.inner.channels)
    }

    /// Create a deep copy of this grid.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Grid {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<GridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GridMut { inner: data }),
            Err(arc) => Err(Grid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> GridMut {
        GridMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable grid
///
/// Allows modification of sample data. Convert back to an immutable
/// [`Grid`] using `Into<Grid>`.
#[derive(Debug)]
pub struct GridMut {
    inner: GridData,
}

impl GridMut {
    /// Create a new zero-initialized mutable grid.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::new`].
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Ok(GridMut {
            inner: GridData::zeroed(width, height, channels)?,
        })
    }

    /// Get the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<GridMut> for Grid {
    fn from(grid_mut: GridMut) -> Self {
        Grid {
            inner: Arc::new(grid_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(100, 200, 3).unwrap();
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 200);
        assert_eq!(grid.channels(), 3);
        assert_eq!(grid.data().len(), 100 * 200 * 3);
        assert!(grid.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_grid_creation_invalid() {
        assert!(matches!(
            Grid::new(0, 100, 1),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(100, 0, 1),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(Grid::new(10, 10, 0), Err(Error::InvalidChannels(0))));
        assert!(matches!(Grid::new(10, 10, 5), Err(Error::InvalidChannels(5))));
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(Grid::from_raw(2, 2, 1, vec![1, 2, 3, 4]).is_ok());
        match Grid::from_raw(2, 2, 3, vec![0; 5]) {
            Err(Error::BufferLength { expected, actual }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_interleaved_layout() {
        let grid = Grid::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.at(0, 0, 2), 3);
        assert_eq!(grid.at(1, 0, 0), 4);
        assert_eq!(grid.row_data(0), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_grid_clone_shares_data() {
        let grid1 = Grid::new(16, 16, 1).unwrap();
        let grid2 = grid1.clone();

        assert_eq!(grid1.data().as_ptr(), grid2.data().as_ptr());
    }

    #[test]
    fn test_grid_deep_clone() {
        let grid1 = Grid::new(16, 16, 1).unwrap();
        let grid2 = grid1.deep_clone();

        assert_ne!(grid1.data().as_ptr(), grid2.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut_requires_unique_owner() {
        let grid = Grid::new(4, 4, 1).unwrap();
        let shared = grid.clone();
        let grid = grid.try_into_mut().unwrap_err();
        drop(shared);
        let mut grid_mut = grid.try_into_mut().unwrap();
        grid_mut.fill(7);
        let grid: Grid = grid_mut.into();
        assert!(grid.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_to_mut_is_independent() {
        let grid = Grid::new(4, 4, 1).unwrap();
        let mut copy = grid.to_mut();
        copy.put(1, 1, 0, 9);
        assert_eq!(grid.at(1, 1, 0), 0);
        assert_eq!(copy.at(1, 1, 0), 9);
    }

    #[test]
    fn test_from_fn() {
        let grid = Grid::from_fn(3, 2, 2, |x, y, c| (x + 10 * y + 100 * c) as u8).unwrap();
        assert_eq!(grid.at(2, 1, 0), 12);
        assert_eq!(grid.at(2, 1, 1), 112);
    }
}
