//! Sample access functions
//!
//! Every accessor is bounds-checked against width, height and channel
//! count. Two flavors exist:
//!
//! - `get` / `set` report a bad coordinate as `None` / `Err`
//! - `at` / `put` panic, for callers whose coordinates are an invariant
//!   (windowed kernels that validated their margin up front)

use super::{Grid, GridMut};
use crate::error::Result;

/// Read-only sample access shared by [`Grid`] and [`GridMut`].
///
/// Windowed kernels are written against this trait so they can run on a
/// finished grid as well as on one that is still being filled.
pub trait SampleRead {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Interleaved channels per pixel.
    fn channels(&self) -> u32;

    /// Sample at `(x, y, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    fn at(&self, x: u32, y: u32, channel: u32) -> u8;
}

impl Grid {
    /// Get a sample at (x, y, channel).
    ///
    /// Returns `None` if any coordinate is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        self.inner
            .index(x, y, channel)
            .map(|i| self.inner.data[i])
    }

    /// Get a sample at (x, y, channel).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width`, `y >= height` or `channel >= channels`.
    #[inline]
    pub fn at(&self, x: u32, y: u32, channel: u32) -> u8 {
        match self.inner.index(x, y, channel) {
            Some(i) => self.inner.data[i],
            None => panic!("{}", self.inner.out_of_bounds(x, y, channel)),
        }
    }

    /// Get all channels of the pixel at (x, y).
    ///
    /// Returns `None` if the pixel is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.inner.index(x, y, 0)?;
        Some(&self.inner.data[start..start + self.inner.channels as usize])
    }
}

impl GridMut {
    /// Get a sample at (x, y, channel).
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        self.inner
            .index(x, y, channel)
            .map(|i| self.inner.data[i])
    }

    /// Get a sample at (x, y, channel).
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32, channel: u32) -> u8 {
        match self.inner.index(x, y, channel) {
            Some(i) => self.inner.data[i],
            None => panic!("{}", self.inner.out_of_bounds(x, y, channel)),
        }
    }

    /// Set a sample at (x, y, channel).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if any coordinate is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, channel: u32, value: u8) -> Result<()> {
        let i = self
            .inner
            .index(x, y, channel)
            .ok_or_else(|| self.inner.out_of_bounds(x, y, channel))?;
        self.inner.data[i] = value;
        Ok(())
    }

    /// Set a sample at (x, y, channel).
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of bounds.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, channel: u32, value: u8) {
        match self.inner.index(x, y, channel) {
            Some(i) => self.inner.data[i] = value,
            None => panic!("{}", self.inner.out_of_bounds(x, y, channel)),
        }
    }

    /// Set all channels of the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the pixel is out of bounds and
    /// [`crate::Error::InvalidParameter`] if `values` does not hold exactly
    /// one sample per channel.
    pub fn set_pixel(&mut self, x: u32, y: u32, values: &[u8]) -> Result<()> {
        if values.len() != self.inner.channels as usize {
            return Err(crate::Error::InvalidParameter(format!(
                "expected {} samples per pixel, got {}",
                self.inner.channels,
                values.len()
            )));
        }
        let start = self
            .inner
            .index(x, y, 0)
            .ok_or_else(|| self.inner.out_of_bounds(x, y, 0))?;
        self.inner.data[start..start + values.len()].copy_from_slice(values);
        Ok(())
    }
}

impl SampleRead for Grid {
    #[inline]
    fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    fn channels(&self) -> u32 {
        self.inner.channels
    }

    #[inline]
    fn at(&self, x: u32, y: u32, channel: u32) -> u8 {
        Grid::at(self, x, y, channel)
    }
}

impl SampleRead for GridMut {
    #[inline]
    fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    fn channels(&self) -> u32 {
        self.inner.channels
    }

    #[inline]
    fn at(&self, x: u32, y: u32, channel: u32) -> u8 {
        GridMut::at(self, x, y, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(4, 3, 2).unwrap();
        assert_eq!(grid.get(3, 2, 1), Some(0));
        assert_eq!(grid.get(4, 0, 0), None);
        assert_eq!(grid.get(0, 3, 0), None);
        assert_eq!(grid.get(0, 0, 2), None);
    }

    #[test]
    fn test_set_and_put() {
        let mut grid = GridMut::new(4, 3, 2).unwrap();
        grid.set(1, 2, 1, 42).unwrap();
        grid.put(3, 0, 0, 17);
        assert_eq!(grid.at(1, 2, 1), 42);
        assert_eq!(grid.at(3, 0, 0), 17);
        assert_eq!(grid.at(1, 2, 0), 0);
    }

    #[test]
    fn test_set_out_of_bounds_is_error() {
        let mut grid = GridMut::new(4, 3, 1).unwrap();
        match grid.set(4, 0, 0, 1) {
            Err(Error::OutOfBounds { x, width, .. }) => {
                assert_eq!(x, 4);
                assert_eq!(width, 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(grid.set(0, 0, 1, 1).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_at_panics_out_of_bounds() {
        let grid = Grid::new(4, 3, 1).unwrap();
        grid.at(0, 3, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_put_panics_on_bad_channel() {
        let mut grid = GridMut::new(4, 3, 3).unwrap();
        grid.put(0, 0, 3, 1);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut grid = GridMut::new(2, 2, 3).unwrap();
        grid.set_pixel(1, 1, &[10, 20, 30]).unwrap();
        assert!(grid.set_pixel(1, 1, &[10, 20]).is_err());
        let grid: Grid = grid.into();
        assert_eq!(grid.pixel(1, 1), Some(&[10u8, 20, 30][..]));
        assert_eq!(grid.pixel(2, 1), None);
    }

    #[test]
    fn test_sample_read_trait_objects_agree() {
        fn sum<S: SampleRead>(src: &S) -> u32 {
            let mut total = 0;
            for y in 0..src.height() {
                for x in 0..src.width() {
                    for c in 0..src.channels() {
                        total += src.at(x, y, c) as u32;
                    }
                }
            }
            total
        }

        let grid = Grid::from_fn(3, 3, 1, |x, y, _| (x + y) as u8).unwrap();
        let grid_mut = grid.to_mut();
        assert_eq!(sum(&grid), 18);
        assert_eq!(sum(&grid_mut), 18);
    }
}
