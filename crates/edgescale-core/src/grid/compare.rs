//! Grid comparison operations
//!
//! Sample-level equality and difference statistics between two grids of
//! identical geometry. Used by the regression harness and by the
//! resampler tests to measure how far two methods disagree.

use super::Grid;
use crate::error::{Error, Result};

/// Result of counting sample differences between two grids
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDiffResult {
    /// Number of samples that differ
    pub n_diff: u64,
    /// Fraction of samples that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Largest absolute sample difference
    pub max_diff: u8,
    /// Mean absolute difference over all samples
    pub mean_abs_diff: f64,
    /// Root mean square difference over all samples
    pub rms_diff: f64,
}

impl Grid {
    /// Check if two grids have identical geometry and samples.
    pub fn equals(&self, other: &Grid) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Count differing samples and summarize the differences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the grids differ in width,
    /// height or channel count.
    pub fn count_sample_diffs(&self, other: &Grid) -> Result<SampleDiffResult> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.geometry(),
                actual: other.geometry(),
            });
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u8;
        let mut abs_sum = 0u64;
        let mut sq_sum = 0u64;
        for (&a, &b) in self.data().iter().zip(other.data()) {
            let d = a.abs_diff(b);
            if d != 0 {
                n_diff += 1;
                max_diff = max_diff.max(d);
                abs_sum += d as u64;
                sq_sum += (d as u64) * (d as u64);
            }
        }

        let total = self.data().len() as f64;
        Ok(SampleDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total,
            max_diff,
            mean_abs_diff: abs_sum as f64 / total,
            rms_diff: (sq_sum as f64 / total).sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_grids() {
        let a = Grid::from_fn(4, 4, 1, |x, y, _| (x * y) as u8).unwrap();
        let b = a.deep_clone();
        assert!(a.equals(&b));
        let diff = a.count_sample_diffs(&b).unwrap();
        assert_eq!(diff.n_diff, 0);
        assert_eq!(diff.max_diff, 0);
        assert_eq!(diff.rms_diff, 0.0);
    }

    #[test]
    fn test_diff_statistics() {
        let a = Grid::from_raw(2, 2, 1, vec![10, 10, 10, 10]).unwrap();
        let b = Grid::from_raw(2, 2, 1, vec![10, 14, 10, 6]).unwrap();
        assert!(!a.equals(&b));
        let diff = a.count_sample_diffs(&b).unwrap();
        assert_eq!(diff.n_diff, 2);
        assert_eq!(diff.fract_diff, 0.5);
        assert_eq!(diff.max_diff, 4);
        assert_eq!(diff.mean_abs_diff, 2.0);
        assert!((diff.rms_diff - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_geometry_mismatch() {
        let a = Grid::new(2, 2, 1).unwrap();
        let b = Grid::new(2, 2, 3).unwrap();
        assert!(!a.equals(&b));
        assert!(matches!(
            a.count_sample_diffs(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
