//! Edge classification and per-sample interpolation
//!
//! A target sample is classified from its two strong-edge gradients. A
//! dominant orientation selects a four-tap cubic along the edge; otherwise
//! the four known neighbours are blended with weights that fall off with
//! their weak-edge gradients.

use super::gradient::{
    Lattice, NEG_DIAGONAL_TAPS, NEIGHBOURS, Offset, POS_DIAGONAL_TAPS, strong_gradients, tap,
    weak_gradients,
};
use edgescale_core::SampleRead;

/// Default difference between the strong gradients that marks an edge.
pub const EDGE_THRESHOLD: i32 = 100;

/// Cubic kernel applied along a detected edge.
pub const CUBIC_TAPS: [f64; 4] = [-1.0 / 16.0, 9.0 / 16.0, 9.0 / 16.0, -1.0 / 16.0];

/// Numerator of the non-edge weights.
pub const WEIGHT_SCALE: f64 = 0.25;

/// Added to each weak gradient so a flat neighbourhood does not divide by zero.
pub const WEIGHT_EPSILON: i32 = 1;

/// Outcome of edge classification for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Edge along the (1, 1) diagonal of the frame
    NegDiagonal,
    /// Edge along the (1, -1) diagonal of the frame
    PosDiagonal,
    /// No dominant orientation
    NonEdge,
}

/// Classify from the two strong gradients.
#[inline]
pub fn classify(gradient_1: i32, gradient_2: i32, threshold: i32) -> EdgeClass {
    if gradient_1 - gradient_2 > threshold {
        EdgeClass::NegDiagonal
    } else if gradient_2 - gradient_1 > threshold {
        EdgeClass::PosDiagonal
    } else {
        EdgeClass::NonEdge
    }
}

/// Normalized blend weights for the four neighbours.
///
/// Each raw weight is `WEIGHT_SCALE / (gradient + WEIGHT_EPSILON)`; the
/// result sums to 1.
pub fn non_edge_weights(gradients: [i32; 4]) -> [f64; 4] {
    let raw = gradients.map(|g| WEIGHT_SCALE / (g + WEIGHT_EPSILON) as f64);
    let total: f64 = raw.iter().sum();
    raw.map(|w| w / total)
}

/// Saturate to `[0, 255]` and truncate toward zero.
#[inline]
pub fn clamp_sample(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

fn cubic<S: SampleRead>(
    grid: &S,
    lattice: Lattice,
    taps: &[Offset; 4],
    x: u32,
    y: u32,
    channel: u32,
) -> f64 {
    taps.iter()
        .zip(CUBIC_TAPS)
        .map(|(&o, k)| k * tap(grid, x, y, lattice.orient(o), channel) as f64)
        .sum()
}

/// Interpolate one sample at `(x, y, channel)`.
///
/// Reads only the taps of `lattice`'s footprint; writes nothing.
pub fn interpolate<S: SampleRead>(
    grid: &S,
    lattice: Lattice,
    x: u32,
    y: u32,
    channel: u32,
    threshold: i32,
) -> (u8, EdgeClass) {
    let (g1, g2) = strong_gradients(grid, lattice, x, y, channel);
    let class = classify(g1, g2, threshold);
    let value = match class {
        EdgeClass::NegDiagonal => cubic(grid, lattice, &NEG_DIAGONAL_TAPS, x, y, channel),
        EdgeClass::PosDiagonal => cubic(grid, lattice, &POS_DIAGONAL_TAPS, x, y, channel),
        EdgeClass::NonEdge => {
            let weights = non_edge_weights(weak_gradients(grid, lattice, x, y, channel));
            NEIGHBOURS
                .iter()
                .zip(weights)
                .map(|(&(o, _), w)| w * tap(grid, x, y, lattice.orient(o), channel) as f64)
                .sum()
        }
    };
    (clamp_sample(value), class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgescale_core::Grid;

    #[test]
    fn test_classify_threshold_is_strict() {
        assert_eq!(classify(201, 100, 100), EdgeClass::NegDiagonal);
        assert_eq!(classify(200, 100, 100), EdgeClass::NonEdge);
        assert_eq!(classify(100, 201, 100), EdgeClass::PosDiagonal);
        assert_eq!(classify(100, 200, 100), EdgeClass::NonEdge);
        assert_eq!(classify(0, 0, 100), EdgeClass::NonEdge);
        assert_eq!(classify(5, 0, 0), EdgeClass::NegDiagonal);
    }

    #[test]
    fn test_non_edge_weights_sum_to_one() {
        for gradients in [[0, 0, 0, 0], [120, 80, 80, 120], [0, 1000, 3, 7], [5, 5, 5, 900]] {
            let weights = non_edge_weights(gradients);
            let sum: f64 = weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "{:?}", gradients);
            assert!(weights.iter().all(|&w| w > 0.0));
        }
        assert_eq!(non_edge_weights([0; 4]), [0.25; 4]);
    }

    #[test]
    fn test_non_edge_weights_favor_flat_side() {
        let weights = non_edge_weights([0, 99, 99, 99]);
        // 1/1 against 1/100: the flat neighbour gets 100x the weight.
        assert!((weights[0] / weights[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_sample_truncates() {
        assert_eq!(clamp_sample(-31.875), 0);
        assert_eq!(clamp_sample(286.875), 255);
        assert_eq!(clamp_sample(127.99), 127);
        assert_eq!(clamp_sample(0.5), 0);
    }

    #[test]
    fn test_cubic_undershoot_is_clamped() {
        // Along the (1, 1) diagonal: 255, 0, 0, 255 -> -31.875.
        // Everything off that diagonal is 255, so gradient_1 dominates.
        let grid = Grid::from_fn(7, 7, 1, |x, y, _| {
            if x == y && (x == 2 || x == 4) { 0 } else { 255 }
        })
        .unwrap();
        let (g1, g2) = strong_gradients(&grid, Lattice::Diagonal, 3, 3, 0);
        assert!(g1 - g2 > EDGE_THRESHOLD, "g1 = {g1}, g2 = {g2}");
        let (value, class) = interpolate(&grid, Lattice::Diagonal, 3, 3, 0, EDGE_THRESHOLD);
        assert_eq!(class, EdgeClass::NegDiagonal);
        assert_eq!(value, 0);
    }

    #[test]
    fn test_flat_neighbourhood_is_reproduced() {
        let grid = Grid::from_fn(7, 7, 1, |_, _, _| 173).unwrap();
        for lattice in [Lattice::Diagonal, Lattice::Axis] {
            let (value, class) = interpolate(&grid, lattice, 3, 3, 0, EDGE_THRESHOLD);
            assert_eq!(class, EdgeClass::NonEdge);
            assert_eq!(value, 173);
        }
    }

    #[test]
    fn test_ramp_blend_is_near_linear() {
        let grid = Grid::from_fn(7, 7, 1, |x, y, _| (2 * x + 10 * y) as u8).unwrap();
        // Diagonal frame at (3, 3): 112 vs 168 is below the threshold.
        let (value, class) = interpolate(&grid, Lattice::Diagonal, 3, 3, 0, EDGE_THRESHOLD);
        assert_eq!(class, EdgeClass::NonEdge);
        assert!((value as i32 - 36).abs() <= 1, "value = {value}");
        // A lower threshold turns the same window into an edge.
        let (_, class) = interpolate(&grid, Lattice::Diagonal, 3, 3, 0, 50);
        assert_eq!(class, EdgeClass::PosDiagonal);
    }
}
