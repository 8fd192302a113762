//! Windowed gradient estimation
//!
//! A gradient is the sum of absolute differences over a fixed
//! constellation of sample pairs around a target position. Each
//! constellation is stored once, in the diagonal frame used by the first
//! fill stage, as a list of start offsets plus one constant step: every
//! pair is `(start, start + step)`.
//!
//! The second stage fills positions whose known neighbours sit directly
//! above, below, left and right instead of on the diagonals. Its windows
//! are the same constellations turned by 45 degrees, see
//! [`Lattice::orient`].

use edgescale_core::SampleRead;

/// Offset in output-grid pixels, `(dx, dy)`
pub type Offset = (i32, i32);

/// A gradient window: pair starts plus the step to each pair's partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First sample of each pair
    pub starts: &'static [Offset],
    /// Offset from each start to its partner
    pub step: Offset,
}

impl Window {
    /// Iterate over the `(start, partner)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Offset, Offset)> + '_ {
        let (sx, sy) = self.step;
        self.starts
            .iter()
            .map(move |&(dx, dy)| ((dx, dy), (dx + sx, dy + sy)))
    }
}

/// Strong-edge window sensitive to an edge running along the (1, 1) diagonal.
pub const STRONG_1: Window = Window {
    starts: &[(-3, -1), (-3, 1), (-1, -1), (-1, 1), (-1, 3), (1, 1), (1, 3)],
    step: (2, -2),
};

/// Strong-edge window sensitive to an edge running along the (1, -1) diagonal.
pub const STRONG_2: Window = Window {
    starts: &[(-3, -1), (-3, 1), (-1, -3), (-1, -1), (-1, 1), (1, -3), (1, -1)],
    step: (2, 2),
};

/// Weak-edge window for the upper-left neighbour.
pub const UPPER_LEFT: Window = Window {
    starts: &[(1, -3), (-1, -3), (-3, -3), (-3, -1), (-3, 1)],
    step: (2, 2),
};

/// Weak-edge window for the upper-right neighbour.
pub const UPPER_RIGHT: Window = Window {
    starts: &[(1, -1), (-1, -1), (-3, -1), (1, 1), (1, 3)],
    step: (2, -2),
};

/// Weak-edge window for the lower-left neighbour.
pub const LOWER_LEFT: Window = Window {
    starts: &[(1, 3), (-1, 3), (-3, 3), (-3, 1), (-3, -1)],
    step: (2, -2),
};

/// Weak-edge window for the lower-right neighbour.
pub const LOWER_RIGHT: Window = Window {
    starts: &[(1, 1), (-1, 1), (-3, 1), (1, -1), (1, -3)],
    step: (2, 2),
};

/// The four known neighbours blended for a non-edge, with their weak windows.
///
/// Diagonal frame order: upper-left, upper-right, lower-left, lower-right.
/// In the axis frame the same entries become up, right, left, down.
pub const NEIGHBOURS: [(Offset, Window); 4] = [
    ((-1, -1), UPPER_LEFT),
    ((1, -1), UPPER_RIGHT),
    ((-1, 1), LOWER_LEFT),
    ((1, 1), LOWER_RIGHT),
];

/// Cubic taps along the (1, 1) diagonal.
pub const NEG_DIAGONAL_TAPS: [Offset; 4] = [(-3, -3), (-1, -1), (1, 1), (3, 3)];

/// Cubic taps along the (1, -1) diagonal.
pub const POS_DIAGONAL_TAPS: [Offset; 4] = [(-3, 3), (-1, 1), (1, -1), (3, -3)];

/// Coordinate frame a window is read in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lattice {
    /// Known samples on the diagonals (first stage)
    Diagonal,
    /// Known samples on the axes (second stage)
    Axis,
}

impl Lattice {
    /// Map a diagonal-frame offset into this frame.
    ///
    /// The axis frame applies `(dx, dy) -> ((dx - dy) / 2, (dx + dy) / 2)`.
    /// Every tabulated offset has odd components, so the halving is exact.
    #[inline]
    pub const fn orient(self, offset: Offset) -> Offset {
        match self {
            Lattice::Diagonal => offset,
            Lattice::Axis => ((offset.0 - offset.1) / 2, (offset.0 + offset.1) / 2),
        }
    }
}

/// Read one tap, widened to `i32`.
///
/// # Panics
///
/// Panics if the tap falls outside the grid. Callers keep every window
/// inside its stage margin, so this is a programming error.
#[inline]
pub(crate) fn tap<S: SampleRead>(grid: &S, x: u32, y: u32, offset: Offset, channel: u32) -> i32 {
    let tx = x as i64 + offset.0 as i64;
    let ty = y as i64 + offset.1 as i64;
    if tx < 0 || ty < 0 || tx >= grid.width() as i64 || ty >= grid.height() as i64 {
        panic!(
            "window tap ({}, {}) from center ({}, {}) outside {}x{} grid",
            tx,
            ty,
            x,
            y,
            grid.width(),
            grid.height()
        );
    }
    grid.at(tx as u32, ty as u32, channel) as i32
}

/// Sum of absolute differences over `window` centered at `(x, y)`.
pub fn window_gradient<S: SampleRead>(
    grid: &S,
    lattice: Lattice,
    window: &Window,
    x: u32,
    y: u32,
    channel: u32,
) -> i32 {
    window
        .pairs()
        .map(|(a, b)| {
            let va = tap(grid, x, y, lattice.orient(a), channel);
            let vb = tap(grid, x, y, lattice.orient(b), channel);
            (va - vb).abs()
        })
        .sum()
}

/// The two strong-edge gradients `(gradient_1, gradient_2)`.
pub fn strong_gradients<S: SampleRead>(
    grid: &S,
    lattice: Lattice,
    x: u32,
    y: u32,
    channel: u32,
) -> (i32, i32) {
    (
        window_gradient(grid, lattice, &STRONG_1, x, y, channel),
        window_gradient(grid, lattice, &STRONG_2, x, y, channel),
    )
}

/// The four weak-edge gradients, in [`NEIGHBOURS`] order.
pub fn weak_gradients<S: SampleRead>(
    grid: &S,
    lattice: Lattice,
    x: u32,
    y: u32,
    channel: u32,
) -> [i32; 4] {
    NEIGHBOURS.map(|(_, window)| window_gradient(grid, lattice, &window, x, y, channel))
}

/// Every offset a position's interpolation may read, in `lattice`'s frame.
pub fn footprint(lattice: Lattice) -> Vec<Offset> {
    let mut windows = vec![STRONG_1, STRONG_2];
    windows.extend(NEIGHBOURS.iter().map(|&(_, w)| w));
    let mut offsets: Vec<Offset> = windows
        .iter()
        .flat_map(|w| w.pairs().flat_map(|(a, b)| [a, b]))
        .chain(NEIGHBOURS.iter().map(|&(o, _)| o))
        .chain(NEG_DIAGONAL_TAPS)
        .chain(POS_DIAGONAL_TAPS)
        .map(|o| lattice.orient(o))
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}
