//! Edge-adaptive scale doubling
//!
//! Doubles a `W x H` grid into a `(2W - 1) x (2H - 1)` grid in three passes:
//!
//! 1. **Seed**: `out(2i, 2j) = src(i, j)`.
//! 2. **Diagonal fill**: positions with both coordinates odd. Their known
//!    neighbours are the four seeded diagonals.
//! 3. **Axis fill**: positions with exactly one odd coordinate. Their known
//!    neighbours are seeded samples on one axis and diagonal-fill results
//!    on the other, so this pass must run strictly after pass 2.
//!
//! Each interior sample is classified independently per channel (see
//! [`classify`]) and computed by a cubic along a dominant edge or by a
//! gradient-weighted blend.
//!
//! The passes are chained as types (`Seeded` then `DiagonalFilled`), so an
//! axis fill cannot run before the diagonal fill it depends on.
//!
//! # Margins
//!
//! A position is filled when every tap it reads is inside the grid. The
//! bands are derived from the window footprints by [`Placement::margins`],
//! which gives 3 on every side for all three placements.
//!
//! Samples outside their band are never written and keep the value 0.
//! Near the border the axis fill also reads diagonal positions the
//! diagonal fill never wrote, so it blends or extrapolates against those
//! zeros instead of real samples.

pub mod classify;
pub mod gradient;

use crate::{TransformError, TransformResult};
use classify::{EDGE_THRESHOLD, EdgeClass, interpolate};
use edgescale_core::{Grid, GridMut};
use gradient::{Lattice, footprint};
use log::debug;

/// Smallest source width and height accepted by [`double_scale`].
pub const MIN_SOURCE_SIZE: u32 = 7;

/// Options for scale doubling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AisOptions {
    /// Strong-gradient difference above which a sample is treated as an edge
    pub threshold: i32,
}

impl Default for AisOptions {
    fn default() -> Self {
        Self {
            threshold: EDGE_THRESHOLD,
        }
    }
}

impl AisOptions {
    /// Set the edge threshold
    pub fn threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// How many samples of one pass took each [`EdgeClass`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub neg_diagonal: u64,
    pub pos_diagonal: u64,
    pub non_edge: u64,
}

impl ClassCounts {
    fn record(&mut self, class: EdgeClass) {
        match class {
            EdgeClass::NegDiagonal => self.neg_diagonal += 1,
            EdgeClass::PosDiagonal => self.pos_diagonal += 1,
            EdgeClass::NonEdge => self.non_edge += 1,
        }
    }

    /// Samples written by the pass.
    pub fn total(&self) -> u64 {
        self.neg_diagonal + self.pos_diagonal + self.non_edge
    }

    /// Samples resolved by the directional cubic.
    pub fn edges(&self) -> u64 {
        self.neg_diagonal + self.pos_diagonal
    }
}

/// Classification statistics for one doubling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AisReport {
    /// Diagonal fill (both coordinates odd)
    pub diagonal: ClassCounts,
    /// Axis fill (exactly one coordinate odd), both orientations
    pub axis: ClassCounts,
}

/// Where an interior position sits relative to its known neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// x odd, y odd
    Diagonal,
    /// x odd, y even
    Horizontal,
    /// x even, y odd
    Vertical,
}

/// Distance a band keeps from each border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Placement {
    /// Frame the interpolation windows are read in.
    pub fn lattice(self) -> Lattice {
        match self {
            Placement::Diagonal => Lattice::Diagonal,
            Placement::Horizontal | Placement::Vertical => Lattice::Axis,
        }
    }

    /// Parity of `(x, y)` for this placement, `true` meaning odd.
    pub fn parity(self) -> (bool, bool) {
        match self {
            Placement::Diagonal => (true, true),
            Placement::Horizontal => (true, false),
            Placement::Vertical => (false, true),
        }
    }

    /// Margins that keep every tap of the footprint in bounds.
    pub fn margins(self) -> Margins {
        let (mut left, mut right, mut top, mut bottom) = (0i32, 0i32, 0i32, 0i32);
        for (dx, dy) in footprint(self.lattice()) {
            left = left.max(-dx);
            right = right.max(dx);
            top = top.max(-dy);
            bottom = bottom.max(dy);
        }
        Margins {
            left: left as u32,
            right: right as u32,
            top: top as u32,
            bottom: bottom as u32,
        }
    }

    /// Every position of this placement inside its band of a `width x height` grid.
    pub fn positions(self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        let m = self.margins();
        let (px, py) = self.parity();
        let ys = band(m.top, height.checked_sub(m.bottom + 1), py);
        let xs = band(m.left, width.checked_sub(m.right + 1), px);
        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
    }
}

/// Values in `[lo, hi]` with the requested parity.
fn band(lo: u32, hi: Option<u32>, odd: bool) -> std::iter::StepBy<std::ops::RangeInclusive<u32>> {
    let start = if (lo % 2 == 1) == odd { lo } else { lo + 1 };
    match hi {
        Some(hi) if hi >= start => (start..=hi).step_by(2),
        #[allow(clippy::reversed_empty_ranges)]
        _ => (1..=0).step_by(2),
    }
}

/// Output geometry for a `width x height` source.
pub fn output_size(width: u32, height: u32) -> (u32, u32) {
    (2 * width - 1, 2 * height - 1)
}

/// Copy every source sample to its even-coordinate output position.
///
/// Overwrites only the seeded positions, so running it twice is the same
/// as running it once.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if `dst` is not
/// `(2W - 1) x (2H - 1)` with the source's channel count.
pub fn seed_into(src: &Grid, dst: &mut GridMut) -> TransformResult<()> {
    let (ow, oh) = output_size(src.width(), src.height());
    if (dst.width(), dst.height(), dst.channels()) != (ow, oh, src.channels()) {
        return Err(TransformError::InvalidParameters(format!(
            "seed target is {}x{}x{}, expected {}x{}x{}",
            dst.width(),
            dst.height(),
            dst.channels(),
            ow,
            oh,
            src.channels()
        )));
    }

    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..src.channels() {
                dst.put(2 * x, 2 * y, c, src.at(x, y, c));
            }
        }
    }
    Ok(())
}

/// Output grid after seeding
struct Seeded {
    grid: GridMut,
}

/// Output grid after the diagonal fill
struct DiagonalFilled {
    grid: GridMut,
}

impl Seeded {
    fn new(src: &Grid) -> TransformResult<Self> {
        let (ow, oh) = output_size(src.width(), src.height());
        let mut grid = GridMut::new(ow, oh, src.channels())?;
        seed_into(src, &mut grid)?;
        Ok(Self { grid })
    }

    fn fill_diagonal(mut self, options: &AisOptions, counts: &mut ClassCounts) -> DiagonalFilled {
        fill(&mut self.grid, Placement::Diagonal, options, counts);
        DiagonalFilled { grid: self.grid }
    }
}

impl DiagonalFilled {
    fn fill_axis(mut self, options: &AisOptions, counts: &mut ClassCounts) -> Grid {
        fill(&mut self.grid, Placement::Horizontal, options, counts);
        fill(&mut self.grid, Placement::Vertical, options, counts);
        self.grid.into()
    }
}

fn fill(grid: &mut GridMut, placement: Placement, options: &AisOptions, counts: &mut ClassCounts) {
    let lattice = placement.lattice();
    let channels = grid.channels();
    for (x, y) in placement.positions(grid.width(), grid.height()) {
        for c in 0..channels {
            let (value, class) = interpolate(&*grid, lattice, x, y, c, options.threshold);
            grid.put(x, y, c, value);
            counts.record(class);
        }
    }
}

/// Double a grid with the default options.
///
/// # Errors
///
/// Returns [`TransformError::SourceTooSmall`] if either dimension is
/// below [`MIN_SOURCE_SIZE`].
pub fn double_scale(src: &Grid) -> TransformResult<Grid> {
    double_scale_with(src, &AisOptions::default())
}

/// Double a grid.
pub fn double_scale_with(src: &Grid, options: &AisOptions) -> TransformResult<Grid> {
    double_scale_with_report(src, options).map(|(grid, _)| grid)
}

/// Double a grid and report how each pass classified its samples.
pub fn double_scale_with_report(
    src: &Grid,
    options: &AisOptions,
) -> TransformResult<(Grid, AisReport)> {
    if src.width() < MIN_SOURCE_SIZE || src.height() < MIN_SOURCE_SIZE {
        return Err(TransformError::SourceTooSmall {
            width: src.width(),
            height: src.height(),
            min: MIN_SOURCE_SIZE,
        });
    }

    let mut report = AisReport::default();
    debug!(
        "double_scale start {}x{}x{} threshold={}",
        src.width(),
        src.height(),
        src.channels(),
        options.threshold
    );

    let seeded = Seeded::new(src)?;
    let filled = seeded.fill_diagonal(options, &mut report.diagonal);
    debug!(
        "double_scale diagonal fill: {} samples, {} neg / {} pos edges",
        report.diagonal.total(),
        report.diagonal.neg_diagonal,
        report.diagonal.pos_diagonal
    );

    let grid = filled.fill_axis(options, &mut report.axis);
    debug!(
        "double_scale axis fill: {} samples, {} neg / {} pos edges",
        report.axis.total(),
        report.axis.neg_diagonal,
        report.axis.pos_diagonal
    );

    Ok((grid, report))
}
