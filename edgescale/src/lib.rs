//! edgescale - Edge-adaptive image upscaling
//!
//! Facade over the workspace crates:
//!
//! - [`edgescale_core`] - pixel grid (re-exported at the top level)
//! - [`io`] - PNG / PNM reading and writing
//! - [`transform`] - edge-adaptive scale doubling plus bilinear and
//!   triangulation baselines
//!
//! # Examples
//!
//! ```
//! use edgescale::Grid;
//! use edgescale::transform::{ScaleMethod, scale};
//!
//! let src = Grid::from_fn(8, 8, 1, |x, y, _| (x * 20 + y * 5) as u8).unwrap();
//! let out = scale(&src, 2.0, ScaleMethod::Ais).unwrap();
//! assert_eq!((out.width(), out.height()), (15, 15));
//! ```

pub use edgescale_core::*;

pub use edgescale_io as io;
pub use edgescale_transform as transform;
