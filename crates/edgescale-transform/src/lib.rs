//! edgescale-transform - Image upscaling for edgescale
//!
//! This crate provides:
//!
//! - Edge-adaptive scale doubling ([`ais`]): gradient windows, edge
//!   classification and the two-stage fill
//! - Bilinear resampling ([`bilinear`])
//! - Pixel-level data-dependent triangulation ([`imddt`])
//! - A single [`scale`] entry point selecting among them

pub mod ais;
pub mod bilinear;
mod error;
pub mod imddt;
mod sampling;
pub mod scale;

pub use ais::classify::{EDGE_THRESHOLD, EdgeClass};
pub use ais::{
    AisOptions, AisReport, ClassCounts, MIN_SOURCE_SIZE, double_scale, double_scale_with,
    double_scale_with_report, output_size, seed_into,
};
pub use bilinear::scale_bilinear;
pub use error::{TransformError, TransformResult};
pub use imddt::scale_imddt;
pub use sampling::Cell;
pub use scale::{ScaleMethod, scale, scale_with, scaled_size};
