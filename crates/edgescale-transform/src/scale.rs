//! Image scaling entry point
//!
//! Dispatches to one of the three resamplers:
//!
//! | method | factor | output size |
//! |---|---|---|
//! | [`ScaleMethod::Ais`] | exactly 2 | `(2W - 1) x (2H - 1)` |
//! | [`ScaleMethod::Bilinear`] | any positive | `floor(W * f) x floor(H * f)`, at least 1 |
//! | [`ScaleMethod::Imddt`] | any positive | same as bilinear |

use crate::ais::{AisOptions, double_scale_with};
use crate::bilinear::scale_bilinear;
use crate::imddt::scale_imddt;
use crate::{TransformError, TransformResult};
use edgescale_core::Grid;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMethod {
    /// Edge-adaptive scale doubling
    #[default]
    Ais,
    /// Uniform bilinear interpolation
    Bilinear,
    /// Pixel-level data-dependent triangulation
    Imddt,
}

impl ScaleMethod {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ScaleMethod::Ais => "ais",
            ScaleMethod::Bilinear => "bilinear",
            ScaleMethod::Imddt => "imddt",
        }
    }
}

impl fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleMethod {
    type Err = TransformError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ais" => Ok(ScaleMethod::Ais),
            "bilinear" => Ok(ScaleMethod::Bilinear),
            "imddt" => Ok(ScaleMethod::Imddt),
            _ => Err(TransformError::InvalidParameters(format!(
                "unknown scale method '{}'",
                s
            ))),
        }
    }
}

/// Target size for a factor: `floor(dim * factor)`, at least 1.
pub fn scaled_size(width: u32, height: u32, factor: f64) -> TransformResult<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{} (must be positive and finite)",
            factor
        )));
    }
    let dim = |d: u32| -> TransformResult<u32> {
        let scaled = (d as f64 * factor).floor();
        if scaled > u32::MAX as f64 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{} overflows dimension {}",
                factor, d
            )));
        }
        Ok((scaled as u32).max(1))
    };
    Ok((dim(width)?, dim(height)?))
}

/// Scale an image by `factor` with the default AIS options.
pub fn scale(src: &Grid, factor: f64, method: ScaleMethod) -> TransformResult<Grid> {
    scale_with(src, factor, method, &AisOptions::default())
}

/// Scale an image by `factor`.
///
/// `options` is only consulted by [`ScaleMethod::Ais`].
///
/// # Errors
///
/// - [`TransformError::InvalidScaleFactor`] if `factor` is not positive and
///   finite, or is not 2 for AIS
/// - [`TransformError::SourceTooSmall`] if AIS is given a source under 7x7
pub fn scale_with(
    src: &Grid,
    factor: f64,
    method: ScaleMethod,
    options: &AisOptions,
) -> TransformResult<Grid> {
    match method {
        ScaleMethod::Ais => {
            if factor != 2.0 {
                return Err(TransformError::InvalidScaleFactor(format!(
                    "{} (AIS only doubles)",
                    factor
                )));
            }
            double_scale_with(src, options)
        }
        ScaleMethod::Bilinear => {
            let (w, h) = scaled_size(src.width(), src.height(), factor)?;
            debug!("bilinear {}x{} -> {}x{}", src.width(), src.height(), w, h);
            scale_bilinear(src, w, h)
        }
        ScaleMethod::Imddt => {
            let (w, h) = scaled_size(src.width(), src.height(), factor)?;
            debug!("imddt {}x{} -> {}x{}", src.width(), src.height(), w, h);
            scale_imddt(src, w, h)
        }
    }
}
