//! edgescale-io - Image I/O for the edgescale workspace
//!
//! Supported formats:
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | 8/16-bit gray, gray+alpha, RGB, RGBA, palette | 1-4 channels | `png-format` |
//! | PNM    | P2, P3, P5, P6 (maxval <= 255) | P5, P6 | `pnm` |
//!
//! Reading dispatches on the file's magic number, never on its extension.

pub mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use edgescale_core::Grid;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let data = std::fs::read(path.as_ref())?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Grid> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image in a known format from a reader.
pub fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Grid> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(grid: &Grid, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_format(grid, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(grid: &Grid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(grid, &mut buffer, format)?;
    Ok(buffer)
}

/// Write an image in the given format to a writer.
pub fn write_image_format<W: Write>(grid: &Grid, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(grid, writer),
        #[allow(unreachable_patterns)]
        _ => {
            let _ = (grid, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                format
            )))
        }
    }
}
