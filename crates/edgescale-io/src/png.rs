//! PNG image format support
//!
//! Every PNG is decoded to 8-bit samples: palettes and low bit depths are
//! expanded, 16-bit samples are stripped to their high byte. The channel
//! count of the resulting grid follows the PNG color type.

use crate::{IoError, IoResult};
use edgescale_core::Grid;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth after expansion: {:?}",
            output_info.bit_depth
        )));
    }

    let channels = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    let width = output_info.width;
    let height = output_info.height;
    let row_bytes = width as usize * channels as usize;
    let line_size = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    // Rows are packed already for 8-bit output, but copy row by row so a
    // decoder that pads lines is still handled.
    let mut samples = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let row_start = y * line_size;
        let row = data
            .get(row_start..row_start + row_bytes)
            .ok_or_else(|| IoError::InvalidData(format!("PNG row {} truncated", y)))?;
        samples.extend_from_slice(row);
    }

    Ok(Grid::from_raw(width, height, channels, samples)?)
}

/// Write a PNG image
///
/// Grids with 1, 2, 3 and 4 channels are written as 8-bit gray,
/// gray+alpha, RGB and RGBA respectively.
pub fn write_png<W: Write>(grid: &Grid, writer: W) -> IoResult<()> {
    let color_type = match grid.channels() {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} channels as PNG",
                n
            )));
        }
    };

    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(grid.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let grid = Grid::from_fn(10, 10, 1, |x, y, _| ((x + y) * 10) as u8).unwrap();

        let mut buffer = Vec::new();
        write_png(&grid, &mut buffer).unwrap();
        let grid2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(grid2.width(), 10);
        assert_eq!(grid2.height(), 10);
        assert_eq!(grid2.channels(), 1);
        assert!(grid2.equals(&grid));
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let grid = Grid::from_fn(5, 3, 4, |x, y, c| (x * 40 + y * 7 + c * 60) as u8).unwrap();

        let mut buffer = Vec::new();
        write_png(&grid, &mut buffer).unwrap();
        let grid2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(grid2.channels(), 4);
        assert_eq!(grid2.pixel(4, 2), grid.pixel(4, 2));
        assert!(grid2.equals(&grid));
    }

    #[test]
    fn test_png_rejects_garbage() {
        let result = read_png(Cursor::new(b"not a png at all".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
