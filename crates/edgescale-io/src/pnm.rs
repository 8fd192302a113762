//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with a
//! maxval of at most 255. Samples stored against a smaller maxval are
//! rescaled to the full 0..=255 range. `#` comments are allowed anywhere
//! in the header.
//!
//! Writing produces P5 for 1-channel grids and P6 for 3-channel grids.

use crate::{IoError, IoResult};
use edgescale_core::Grid;
use std::io::{BufRead, Read, Write};

/// PNM variant selected by the two-byte magic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PnmKind {
    GrayAscii,
    RgbAscii,
    GrayBinary,
    RgbBinary,
}

impl PnmKind {
    fn from_magic(magic: &[u8]) -> IoResult<Self> {
        match magic {
            b"P2" => Ok(Self::GrayAscii),
            b"P3" => Ok(Self::RgbAscii),
            b"P5" => Ok(Self::GrayBinary),
            b"P6" => Ok(Self::RgbBinary),
            _ => Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM magic: {}",
                String::from_utf8_lossy(magic)
            ))),
        }
    }

    fn channels(self) -> u32 {
        match self {
            Self::GrayAscii | Self::GrayBinary => 1,
            Self::RgbAscii | Self::RgbBinary => 3,
        }
    }

    fn is_binary(self) -> bool {
        matches!(self, Self::GrayBinary | Self::RgbBinary)
    }
}

/// Byte cursor over the whole PNM stream
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("PNM: missing {}", what)))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "PNM: invalid {}: {}",
                    what,
                    String::from_utf8_lossy(token)
                ))
            })
    }

    /// Consume the single whitespace byte that ends a binary header.
    fn end_of_header(&mut self) -> IoResult<()> {
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(IoError::InvalidData(
                "PNM: missing whitespace after header".to_string(),
            )),
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

/// Map a sample stored against `maxval` onto 0..=255.
#[inline]
fn rescale(value: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        value as u8
    } else {
        ((value * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Returns
/// A 1-channel grid for PGM, a 3-channel grid for PPM.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Grid> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_pnm(&bytes)
}

fn decode_pnm(bytes: &[u8]) -> IoResult<Grid> {
    if bytes.len() < 2 {
        return Err(IoError::InvalidData("PNM: file too short".to_string()));
    }
    let kind = PnmKind::from_magic(&bytes[..2])?;

    let mut tokens = Tokens::new(&bytes[2..]);
    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maxval")?;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "PNM: invalid dimensions {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM: maxval {} not supported (expected 1..=255)",
            maxval
        )));
    }

    let channels = kind.channels();
    let count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| IoError::InvalidData("PNM: image too large".to_string()))?;

    let samples: Vec<u8> = if kind.is_binary() {
        tokens.end_of_header()?;
        let raster = tokens.rest();
        if raster.len() < count {
            return Err(IoError::InvalidData(format!(
                "PNM: expected {} raster bytes, found {}",
                count,
                raster.len()
            )));
        }
        let raster = &raster[..count];
        if raster.iter().any(|&v| v as u32 > maxval) {
            return Err(IoError::InvalidData(
                "PNM: sample exceeds maxval".to_string(),
            ));
        }
        raster.iter().map(|&v| rescale(v as u32, maxval)).collect()
    } else {
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            let value = tokens.next_u32("sample")?;
            if value > maxval {
                return Err(IoError::InvalidData(format!(
                    "PNM: sample {} exceeds maxval {}",
                    value, maxval
                )));
            }
            samples.push(rescale(value, maxval));
        }
        samples
    };

    Ok(Grid::from_raw(width, height, channels, samples)?)
}

/// Write a grid as binary PNM to a writer.
///
/// Chooses P5 (1 channel) or P6 (3 channels). Other channel counts are
/// rejected with [`IoError::UnsupportedFormat`].
pub fn write_pnm<W: Write>(grid: &Grid, mut writer: W) -> IoResult<()> {
    let magic = match grid.channels() {
        1 => "P5",
        3 => "P6",
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} channels as PNM",
                n
            )));
        }
    };

    write!(writer, "{}\n{} {}\n255\n", magic, grid.width(), grid.height())?;
    writer.write_all(grid.data())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_ascii_pgm_with_comments() {
        let data = b"P2\n# created by hand\n3 2\n# max\n255\n0 10 20\n30 40 255\n";
        let grid = read_pnm(Cursor::new(&data[..])).unwrap();
        assert_eq!(grid.geometry(), (3, 2, 1));
        assert_eq!(grid.data(), &[0, 10, 20, 30, 40, 255]);
    }

    #[test]
    fn test_read_ascii_ppm_rescales_maxval() {
        let data = b"P3 2 1 15\n15 0 0  0 15 7\n";
        let grid = read_pnm(Cursor::new(&data[..])).unwrap();
        assert_eq!(grid.geometry(), (2, 1, 3));
        assert_eq!(grid.data(), &[255, 0, 0, 0, 255, 119]);
    }

    #[test]
    fn test_binary_pgm_roundtrip() {
        let grid = Grid::from_fn(7, 5, 1, |x, y, _| (x * 30 + y) as u8).unwrap();
        let mut buffer = Vec::new();
        write_pnm(&grid, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P5\n7 5\n255\n"));
        let grid2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert!(grid2.equals(&grid));
    }

    #[test]
    fn test_binary_ppm_roundtrip() {
        let grid = Grid::from_fn(4, 3, 3, |x, y, c| (x * 50 + y * 9 + c) as u8).unwrap();
        let mut buffer = Vec::new();
        write_pnm(&grid, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P6\n"));
        let grid2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert!(grid2.equals(&grid));
    }

    #[test]
    fn test_binary_raster_may_start_with_whitespace_byte() {
        // 0x0A and 0x20 are valid samples right after the header.
        let mut data = b"P5\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[0x0A, 0x20]);
        let grid = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(grid.data(), &[0x0A, 0x20]);
    }

    #[test]
    fn test_reject_bad_input() {
        assert!(matches!(
            read_pnm(Cursor::new(&b"P4\n1 1\n"[..])),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(&b"P5\n1 1\n65535\n\0\0"[..])),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(&b"P5\n4 4\n255\n\0\0"[..])),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(&b"P2\n2 1\n255\n1\n"[..])),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(&b"P2\n1 1\n10\n11\n"[..])),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_write_rejects_alpha() {
        let grid = Grid::new(2, 2, 4).unwrap();
        let mut buffer = Vec::new();
        assert!(matches!(
            write_pnm(&grid, &mut buffer),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
