//! PNM I/O regression test
//!
//! Binary roundtrips for PGM and PPM, and decoding of the ASCII
//! variants against the binary ones.
//!
//! Run with:
//! ```
//! cargo test -p edgescale-io --test pnmio_reg
//! ```

use edgescale_core::Grid;
use edgescale_io::{ImageFormat, read_image, read_image_mem, write_image, write_image_mem};
use edgescale_test::{RegParams, regout_dir};
use std::fs;

fn ascii_pnm(grid: &Grid) -> Vec<u8> {
    let magic = if grid.channels() == 1 { "P2" } else { "P3" };
    let mut text = format!(
        "{}\n# ascii copy\n{} {}\n255\n",
        magic,
        grid.width(),
        grid.height()
    );
    for y in 0..grid.height() {
        let row: Vec<String> = grid.row_data(y).iter().map(|v| v.to_string()).collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text.into_bytes()
}

#[test]
fn pnmio_reg() {
    let mut rp = RegParams::new("pnmio");

    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");

    // Gray: binary roundtrip through a file, twice
    let gray = Grid::from_fn(23, 14, 1, |x, y, _| (x * 11 ^ y * 7) as u8).unwrap();
    let path1 = format!("{}/pnmio_gray.pgm", outdir);
    write_image(&gray, &path1, ImageFormat::Pnm).expect("write pgm");
    let gray2 = read_image(&path1).expect("read pgm");
    let path2 = format!("{}/pnmio_gray_2.pgm", outdir);
    write_image(&gray2, &path2, ImageFormat::Pnm).expect("write pgm (2)");
    let gray3 = read_image(&path2).expect("read pgm (2)");
    rp.compare_grid(&gray, &gray3);

    // RGB: binary roundtrip through memory
    let rgb = Grid::from_fn(9, 12, 3, |x, y, c| (x * 20 + y * 5 + c * 90) as u8).unwrap();
    let bytes = write_image_mem(&rgb, ImageFormat::Pnm).expect("encode ppm");
    rp.compare_strings(&bytes[..3], b"P6\n");
    let rgb2 = read_image_mem(&bytes).expect("decode ppm");
    rp.compare_grid(&rgb, &rgb2);

    // ASCII variants decode to the same samples
    rp.compare_grid(&gray, &read_image_mem(&ascii_pnm(&gray)).expect("P2"));
    rp.compare_grid(&rgb, &read_image_mem(&ascii_pnm(&rgb)).expect("P3"));

    // Alpha cannot be represented
    let rgba = Grid::new(2, 2, 4).unwrap();
    let refused = write_image_mem(&rgba, ImageFormat::Pnm).is_err();
    rp.compare_values(1.0, if refused { 1.0 } else { 0.0 }, 0.0);

    rp.write_grid_and_check(&gray, ImageFormat::Pnm)
        .expect("write_grid_and_check");

    assert!(rp.cleanup());
}
