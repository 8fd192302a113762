//! edgescale - Command-line image upscaler

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use edgescale::io::{self, ImageFormat};
use edgescale::transform::{AisOptions, EDGE_THRESHOLD, ScaleMethod, scale_with};
use log::{LevelFilter, debug, error, info};

/// Parse a scale method name (case-insensitive)
fn parse_method(s: &str) -> Result<ScaleMethod, String> {
    s.parse::<ScaleMethod>()
        .map_err(|_| format!("Unknown method '{}'. Available methods: ais, bilinear, imddt", s))
}

/// Parse and validate the scale factor (positive, finite)
fn parse_scale(s: &str) -> Result<f64, String> {
    let factor: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(format!("Scale must be a positive number, got {}", s));
    }
    Ok(factor)
}

#[derive(Parser, Debug)]
#[command(name = "edgescale")]
#[command(version, about = "Upscale an image with edge-adaptive interpolation")]
#[command(after_help = "EXAMPLES:
    # Double an image with the edge-adaptive method
    edgescale photo.png

    # Bilinear upscale by 3.5, writing a PNM file
    edgescale -m bilinear -s 3.5 -o big.ppm photo.png

    # Edge-adaptive with a lower edge threshold and debug logging
    edgescale --threshold 60 -vv photo.png")]
struct Cli {
    /// Input image (PNG or PNM)
    #[arg(required_unless_present = "input_flag")]
    input: Option<PathBuf>,

    /// Input image, as a flag
    #[arg(long = "input", short = 'i', id = "input_flag", conflicts_with = "input")]
    input_flag: Option<PathBuf>,

    /// Interpolation method: ais, bilinear or imddt
    #[arg(long, short = 'm', default_value = "ais", value_parser = parse_method)]
    method: ScaleMethod,

    /// Scale factor (ais supports only 2)
    #[arg(long, short = 's', default_value_t = 2.0, value_parser = parse_scale)]
    scale: f64,

    /// Output file (default: <method>-<scale>x_<input file name> next to the input)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Edge threshold for the ais method
    #[arg(long, default_value_t = EDGE_THRESHOLD)]
    threshold: i32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().or(self.input_flag.as_deref())
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Default output path: `<method>-<scale>x_<file name>` beside the input.
fn default_output(input: &Path, method: ScaleMethod, scale: f64) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}-{}x_{}", method, scale, file_name))
}

fn init_logging(level: LevelFilter) {
    // RUST_LOG still wins over the -v default when set.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = cli.input_path().ok_or("input file needed")?;
    let output = match &cli.output {
        Some(path) => path.clone(),
        None => default_output(input, cli.method, cli.scale),
    };
    let format = ImageFormat::from_path(&output).unwrap_or_default();

    let src = io::read_image(input)?;
    info!(
        "read {} ({}x{}, {} channels)",
        input.display(),
        src.width(),
        src.height(),
        src.channels()
    );

    let options = AisOptions::default().threshold(cli.threshold);
    debug!("method = {}, scale = {}, options = {:?}", cli.method, cli.scale, options);

    let start = Instant::now();
    let dst = scale_with(&src, cli.scale, cli.method, &options)?;
    info!(
        "{} scaled to {}x{} in {:.1?}",
        cli.method,
        dst.width(),
        dst.height(),
        start.elapsed()
    );

    io::write_image(&dst, &output, format)?;
    info!("wrote {} ({:?})", output.display(), format);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["edgescale", "in.png"]).unwrap();
        assert_eq!(cli.method, ScaleMethod::Ais);
        assert_eq!(cli.scale, 2.0);
        assert_eq!(cli.threshold, EDGE_THRESHOLD);
        assert_eq!(cli.input_path(), Some(Path::new("in.png")));
        assert!(cli.output.is_none());
        assert_eq!(cli.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "edgescale", "-m", "IMDDT", "-s", "3.5", "-o", "out.pgm", "--threshold", "40", "-vv",
            "-i", "in.pgm",
        ])
        .unwrap();
        assert_eq!(cli.method, ScaleMethod::Imddt);
        assert_eq!(cli.scale, 3.5);
        assert_eq!(cli.output, Some(PathBuf::from("out.pgm")));
        assert_eq!(cli.threshold, 40);
        assert_eq!(cli.input_path(), Some(Path::new("in.pgm")));
        assert_eq!(cli.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["edgescale"]).is_err());
        assert!(Cli::try_parse_from(["edgescale", "-m", "nearest", "in.png"]).is_err());
        assert!(Cli::try_parse_from(["edgescale", "-s", "0", "in.png"]).is_err());
        assert!(Cli::try_parse_from(["edgescale", "-s", "abc", "in.png"]).is_err());
        assert!(Cli::try_parse_from(["edgescale", "-i", "a.png", "b.png"]).is_err());
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("photos/cat.png"), ScaleMethod::Ais, 2.0),
            PathBuf::from("photos/ais-2x_cat.png")
        );
        assert_eq!(
            default_output(Path::new("cat.ppm"), ScaleMethod::Bilinear, 1.5),
            PathBuf::from("bilinear-1.5x_cat.ppm")
        );
    }
}
