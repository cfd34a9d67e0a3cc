//! extract_lights - dominant directional lights from an HDR environment map
//!
//! Prints a JSON array of light records on stdout.

use clap::error::ErrorKind;
use clap::Parser;
use envmap_lights::config::{load_config, ExtractToolConfig};
use envmap_lights::debug::save_overlay;
use envmap_lights::image::io::{load_hdr_image, write_json_file};
use envmap_lights::output::write_records_json;
use envmap_lights::{ExtractError, ExtractionParams, LightExtractor, MergeStrategy};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Extract dominant directional lights from an equirectangular .hdr/.exr map
///
/// The map is cut into 2^CUTS regions of balanced energy, each region
/// becomes a candidate light and weak candidates are merged into stronger
/// neighbours. Only lights above the horizon are printed.
#[derive(Parser, Debug)]
#[command(name = "extract_lights")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input environment map (.hdr or .exr)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Maximum normalized area of a merged light [default: 0.05]
    #[arg(short = 'a', long = "area", value_name = "AREA")]
    max_area: Option<f64>,

    /// Maximum normalized side length of a merged light [default: 0.08]
    #[arg(short = 'l', long = "length", value_name = "LENGTH")]
    max_length: Option<f64>,

    /// Luminance ratio below which a light may be merged [default: 0.5]
    #[arg(short = 'r', long = "ratio", value_name = "RATIO")]
    ratio: Option<f64>,

    /// Number of cut levels, yields up to 2^CUTS regions [default: 8]
    #[arg(short = 'n', long = "cuts", value_name = "CUTS")]
    cuts: Option<u32>,

    /// Number of lights to print, 0 prints all [default: 1]
    #[arg(short = 'm', long = "lights", value_name = "COUNT")]
    lights: Option<usize>,

    /// Merge cone half-angle in degrees [default: 35]
    #[arg(long = "angle", value_name = "DEGREES")]
    angle: Option<f64>,

    /// Merge strategy: plain, select or near-merge [default: plain]
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<MergeStrategy>,

    /// JSON config file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the full extraction report (JSON)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Save a debug overlay and log at debug level
    #[arg(short = 'd', long)]
    debug: bool,

    /// Debug overlay path [default: <FILE stem>_lights.png]
    #[arg(long, value_name = "FILE")]
    debug_output: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, params: &mut ExtractionParams) {
        if let Some(v) = self.max_area {
            params.max_merged_area = v;
        }
        if let Some(v) = self.max_length {
            params.max_merged_length = v;
        }
        if let Some(v) = self.ratio {
            params.luminance_ratio = v;
        }
        if let Some(v) = self.cuts {
            params.max_depth = v;
        }
        if let Some(v) = self.lights {
            params.max_lights = v;
        }
        if let Some(v) = self.angle {
            params.max_angle_deg = v;
        }
        if let Some(v) = self.strategy {
            params.strategy = v;
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ExtractError> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExtractToolConfig::default(),
    };
    let mut params = config.params.clone();
    cli.apply_overrides(&mut params);

    let input = cli
        .input
        .clone()
        .or_else(|| config.input.clone())
        .ok_or(ExtractError::MissingInput)?;

    let image = load_hdr_image(&input)?;
    info!(
        "loaded {} ({}x{}, {} channels)",
        input.display(),
        image.w,
        image.h,
        image.channels
    );

    let report = LightExtractor::new(params).extract(&image)?;
    let records = report.records();
    write_records_json(&mut io::stdout().lock(), &records).map_err(|e| ExtractError::Io {
        path: PathBuf::from("<stdout>"),
        message: e.to_string(),
    })?;

    if let Some(path) = cli.report.as_ref().or(config.output.report.as_ref()) {
        write_json_file(path, &report)?;
        info!("report written to {}", path.display());
    }

    let debug_path = match (&cli.debug_output, &config.output.debug_image) {
        (Some(path), _) => Some(path.clone()),
        (None, _) if cli.debug => Some(default_debug_path(&input)),
        (None, Some(path)) => Some(path.clone()),
        (None, None) => None,
    };
    if let Some(path) = debug_path {
        save_overlay(&image, &report, &path)?;
    }

    Ok(())
}

fn default_debug_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "envmap".to_string());
    input.with_file_name(format!("{stem}_lights.png"))
}
