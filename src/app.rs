//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - decodes payload files and bins them
//! - prints reports/plots and writes optional SVG/JSON outputs
//! - redraws previously exported geometry

use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::binning::assign_candidates;
use crate::cli::{Command, EncodeArgs, InspectArgs, PlotArgs, RenderArgs};
use crate::domain::{PlotConfig, StyleConfig};
use crate::error::{AppError, DistError};
use crate::protocol::{Request, pad_to_block};

pub mod pipeline;

/// Pixel size of SVG output.
const SVG_SIZE: (u32, u32) = (960, 540);

/// Entry point for the `dhist` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; clap reads DHIST_* from the process environment.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect(args) => handle_inspect(args),
        Command::Plot(args) => handle_plot(args),
        Command::Render(args) => handle_render(args),
        Command::Encode(args) => handle_encode(args),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("DHIST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // Tests may call `run` more than once in a process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let values = crate::io::read_payloads(&args.payloads, args.framed)?;
    let candidates = assign_candidates(values, &StyleConfig::default())?;

    for (candidate, path) in candidates.iter().zip(&args.payloads) {
        println!("{}", path.display());
        println!("{}", crate::report::format_value_summary(&candidate.label, &candidate.value));
        println!("{}", crate::report::format_delta_table(&candidate.value, args.rows));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = plot_config_from_args(&args)?;
    let run = pipeline::run_plot(&config)?;

    println!(
        "{}",
        crate::plot::render_histogram(&run.geometry, config.plot_width, config.plot_height)
    );
    println!("{}", crate::report::format_geometry_summary(&run.geometry));

    if let Some(path) = &config.svg {
        crate::plot::write_svg(path, &run.geometry, &config.style, SVG_SIZE)?;
        info!(path = %path.display(), "wrote SVG histogram");
    }
    if let Some(path) = &config.export {
        let sources: Vec<String> = config.payloads.iter().map(|p| p.display().to_string()).collect();
        crate::io::write_geometry_json(path, &run.geometry, &sources)?;
        info!(path = %path.display(), "exported histogram geometry");
    }
    Ok(())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let doc = crate::io::read_geometry_json(&args.geometry)?;
    debug!(
        tool = %doc.tool,
        generated_at = %doc.generated_at,
        sources = doc.sources.len(),
        "loaded geometry file"
    );

    println!("{}", crate::plot::render_histogram(&doc.geometry, args.width, args.height));
    println!("{}", crate::report::format_geometry_summary(&doc.geometry));
    if !doc.sources.is_empty() {
        println!("sources: {}", doc.sources.join(", "));
    }

    if let Some(path) = &args.svg {
        crate::plot::write_svg(path, &doc.geometry, &StyleConfig::default(), SVG_SIZE)?;
        info!(path = %path.display(), "wrote SVG histogram");
    }
    Ok(())
}

fn handle_encode(args: EncodeArgs) -> Result<(), AppError> {
    let request = Request::parse(args.operation, &args.a, &args.b)?;
    let buffer = pad_to_block(request.encode()?);
    debug!(
        op = request.operation.symbol(),
        a = ?request.a,
        b = ?request.b,
        bytes = buffer.len(),
        "encoded request"
    );

    write_file(&args.out, &buffer)?;
    if let Some(path) = &args.command_out {
        write_file(path, &request.command_buffer()?)?;
    }

    println!(
        "[{}, {}] {} [{}, {}] -> command code {} ({} bytes written to {})",
        request.a.0,
        request.a.1,
        request.operation.symbol(),
        request.b.0,
        request.b.1,
        request.operation.command_code(),
        buffer.len(),
        args.out.display()
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes).map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

/// Build a [`PlotConfig`] from parsed `plot` arguments.
///
/// Labels and palette replace the built-in ones when given; hatch patterns
/// and the particle/background colours always come from [`StyleConfig::default`].
pub fn plot_config_from_args(args: &PlotArgs) -> Result<PlotConfig, AppError> {
    let mut style = StyleConfig::default();
    if !args.labels.is_empty() {
        style.labels = args.labels.clone();
    }
    if let Some(palette) = &args.palette {
        style.colors = parse_palette(palette)?;
    }

    Ok(PlotConfig {
        payloads: args.payloads.clone(),
        framed: args.framed,
        bin_count: args.bins,
        style,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        export: args.export.clone(),
    })
}

fn parse_palette(text: &str) -> Result<Vec<String>, AppError> {
    let colors: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if colors.is_empty() {
        return Err(DistError::configuration(format!("palette '{text}' names no colours")).into());
    }
    Ok(colors)
}
