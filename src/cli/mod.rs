//! Command-line parsing for `dhist`.
//!
//! Argument parsing and command dispatch stay separate from decoding and
//! binning. Defaults for `--bins` and `--palette` can come from the
//! environment (or `.env`); explicit flags win.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::protocol::Operation;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "dhist",
    version,
    about = "Decode and plot distributional values returned by a probabilistic co-processor"
)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). Without it, `DHIST_LOG` applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode payload files and print a summary of each distribution.
    Inspect(InspectArgs),
    /// Decode payload files, bin them on shared axes and draw the histogram.
    Plot(PlotArgs),
    /// Redraw a histogram from a geometry JSON written by `plot --export`.
    Render(RenderArgs),
    /// Encode an arithmetic request on two `X.Y(Z)` operands into a MOSI buffer file.
    Encode(EncodeArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct InspectArgs {
    /// Payload files to decode.
    #[arg(required = true, value_name = "PAYLOAD")]
    pub payloads: Vec<PathBuf>,

    /// Files are raw device responses (length prefix + block padding).
    #[arg(long)]
    pub framed: bool,

    /// Maximum delta rows printed per distribution.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Payload files to decode; each becomes one candidate, in order.
    #[arg(required = true, value_name = "PAYLOAD")]
    pub payloads: Vec<PathBuf>,

    /// Files are raw device responses (length prefix + block padding).
    #[arg(long)]
    pub framed: bool,

    /// Number of histogram bins shared by all candidates.
    #[arg(short = 'b', long, env = "DHIST_BINS", default_value_t = 16)]
    pub bins: usize,

    /// Label per candidate, in payload order (repeatable).
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Comma-separated colour palette (`#RRGGBB` or `#RRGGBBAA`), cycled over candidates.
    #[arg(long, env = "DHIST_PALETTE")]
    pub palette: Option<String>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Also write the histogram as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export the histogram geometry to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Geometry JSON file.
    #[arg(value_name = "JSON")]
    pub geometry: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Also write the histogram as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct EncodeArgs {
    /// Operation to request.
    #[arg(value_enum)]
    pub operation: Operation,

    /// First operand in `X.Y(Z)` notation.
    #[arg(allow_hyphen_values = true)]
    pub a: String,

    /// Second operand in `X.Y(Z)` notation.
    #[arg(allow_hyphen_values = true)]
    pub b: String,

    /// Where to write the MOSI buffer.
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    /// Also write the command register block (command code as a `u32`).
    #[arg(long, value_name = "PATH")]
    pub command_out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plot_flags() {
        let cli = Cli::parse_from([
            "dhist", "plot", "a.bin", "b.bin", "--bins", "8", "-l", "lhs", "-l", "rhs", "--framed",
        ]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.payloads, vec![PathBuf::from("a.bin"), PathBuf::from("b.bin")]);
        assert_eq!(args.bins, 8);
        assert_eq!(args.labels, vec!["lhs".to_string(), "rhs".to_string()]);
        assert!(args.framed);
    }

    #[test]
    fn encode_accepts_negative_operands() {
        let cli = Cli::parse_from(["dhist", "-v", "encode", "sub", "-3.0(5)", "1.25(3)", "-o", "req.bin"]);
        assert_eq!(cli.verbose, 1);
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.operation, Operation::Sub);
        assert_eq!(args.a, "-3.0(5)");
        assert_eq!(args.out, PathBuf::from("req.bin"));
    }

    #[test]
    fn parses_render_args() {
        let cli = Cli::parse_from(["dhist", "render", "geom.json", "--width", "40", "--svg", "out.svg"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.geometry, PathBuf::from("geom.json"));
        assert_eq!(args.width, 40);
        assert_eq!(args.height, 20);
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
    }

    #[test]
    fn inspect_requires_a_payload() {
        assert!(Cli::try_parse_from(["dhist", "inspect"]).is_err());
    }
}
