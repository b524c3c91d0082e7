//! harmonic-lab - noisy harmonic and low-pass filter explorer
//!
//! Run with: cargo run -- [--filter moving-average] [export --output out.csv]

mod app;
mod export;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use harmonic_lab::{dsp::filter::DEFAULT_WINDOW, FilterKind, ParamField};

use app::Lab;

#[derive(Debug, Parser)]
#[command(name = "harmonic-lab", version, about)]
struct Cli {
    /// Sampling rate in Hz; the time step is its reciprocal
    #[arg(long, default_value_t = 100.0)]
    sample_rate: f64,

    /// Length of the time axis in seconds
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Butterworth filter order
    #[arg(long, default_value_t = 5)]
    order: usize,

    /// Smoothing stage applied to the generated signal
    #[arg(long, value_enum, default_value_t = FilterChoice::Butterworth)]
    filter: FilterChoice,

    /// Moving-average kernel width in samples
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Seed the noise generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Start with noise hidden
    #[arg(long)]
    no_noise: bool,

    /// Initial slider value, e.g. `--set amplitude=2.5` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    overrides: Vec<(ParamField, f64)>,

    /// Write logs here (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Run,
    /// Render one cycle and write `time,raw,filtered` as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterChoice {
    Butterworth,
    MovingAverage,
}

impl From<FilterChoice> for FilterKind {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::Butterworth => FilterKind::Butterworth,
            FilterChoice::MovingAverage => FilterKind::MovingAverage,
        }
    }
}

fn parse_assignment(arg: &str) -> Result<(ParamField, f64), String> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{arg}`"))?;
    let field = field.parse::<ParamField>()?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad value for {field}: {e}"))?;
    Ok((field, value))
}

/// Logs go to `log_file` when given. Without one, the interactive UI installs
/// no logger at all so nothing is written over the terminal.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> EyreResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if interactive => return Ok(()),
        None => {}
    }
    builder.try_init().wrap_err("failed to install logger")
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Run);
    init_logging(cli.log_file.as_deref(), matches!(command, Command::Run))?;

    let mut lab = Lab::new()
        .sample_rate(cli.sample_rate)
        .duration(cli.duration)
        .order(cli.order)
        .filter(cli.filter.into(), cli.window)
        .show_noise(!cli.no_noise);
    if let Some(seed) = cli.seed {
        lab = lab.seed(seed);
    }
    for (field, value) in cli.overrides {
        lab = lab.set(field, value);
    }

    match command {
        Command::Run => lab.run(),
        Command::Export { output } => lab.export(output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("noise-variance=0.2"),
            Ok((ParamField::NoiseVariance, 0.2))
        );
        assert!(parse_assignment("amplitude").is_err());
        assert!(parse_assignment("amplitude=loud").is_err());
        assert!(parse_assignment("gain=1").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["harmonic-lab"]);
        assert_eq!(cli.sample_rate, 100.0);
        assert_eq!(cli.order, 5);
        assert!(cli.command.is_none());
        assert!(cli.overrides.is_empty());
    }

    #[test]
    fn test_cli_export_with_overrides() {
        let cli = Cli::parse_from([
            "harmonic-lab",
            "--filter",
            "moving-average",
            "--set",
            "cutoff=2",
            "--set",
            "amplitude=3",
            "export",
            "-o",
            "out.csv",
        ]);
        assert!(matches!(cli.filter, FilterChoice::MovingAverage));
        assert_eq!(cli.overrides.len(), 2);
        assert!(matches!(cli.command, Some(Command::Export { output: Some(_) })));
    }
}
