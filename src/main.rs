use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use logframe::config::{Config, OutputFormat};
use logframe::{output, Frame, Normalizer};

#[derive(Parser)]
#[command(name = "logframe", about = "Normalize a log data frame and print its rows")]
struct Cli {
    /// Frame JSON file. Reads stdin when omitted or `-`.
    file: Option<PathBuf>,
    /// Output format; overrides `[output] format` from the config file.
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Config file to use instead of ~/.config/logframe/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print only the detected frame shape.
    #[arg(long)]
    shape: bool,
    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Lines,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Lines => OutputFormat::Lines,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default config");
            Config::defaults()
        }),
    };
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }

    let input = read_input(cli.file.as_deref())?;
    let frame: Frame = serde_json::from_str(&input).context("failed to decode frame")?;

    let normalizer = Normalizer::new(config.normalize.clone());
    let view = normalizer
        .normalize(&frame)
        .context("frame has no usable time and body columns")?;

    if cli.shape {
        println!("{}", view.shape);
    } else {
        print!("{}", output::render(&view, &config.output)?);
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
