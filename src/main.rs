use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rundown_core::config::Config;
use rundown_core::{Normalizer, Outcome};

/// Exit code when the response could not be normalized.
const EXIT_UNRECOGNIZED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "rundown",
    about = "Normalize a generated event rundown into time/event/note records"
)]
struct Cli {
    /// File holding the raw response. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Config file layered over the built-in defaults
    /// (default: ~/.config/rundown/config.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Write debug logs to /tmp/rundown-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/rundown-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("rundown debug log started: tail -f /tmp/rundown-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    let normalizer = Normalizer::new(&config).context("invalid config")?;

    let raw = read_input(cli.input.as_deref())?;

    match normalizer.normalize(&raw) {
        Outcome::Parsed { sequence, strategy } => {
            tracing::debug!(%strategy, records = sequence.len(), "writing canonical output");
            if cli.pretty {
                println!("{}", sequence.to_canonical_json_pretty());
            } else {
                println!("{}", sequence.to_canonical_json());
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Unrecognized(unrecognized) => {
            eprintln!("rundown: {unrecognized}");
            if unrecognized.retain_raw() {
                eprintln!("--- raw response ---");
                eprintln!("{raw}");
            }
            Ok(ExitCode::from(EXIT_UNRECOGNIZED))
        }
    }
}

/// Read the whole input as text. Invalid UTF-8 is replaced rather than
/// rejected.
fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
