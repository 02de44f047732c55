//! emx-charset CLI
//!
//! Detect the charset of files and convert them to UTF-8.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use emx_charset::{
    Charset, CharsetLabel, DecoderRegistry, Detector, DetectorConfig, Transcoder, TranscoderConfig,
    DEFAULT_MAX_GUESS_BYTES,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emx-charset")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Charset detection and UTF-8 conversion tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Maximum number of bytes handed to the statistical guesser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_GUESS_BYTES)]
    max_guess_bytes: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect the charset of files (default: stdin)
    Detect {
        /// Files and directories to inspect
        paths: Vec<PathBuf>,
    },

    /// Convert input to UTF-8
    Convert {
        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Decode as this charset instead of detecting it
        #[arg(long)]
        from: Option<String>,

        /// Keep HTML character references in the decoded text
        #[arg(long)]
        keep_entities: bool,

        /// Write the input unchanged if it cannot be converted
        #[arg(long)]
        passthrough: bool,
    },

    /// List supported charsets and registered aliases
    Charsets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = DecoderRegistry::default();
    let config = DetectorConfig::default().with_max_guess_bytes(cli.max_guess_bytes);
    let detector = Detector::new().with_config(config);

    match cli.command {
        Commands::Detect { paths } => {
            detect_paths(&detector, paths)?;
        }
        Commands::Convert { input, output, from, keep_entities, passthrough } => {
            let transcoder = Transcoder::with_detector(detector, &registry).with_config(TranscoderConfig {
                unescape_entities: !keep_entities,
            });
            convert(&transcoder, input, output, from, passthrough)?;
        }
        Commands::Charsets => {
            list_charsets(&registry);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = input {
        fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))
    } else {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    }
}

fn detect_paths(detector: &Detector, paths: Vec<PathBuf>) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if paths.is_empty() {
        let data = read_input(None)?;
        return report(&mut stdout, detector, "-", &data);
    }

    for path in &paths {
        if path.is_dir() {
            for file in walk_files(path)? {
                let data = read_input(Some(&file))?;
                report(&mut stdout, detector, &file.display().to_string(), &data)?;
            }
        } else {
            let data = read_input(Some(path))?;
            report(&mut stdout, detector, &path.display().to_string(), &data)?;
        }
    }

    Ok(())
}

fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk: {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn report(out: &mut impl Write, detector: &Detector, name: &str, data: &[u8]) -> Result<()> {
    let detection = detector.detect(data);
    let label = if detection.label.is_empty() { "-" } else { detection.label.as_str() };
    let reliability = if detection.reliable { "reliable" } else { "unreliable" };
    writeln!(out, "{}\t{}\t{}\t{}", name, label, reliability, detection.source)?;
    info!(file = name, bytes = data.len(), %label, "detected");
    Ok(())
}

fn convert(
    transcoder: &Transcoder<'_>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    from: Option<String>,
    passthrough: bool,
) -> Result<()> {
    let data = read_input(input.as_deref())?;

    let result = match from {
        Some(label) => transcoder.decode_as(&data, &CharsetLabel::new(label)),
        None => transcoder.to_utf8(&data),
    };

    let bytes: &[u8] = match &result.error {
        None => {
            info!(charset = %result.charset, "converted to UTF-8");
            result.text.as_bytes()
        }
        Some(err) if passthrough => {
            warn!(error = %err, "conversion failed, writing input unchanged");
            &data
        }
        Some(err) => bail!("Cannot convert to UTF-8: {}", err),
    };

    if let Some(output_path) = output {
        fs::write(&output_path, bytes)
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;
    } else {
        io::stdout().write_all(bytes)?;
    }

    Ok(())
}

fn list_charsets(registry: &DecoderRegistry) {
    for charset in Charset::ALL {
        println!("{}", charset);
    }
    for (alias, target) in registry.aliases() {
        println!("{} -> {}", alias, target);
    }
}
