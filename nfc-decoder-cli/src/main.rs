use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nfc_decoder_core::dump::{ClassicReport, NfcDump};
use nfc_decoder_core::encoding::{encode, parse_input, ByteEncoding, InputBase};
use nfc_decoder_core::mifare::classic::{AccessBits, AccessConditions};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod formatter;

/// Decoders for MIFARE Classic 1K and NTAG data read by a Flipper Zero.
#[derive(Parser, Debug)]
#[command(name = "nfc-decoder")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show byte values in every base alongside their complement
    Encode(EncodeInput),

    /// Decode the access bits held in bytes 6, 7 and 8 of a sector trailer
    Access {
        /// Six hex characters, like FF0780
        hex: String,
    },

    /// Decode a MIFARE Classic 1K dump
    M1k {
        /// Input .nfc file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Recover the text stored on an NTAG21x dump
    Ntag {
        /// Input .nfc file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct EncodeInput {
    /// Input is BCD, four bit groups with or without spaces
    #[arg(short = 'a', long)]
    bcd: Option<String>,

    /// Input is binary
    #[arg(short, long)]
    binary: Option<String>,

    /// Input is characters
    #[arg(short = 'c', long = "char")]
    character: Option<String>,

    /// Input is decimal
    #[arg(short, long)]
    decimal: Option<String>,

    /// Input is hexadecimal, one or two digits per byte
    #[arg(short = 'x', long)]
    hex: Option<String>,

    /// Input is octal
    #[arg(short, long)]
    octal: Option<String>,
}

impl EncodeInput {
    fn base_and_value(&self) -> Option<(InputBase, &str)> {
        [
            (InputBase::Bcd, &self.bcd),
            (InputBase::Binary, &self.binary),
            (InputBase::Char, &self.character),
            (InputBase::Decimal, &self.decimal),
            (InputBase::Hex, &self.hex),
            (InputBase::Octal, &self.octal),
        ]
        .into_iter()
        .find_map(|(base, value)| value.as_deref().map(|value| (base, value)))
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Encode(input) => run_encode(&input),
        Commands::Access { hex } => run_access(&hex),
        Commands::M1k { input } => run_m1k(&input),
        Commands::Ntag { input } => run_ntag(&input),
    }
}

fn run_encode(input: &EncodeInput) -> Result<ExitCode> {
    let Some((base, value)) = input.base_and_value() else {
        bail!("No input given");
    };
    let bytes = parse_input(base, value).with_context(|| format!("Invalid {:?} input", base))?;
    tracing::debug!(count = bytes.len(), "Encoding input");

    let encodings: Vec<ByteEncoding> = bytes.iter().copied().map(encode).collect();
    let mut out = String::new();
    formatter::render_encodings(&encodings, &mut out)?;
    print!("{}", out);
    Ok(ExitCode::SUCCESS)
}

fn run_access(hex: &str) -> Result<ExitCode> {
    let bits = AccessBits::parse(hex).context("Invalid access bits")?;

    let conditions = match AccessConditions::from_bits(bits) {
        Ok(conditions) => conditions,
        Err(error) => {
            println!("{}", error);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut out = String::new();
    formatter::render_access_conditions(&conditions, &mut out)?;
    print!("{}", out);
    Ok(ExitCode::SUCCESS)
}

fn run_m1k(path: &Path) -> Result<ExitCode> {
    let dump = load_dump(path)?;
    if dump.blocks().next().is_none() {
        bail!("No MIFARE Classic blocks in {}", path.display());
    }

    let report = ClassicReport::from_dump(&dump);
    tracing::info!(sectors = report.sectors.len(), "Decoded MIFARE Classic dump");

    let mut out = String::new();
    formatter::render_classic_report(&report, &mut out)?;
    print!("{}", out);
    Ok(ExitCode::SUCCESS)
}

fn run_ntag(path: &Path) -> Result<ExitCode> {
    let dump = load_dump(path)?;
    if dump.pages().next().is_none() {
        bail!("No NTAG pages in {}", path.display());
    }

    println!("{}", dump.page_text());
    Ok(ExitCode::SUCCESS)
}

fn load_dump(path: &Path) -> Result<NfcDump> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dump = NfcDump::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded dump");
    Ok(dump)
}
