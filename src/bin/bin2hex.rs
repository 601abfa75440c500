//! `bin2hex` converts a raw binary image into Intel HEX or Motorola S-Record
//! text for device programmers.
//!
//! ```text
//! bin2hex firmware.bin
//! bin2hex -a 0x8000 -l 16 bootloader.bin
//! bin2hex -f srec --address-size 24 --header boot -o boot.s19 boot.bin
//! ```

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use micro_hexrec::{motorola, AddressWidth, IntelEncoder, SRecordEncoder};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Intel HEX
    Ihex,
    /// Motorola S-Record
    Srec,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Ihex => "hex",
            Format::Srec => "srec",
        }
    }

    fn max_bytes_per_line(self) -> usize {
        match self {
            Format::Ihex => micro_hexrec::ihex::MAX_DATA_LENGTH,
            Format::Srec => motorola::MAX_BYTES_PER_LINE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bin2hex", version, about = "Convert binary files to Intel HEX or S-Record format")]
struct Args {
    /// Binary image to convert.
    input: PathBuf,

    /// Output file (default: input name with the format's extension).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Starting address in hex, with or without a 0x prefix.
    #[arg(short = 'a', long = "address", value_parser = parse_hex_address, default_value = "0")]
    start_address: u32,

    /// Data bytes per record (Intel HEX 1-255, S-Record 1-252).
    #[arg(short = 'l', long = "length", default_value_t = 32)]
    bytes_per_line: usize,

    /// Output file extension used when --output is not given.
    #[arg(short, long)]
    extension: Option<String>,

    /// Disable extended linear address records (Intel HEX only).
    #[arg(short, long)]
    segmented: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Ihex)]
    format: Format,

    /// S-Record address size in bits: 16, 24 or 32.
    #[arg(long, default_value_t = 32)]
    address_size: u32,

    /// S-Record header text (S0 record).
    #[arg(long)]
    header: Option<String>,

    /// Log progress details.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_hex_address(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u32::from_str_radix(digits, 16).map_err(|_| format!("invalid address format: {value}"))
}

/// Input file name without directory or extension, joined with `extension`.
fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());

    PathBuf::from(stem).with_extension(extension)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run(&args)
}

/// Validates the configuration, then reads `args.input` and writes the
/// converted records. The output file is only created once every option
/// has been accepted.
fn run(args: &Args) -> Result<()> {
    if !(1..=args.format.max_bytes_per_line()).contains(&args.bytes_per_line) {
        bail!(
            "invalid line length {}, must be 1-{}",
            args.bytes_per_line,
            args.format.max_bytes_per_line()
        );
    }

    let width = match args.format {
        Format::Ihex => None,
        Format::Srec => Some(AddressWidth::try_from(args.address_size)?),
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            let extension = args.extension.as_deref().unwrap_or(args.format.extension());
            default_output(&args.input, extension)
        }
    };

    debug!("reading binary file {}", args.input.display());
    let data = fs::read(&args.input)
        .with_context(|| format!("cannot open input file {}", args.input.display()))?;

    debug!("file size: {} bytes", data.len());
    debug!("start address: {:#010X}", args.start_address);
    debug!("bytes per line: {}", args.bytes_per_line);

    let file = File::create(&output)
        .with_context(|| format!("failed to open output file {}", output.display()))?;
    let out = BufWriter::new(file);

    let records = match args.format {
        Format::Ihex => {
            debug!(
                "extended addressing: {}",
                if args.segmented { "disabled" } else { "enabled" }
            );
            IntelEncoder::new(args.bytes_per_line)
                .with_extended_addressing(!args.segmented)
                .write_to(&data, args.start_address, out)
        }
        Format::Srec => {
            let bits = width.map_or(args.address_size, AddressWidth::bits);
            debug!("address size: {} bits", bits);
            SRecordEncoder::new(args.bytes_per_line)
                .with_address_width(bits)
                .write_to(&data, args.start_address, args.header.as_deref(), out)
        }
    }
    .with_context(|| format!("failed to convert {}", args.input.display()))?;

    if data.is_empty() {
        info!("wrote {} records to {}", records, output.display());
    } else {
        let end_address = args
            .start_address
            .wrapping_add(data.len() as u32)
            .wrapping_sub(1);
        info!(
            "wrote {} records to {} (address range {:#010X} - {:#010X})",
            records,
            output.display(),
            args.start_address,
            end_address
        );
    }

    Ok(())
}
