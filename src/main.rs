use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use qrsmith::{encode, validate_input, ECLevel};

/// Generate a QR code from a URL or text and save it as a PNG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL or text to encode.
    text: String,

    /// Error correction level: L, M, Q or H.
    #[arg(short, long, default_value = "M")]
    level: ECLevel,

    /// Pixels per module, 1 to 64.
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Output PNG file.
    #[arg(short, long, default_value = "qrcode.png")]
    output: PathBuf,

    /// Print the symbol to the terminal instead of writing a file.
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Failed to generate QR code");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let input = validate_input(&args.text)?;
    debug!(kind = ?input.kind, len = input.text.len(), "Validated input");

    let qr = encode(input.as_bytes(), args.level)?;

    if args.print {
        println!("{}", qr.to_str(1));
        return Ok(());
    }

    qr.to_image(args.scale).save(&args.output)?;
    let w = qr.width();
    println!("Saved {w}x{w} QR code {} to {}", qr.metadata(), args.output.display());

    Ok(())
}
