use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use qoiparser::{decode, encode, ppm_read, ppm_write};

#[derive(Debug, Parser)]
#[command(author, version, about = "Convert between PPM and QOI images")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode a binary PPM (P6) file into a QOI file.
    Encode {
        input: PathBuf,
        output: PathBuf,
        /// Tag the output as all-linear-channels instead of sRGB with linear alpha.
        #[arg(long)]
        linear: bool,
    },
    /// Decode a QOI file into a binary PPM (P6) file.
    Decode { input: PathBuf, output: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Encode {
            input,
            output,
            linear,
        } => {
            let ppm_bytes = fs::read(&input)?;
            let (width, height, pixels) = ppm_read(&ppm_bytes)?;
            let qoi_bytes = encode(&pixels, width, height, false, linear)?;
            fs::write(&output, &qoi_bytes)?;
            println!(
                "encoded {width}x{height} PPM ({} bytes) into {} bytes of QOI",
                ppm_bytes.len(),
                qoi_bytes.len()
            );
        }
        Command::Decode { input, output } => {
            let qoi_bytes = fs::read(&input)?;
            let image = decode(&qoi_bytes)?;
            let ppm_bytes = ppm_write(image.width, image.height, &image.pixels, true);
            fs::write(&output, &ppm_bytes)?;
            println!(
                "decoded {}x{} QOI ({} bytes) into {} bytes of PPM",
                image.width,
                image.height,
                qoi_bytes.len(),
                ppm_bytes.len()
            );
        }
    }

    Ok(())
}
