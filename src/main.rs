use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hydroclima_rs::util::hex::decode_hex;
use hydroclima_rs::driver::manufacturer_name;
use hydroclima_rs::{decode_payload, init_logger, log_info, DriverRegistry};

#[derive(Parser)]
#[command(name = "hydroclima-cli")]
#[command(about = "CLI tool for decoding HydroClima HCA payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a manufacturer payload given as hex
    Decode {
        payload: String,
        /// Frame offset of the payload, for annotation positioning
        #[arg(short, long, default_value = "0")]
        offset: usize,
    },
    /// List registered drivers and their detection signatures
    Drivers,
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { payload, offset } => {
            let bytes = decode_hex(&payload).context("payload is not valid hex")?;
            let (reading, annotations) =
                decode_payload(&bytes, offset).context("payload decoding failed")?;

            for annotation in &annotations {
                log_info(&format!(
                    "{:03}..{:03}: {}",
                    annotation.offset,
                    annotation.offset + annotation.length,
                    annotation.description
                ));
            }
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        Commands::Drivers => {
            let registry = DriverRegistry::with_defaults()?;
            for detection in registry.registered_detections() {
                log_info(&format!(
                    "driver detection: {detection} ({})",
                    manufacturer_name(detection.manufacturer)
                ));
            }
        }
    }

    Ok(())
}
