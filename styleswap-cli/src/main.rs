use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use styleswap::{PixelNormalization, PooledPixels, SizeBounds, StyleTransfer, TransferConfig};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Styleswap CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TransferConfigJson {
    min_size: u32,
    max_size: u32,
    mean: [f32; 3],
    std: [f32; 3],
    parallel: bool,
}

impl Default for TransferConfigJson {
    fn default() -> Self {
        let cfg = TransferConfig::default();
        Self {
            min_size: cfg.bounds.min_size,
            max_size: cfg.bounds.max_size,
            mean: cfg.normalization.mean,
            std: cfg.normalization.std,
            parallel: cfg.parallel,
        }
    }
}

impl From<TransferConfigJson> for TransferConfig {
    fn from(value: TransferConfigJson) -> Self {
        Self {
            bounds: SizeBounds {
                min_size: value.min_size,
                max_size: value.max_size,
            },
            normalization: PixelNormalization {
                mean: value.mean,
                std: value.std,
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    content_path: String,
    style_path: String,
    output_path: String,
    pool_factor: usize,
    transfer: TransferConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_path: String::new(),
            style_path: String::new(),
            output_path: String::new(),
            pool_factor: 4,
            transfer: TransferConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    output_path: String,
    width: u32,
    height: u32,
    elapsed_ms: u128,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("styleswap=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.content_path.is_empty() || config.style_path.is_empty() {
        return Err("content_path and style_path must be set in the config".into());
    }
    if config.output_path.is_empty() {
        return Err("output_path must be set in the config".into());
    }

    let net = PooledPixels::new(config.pool_factor)?;
    let pipeline = StyleTransfer::new(net, net).with_config(config.transfer.into());

    let start = Instant::now();
    let result = pipeline.transfer_style(&config.content_path, &config.style_path)?;
    let elapsed_ms = start.elapsed().as_millis();
    let (width, height) = (result.width(), result.height());
    let output_path = result.persist(&config.output_path)?;
    tracing::info!(
        width,
        height,
        elapsed_ms = elapsed_ms as u64,
        output = %output_path.display(),
        "transfer finished"
    );

    let output = Output {
        output_path: output_path.display().to_string(),
        width,
        height,
        elapsed_ms,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
