use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod inspect;

use inspect::{parse_dims_arg, type_table, TensorDescription, TensorSummary};

#[derive(Parser)]
#[command(name = "ortensor", version, about = "Validate and inspect tensor descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tensor from a JSON description and print its summary
    Inspect {
        /// JSON file with `type`, `data` and `dims` fields
        file: PathBuf,
        /// Reshape the tensor before printing, e.g. `--reshape 3,2`
        #[arg(long, allow_hyphen_values = true)]
        reshape: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Number of leading elements to show
        #[arg(long, default_value_t = 8)]
        preview: usize,
    },
    /// List supported element types and their buffer kinds
    Types {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            file,
            reshape,
            json,
            preview,
        } => cmd_inspect(&file, reshape.as_deref(), json, preview),
        Commands::Types { json } => cmd_types(json),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_new(ortensor::env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ortensor::env::log_ansi())
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_inspect(file: &Path, reshape: Option<&str>, json: bool, preview: usize) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mut tensor = TensorDescription::parse(&text)?.build()?;
    info!(path = %file.display(), dtype = %tensor.dtype(), "loaded tensor");

    if let Some(arg) = reshape {
        let dims = parse_dims_arg(arg)?;
        tensor = tensor
            .reshape(dims.as_slice())
            .with_context(|| format!("cannot reshape to {dims:?}"))?;
    }

    let summary = TensorSummary::new(&tensor, preview);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}

fn cmd_types(json: bool) -> Result<()> {
    let rows = type_table();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    println!("{:<8} {:<11} {}", "type", "buffer", "bytes");
    for row in rows {
        println!(
            "{:<8} {:<11} {}",
            row.dtype.to_string(),
            row.buffer.as_deref().unwrap_or("-"),
            row.element_size
                .map(|size| size.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}
