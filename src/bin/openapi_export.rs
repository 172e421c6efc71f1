//! Write the catalog's OpenAPI document to disk for client generation.

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use utoipa::OpenApi;

use hotel_catalog_api::openapi::ApiDocV1;

#[derive(Parser)]
#[command(
    name = "openapi-export",
    about = "Export the hotel catalog OpenAPI document",
    version
)]
struct Cli {
    #[arg(
        short,
        long,
        default_value = "openapi/hotel-catalog-api.v1.json",
        help = "File to write; parent directories are created"
    )]
    output: PathBuf,
    #[arg(long, help = "Write single-line JSON instead of pretty-printed")]
    compact: bool,
    #[arg(long, help = "Print to stdout instead of writing a file")]
    stdout: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let document = ApiDocV1::openapi();
    let json = if cli.compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .context("failed to serialize OpenAPI document")?;

    if cli.stdout {
        println!("{json}");
        return Ok(());
    }

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    eprintln!(
        "OpenAPI document ({} paths) written to {}",
        document.paths.paths.len(),
        cli.output.display()
    );
    Ok(())
}
