//! Extract command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use product_context::config::{apply_env_overrides, load_config};
use product_context::domain::ProductContextInputs;
use product_context::input::load_sources_document;
use product_context::pipeline::ContextPipeline;

pub const UI_SITEMAP_FILE: &str = "ui_sitemap.json";
pub const USER_FLOWS_FILE: &str = "user_flows.json";
pub const BUSINESS_DATA_MODEL_FILE: &str = "business_data_model.json";
pub const REPO_FOLDER_TOPOLOGY_FILE: &str = "repo_folder_topology.json";

#[derive(Args)]
pub struct ExtractArgs {
    /// JSON sources document (an array of sources or `{productId, sources}`)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Product identifier stamped on every artifact (defaults to the document's productId)
    #[arg(short, long, value_name = "ID")]
    pub product_id: Option<String>,

    /// Fixed generatedAt timestamp (RFC 3339) for reproducible output
    #[arg(long, value_name = "TIMESTAMP")]
    pub generated_at: Option<String>,

    /// Path to config file (product-context.toml or product-context.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write one JSON file per artifact here instead of a bundle to stdout
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let document = load_sources_document(&args.input)?;

    let product_id = args
        .product_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or(document.product_id)
        .context("No product id: pass --product-id or set productId in the sources document")?;

    let search_root = match args.input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let config = load_config(&search_root, args.config.as_deref())?;
    let config = apply_env_overrides(config)?;

    let pipeline = ContextPipeline::new(config);
    let inputs = pipeline.run(&product_id, &document.sources, args.generated_at.as_deref());

    match &args.output_dir {
        Some(dir) => {
            let written = write_artifacts(dir, &inputs)?;
            print_summary(&product_id, &inputs, &written);
        }
        None => {
            let bundle = serde_json::to_string_pretty(&inputs)?;
            println!("{bundle}");
        }
    }

    Ok(())
}

fn write_artifacts(dir: &Path, inputs: &ProductContextInputs) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed creating output directory {}", dir.display()))?;

    let written = vec![
        write_json(dir, UI_SITEMAP_FILE, &inputs.ui_sitemap)?,
        write_json(dir, USER_FLOWS_FILE, &inputs.user_flows)?,
        write_json(dir, BUSINESS_DATA_MODEL_FILE, &inputs.business_data_model)?,
        write_json(dir, REPO_FOLDER_TOPOLOGY_FILE, &inputs.repo_folder_topology)?,
    ];
    Ok(written)
}

fn write_json<T: Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(&path, text).with_context(|| format!("Failed writing {}", path.display()))?;
    Ok(path)
}

fn print_summary(product_id: &str, inputs: &ProductContextInputs, written: &[PathBuf]) {
    let warnings: Vec<String> = inputs
        .ui_sitemap
        .warnings
        .iter()
        .chain(&inputs.user_flows.warnings)
        .chain(&inputs.business_data_model.warnings)
        .chain(&inputs.repo_folder_topology.warnings)
        .map(|w| match &w.source {
            Some(source) => format!("{} ({source})", w.code),
            None => w.code.to_string(),
        })
        .collect();

    println!("Extraction complete!");
    println!();
    println!("Statistics:");
    println!("  Product:         {product_id}");
    println!("  Screens:         {}", inputs.ui_sitemap.items.len());
    println!("  Flows:           {}", inputs.user_flows.flows.len());
    println!("  Entities:        {}", inputs.business_data_model.entities.len());
    println!("  Relationships:   {}", inputs.business_data_model.relationships.len());
    println!("  Surfaces:        {}", inputs.repo_folder_topology.surfaces.len());

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    println!();
    println!("Output files:");
    for path in written {
        println!("  {}", path.display());
    }
}
