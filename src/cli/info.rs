//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use product_context::config::TopologyConfig;
use product_context::domain::ContextSourceInput;
use product_context::input::load_sources_document;
use product_context::topology::FolderIndex;

#[derive(Args)]
pub struct InfoArgs {
    /// JSON sources document to summarize
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let document = load_sources_document(&args.input)?;

    if let Some(product_id) = &document.product_id {
        println!("Product: {product_id}");
    }
    println!("Sources: {}", document.sources.len());

    let topology_config = TopologyConfig::default();
    for source in &document.sources {
        print_source(source, &topology_config);
    }

    Ok(())
}

fn print_source(source: &ContextSourceInput, topology_config: &TopologyConfig) {
    let summary = &source.structure_summary;
    let folders = FolderIndex::build(&summary.folder_tree, topology_config);

    println!();
    println!("Source: {}", source.source_id);
    if !source.source_label.is_empty() {
        println!("  Label:           {}", source.source_label);
    }
    if !source.source_type.is_empty() {
        println!("  Type:            {}", source.source_type);
    }
    if let Some(branch) = &summary.default_branch {
        println!("  Default branch:  {branch}");
    }
    println!("  Route paths:     {}", summary.route_paths.len());
    println!("  Folder paths:    {}", folders.len());
    println!("  File excerpts:   {}", summary.file_excerpts.len());

    let mut buckets: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for signal in &source.surface_signals {
        let entry = buckets.entry(signal.surface.to_string()).or_default();
        if !entry.contains(&signal.bucket_id.as_str()) {
            entry.push(signal.bucket_id.as_str());
        }
    }

    if buckets.is_empty() {
        println!("  Surfaces:        (none)");
    } else {
        println!("  Surfaces:");
        for (surface, ids) in &buckets {
            println!("    {:<12} {}", surface, ids.join(", "));
        }
    }
}
