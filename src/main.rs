//! product-context: extract product context artifacts from repository signals
//!
//! Reads a JSON sources document and writes the UI sitemap, user flows,
//! business data model and repository folder topology as JSON.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
