//! product-context: deterministic product-context extraction
//!
//! Turns repository structural signals (route paths, folder trees, schema
//! excerpts and surface classifications) into four bounded, schema-tagged
//! artifacts for language-model prompting: a UI sitemap, user flows, a
//! business data model and a repository folder topology.

pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod flows;
pub mod input;
pub mod pipeline;
pub mod sitemap;
pub mod topology;
pub mod utils;
pub mod validate;

pub use config::ExtractionConfig;
pub use domain::{ContextSourceInput, ProductContextInputs, ToolWarning, WarningCode};
pub use entities::{build_business_data_model, EntityExtractor, SchemaExtractor};
pub use error::{Error, Result};
pub use flows::{build_user_flows, FlowBuilder};
pub use input::{load_sources_document, parse_sources_document, SourcesDocument};
pub use pipeline::{build_product_context_inputs, ContextPipeline};
pub use sitemap::{build_ui_sitemap, normalize_route_path, SitemapBuilder};
pub use topology::{build_repo_folder_topology, TopologyBuilder};
