//! Core domain types: source inputs, warnings, and the four output artifacts.
//!
//! Wire names are camelCase so the JSON matches what downstream prompt
//! builders read verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UI_SITEMAP_SCHEMA: &str = "ui_sitemap_v1";
pub const USER_FLOWS_SCHEMA: &str = "user_flows_v1";
pub const BUSINESS_DATA_MODEL_SCHEMA: &str = "business_data_model_v1";
pub const REPO_FOLDER_TOPOLOGY_SCHEMA: &str = "repo_folder_topology_v1";

// Wire-level bounds. Configured caps can tighten these but never exceed them.
pub const MAX_SITEMAP_ITEMS: usize = 200;
pub const MAX_FLOWS: usize = 20;
pub const MAX_FLOW_STEPS: usize = 20;
pub const MAX_ENTITIES: usize = 50;
pub const MAX_SEMANTIC_FOLDERS: usize = 30;
pub const MAX_SUBTREE_NODES: usize = 200;

// ── Inputs ──────────────────────────────────────────────────────────────────

/// One repository (or monorepo) supplying structural signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSourceInput {
    #[serde(default)]
    pub source_type: String,
    pub source_id: String,
    #[serde(default)]
    pub source_label: String,
    #[serde(default)]
    pub structure_summary: StructureSummary,
    #[serde(default)]
    pub surface_signals: Vec<SurfaceSignal>,
}

impl ContextSourceInput {
    /// Bucket ids declared for `surface`, in declaration order, without duplicates.
    pub fn bucket_ids(&self, surface: &Surface) -> Vec<String> {
        let mut buckets: Vec<String> = Vec::new();
        for signal in &self.surface_signals {
            if &signal.surface == surface && !buckets.contains(&signal.bucket_id) {
                buckets.push(signal.bucket_id.clone());
            }
        }
        buckets
    }
}

/// Structural signals gathered for one source.
///
/// Every field is optional on the wire. A field of the wrong JSON type fails
/// deserialization of the whole document instead of silently producing empty
/// artifacts later on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSummary {
    #[serde(default)]
    pub route_paths: Vec<String>,
    #[serde(default)]
    pub folder_tree: Vec<FolderTreeNode>,
    #[serde(default)]
    pub file_excerpts: Vec<FileExcerpt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderTreeNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<FolderTreeNode>,
}

impl FolderTreeNode {
    pub fn new(name: impl Into<String>, children: Vec<FolderTreeNode>) -> Self {
        Self { name: name.into(), children }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileExcerpt {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSignal {
    pub surface: Surface,
    pub bucket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Functional surface a path prefix belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Surface {
    FrontEnd,
    Platform,
    Marketing,
    Docs,
    Admin,
    Management,
    Design,
    Other(String),
}

impl Surface {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FrontEnd => "front-end",
            Self::Platform => "platform",
            Self::Marketing => "marketing",
            Self::Docs => "docs",
            Self::Admin => "admin",
            Self::Management => "management",
            Self::Design => "design",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Surface {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "front-end" | "frontend" | "ui" | "web" => Self::FrontEnd,
            "platform" | "back-end" | "backend" | "platform/back-end" | "api" | "server" => {
                Self::Platform
            }
            "marketing" => Self::Marketing,
            "docs" | "documentation" => Self::Docs,
            "admin" => Self::Admin,
            "management" => Self::Management,
            "design" => Self::Design,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Surface {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Surface> for String {
    fn from(surface: Surface) -> Self {
        surface.as_str().to_string()
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Warnings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    UiSitemapEmpty,
    UserFlowsEmpty,
    BusinessModelNoPlatformBuckets,
    BusinessModelMissingSamples,
    BusinessModelEmpty,
    RepoTopologyNoSurfaces,
    RepoTopologyMissingTree,
    SchemaValidationFailed,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UiSitemapEmpty => "ui_sitemap_empty",
            Self::UserFlowsEmpty => "user_flows_empty",
            Self::BusinessModelNoPlatformBuckets => "business_model_no_platform_buckets",
            Self::BusinessModelMissingSamples => "business_model_missing_samples",
            Self::BusinessModelEmpty => "business_model_empty",
            Self::RepoTopologyNoSurfaces => "repo_topology_no_surfaces",
            Self::RepoTopologyMissingTree => "repo_topology_missing_tree",
            Self::SchemaValidationFailed => "schema_validation_failed",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured, non-fatal degradation signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolWarning {
    pub code: WarningCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ToolWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), source: None }
    }

    pub fn for_source(code: WarningCode, message: impl Into<String>, source: &str) -> Self {
        Self { code, message: message.into(), source: Some(source.to_string()) }
    }
}

// ── UI sitemap ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavGroup {
    Primary,
    Secondary,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSitemapItem {
    pub id: String,
    pub path: String,
    pub title: String,
    pub nav_group: NavGroup,
    pub requires_auth: bool,
    pub surface_hint: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSitemap {
    pub schema: String,
    pub product_id: String,
    pub generated_at: String,
    pub items: Vec<UiSitemapItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub warnings: Vec<ToolWarning>,
}

impl UiSitemap {
    pub fn empty(product_id: &str, generated_at: &str) -> Self {
        Self {
            schema: UI_SITEMAP_SCHEMA.to_string(),
            product_id: product_id.to_string(),
            generated_at: generated_at.to_string(),
            items: Vec::new(),
            cursor: None,
            warnings: Vec::new(),
        }
    }

    pub fn item_by_path(&self, path: &str) -> Option<&UiSitemapItem> {
        self.items.iter().find(|item| item.path == path)
    }
}

// ── User flows ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub order: usize,
    pub path: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFlow {
    pub id: String,
    pub name: String,
    pub steps: Vec<FlowStep>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFlows {
    pub schema: String,
    pub product_id: String,
    pub generated_at: String,
    pub flows: Vec<UserFlow>,
    pub warnings: Vec<ToolWarning>,
}

impl UserFlows {
    pub fn empty(product_id: &str, generated_at: &str) -> Self {
        Self {
            schema: USER_FLOWS_SCHEMA.to_string(),
            product_id: product_id.to_string(),
            generated_at: generated_at.to_string(),
            flows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

// ── Business data model ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_entity_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEntity {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: Vec<BusinessAttribute>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRelationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDataModel {
    pub schema: String,
    pub product_id: String,
    pub generated_at: String,
    pub entities: Vec<BusinessEntity>,
    pub relationships: Vec<BusinessRelationship>,
    pub warnings: Vec<ToolWarning>,
}

impl BusinessDataModel {
    pub fn empty(product_id: &str, generated_at: &str) -> Self {
        Self {
            schema: BUSINESS_DATA_MODEL_SCHEMA.to_string(),
            product_id: product_id.to_string(),
            generated_at: generated_at.to_string(),
            entities: Vec::new(),
            relationships: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

// ── Repository topology ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticFolder {
    pub name: String,
    pub paths: Vec<String>,
    pub reason: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySurface {
    pub source_id: String,
    pub surface: Surface,
    pub root_paths: Vec<String>,
    pub nodes: Vec<TopologyNode>,
    pub truncated: bool,
    pub semantic_folders: Vec<SemanticFolder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoFolderTopology {
    pub schema: String,
    pub product_id: String,
    pub generated_at: String,
    pub surfaces: Vec<TopologySurface>,
    pub warnings: Vec<ToolWarning>,
}

impl RepoFolderTopology {
    pub fn empty(product_id: &str, generated_at: &str) -> Self {
        Self {
            schema: REPO_FOLDER_TOPOLOGY_SCHEMA.to_string(),
            product_id: product_id.to_string(),
            generated_at: generated_at.to_string(),
            surfaces: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// All four artifacts produced from one set of sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductContextInputs {
    pub ui_sitemap: UiSitemap,
    pub user_flows: UserFlows,
    pub business_data_model: BusinessDataModel,
    pub repo_folder_topology: RepoFolderTopology,
}
