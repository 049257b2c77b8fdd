//! Extraction configuration
//!
//! Every denylist, token list and cap the builders use lives here so callers
//! (and tests) can override them. `Default` reproduces the stock constants.
//! Loading from files and the environment is handled by [`loader`].

use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::{apply_env_overrides, load_config};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub sitemap: SitemapConfig,
    pub flows: FlowConfig,
    pub entities: EntityConfig,
    pub topology: TopologyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Path segment marking the start of the route tree.
    pub route_anchor: String,
    pub route_extensions: Vec<String>,
    pub layout_tokens: Vec<String>,
    /// Segments that hide a route when first and flag it when nested.
    pub internal_tokens: Vec<String>,
    pub auth_tokens: Vec<String>,
    pub max_items: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            route_anchor: "routes".to_string(),
            route_extensions: strings(&[".tsx", ".ts", ".jsx", ".js", ".mdx", ".md"]),
            layout_tokens: strings(&["_layout", "layout", "root", "_root", "_index"]),
            internal_tokens: strings(&[
                "health",
                "healthz",
                "debug",
                "internal",
                "storybook",
                "__dev",
            ]),
            auth_tokens: strings(&[
                "login",
                "signin",
                "sign-in",
                "signup",
                "sign-up",
                "register",
                "logout",
                "oauth",
                "auth",
                "callback",
                "forgot-password",
                "reset-password",
            ]),
            max_items: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub max_entry_segments: usize,
    pub max_entry_points: usize,
    pub max_children_per_flow: usize,
    pub max_steps_per_flow: usize,
    pub max_flows: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_entry_segments: 3,
            max_entry_points: 12,
            max_children_per_flow: 4,
            max_steps_per_flow: 20,
            max_flows: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Infrastructure tables that are never business concepts. Matched
    /// case-insensitively against the PascalCase entity id.
    pub technical_denylist: Vec<String>,
    pub table_builders: Vec<String>,
    pub max_entities: usize,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            technical_denylist: strings(&[
                "Session",
                "Sessions",
                "Migration",
                "Migrations",
                "SchemaMigrations",
                "KnexMigrations",
                "PrismaMigrations",
                "AuditLog",
                "AuditLogs",
                "Telemetry",
                "TelemetryEvents",
                "Job",
                "Jobs",
                "JobQueue",
                "FailedJobs",
                "Queue",
                "Locks",
                "Cache",
                "RateLimits",
                "VerificationToken",
                "VerificationTokens",
            ]),
            table_builders: strings(&["pgTable", "mysqlTable", "sqliteTable", "singlestoreTable"]),
            max_entities: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub structural_denylist: Vec<String>,
    /// Relative prefixes (from a surface root) that mark feature/domain code.
    pub preferred_roots: Vec<String>,
    pub index_file_stems: Vec<String>,
    pub index_file_extensions: Vec<String>,
    pub max_subtree_depth: usize,
    pub max_subtree_nodes: usize,
    pub max_semantic_folders: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            structural_denylist: strings(&[
                "utils",
                "util",
                "common",
                "shared",
                "lib",
                "libs",
                "types",
                "typings",
                "assets",
                "static",
                "styles",
                "hooks",
                "components",
                "ui",
                "test",
                "tests",
                "__tests__",
                "spec",
                "specs",
                "e2e",
                "fixtures",
                "__fixtures__",
                "mocks",
                "__mocks__",
                "dist",
                "build",
                "out",
                "coverage",
                "node_modules",
                "vendor",
                "cache",
                "migrations",
                "generated",
            ]),
            preferred_roots: strings(&[
                "features/",
                "modules/",
                "domains/",
                "domain/",
                "services/",
                "src/features/",
                "src/modules/",
                "src/domains/",
                "src/domain/",
                "src/services/",
                "app/features/",
                "app/modules/",
            ]),
            index_file_stems: strings(&["index", "exports"]),
            index_file_extensions: strings(&["ts", "tsx", "js", "jsx", "mjs", "cjs"]),
            max_subtree_depth: 4,
            max_subtree_nodes: 200,
            max_semantic_folders: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let cfg: ExtractionConfig =
            toml::from_str("[sitemap]\nmax_items = 5\n").expect("parse partial config");
        assert_eq!(cfg.sitemap.max_items, 5);
        assert_eq!(cfg.sitemap.route_anchor, "routes");
        assert_eq!(cfg.flows, FlowConfig::default());
    }
}
