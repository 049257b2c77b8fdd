//! Config file loading

use super::ExtractionConfig;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables with this prefix override loaded values, using `__`
/// as the section separator (`PRODUCT_CONTEXT_SITEMAP__MAX_ITEMS=50`).
pub const ENV_PREFIX: &str = "PRODUCT_CONTEXT_";

const NESTED_SECTIONS: &[&str] = &["product-context", "pctx"];

/// Load an [`ExtractionConfig`].
///
/// An explicitly provided file must parse; an auto-discovered one that fails to
/// parse is logged and replaced by the defaults.
pub fn load_config(search_root: &Path, config_path: Option<&Path>) -> Result<ExtractionConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_root),
    };

    let Some(config_file) = discovered else {
        return Ok(ExtractionConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => Ok(cfg),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(ExtractionConfig::default())
        }
    }
}

/// Layer `PRODUCT_CONTEXT_*` environment variables over `config`.
pub fn apply_env_overrides(config: ExtractionConfig) -> Result<ExtractionConfig> {
    merge_env(config, Env::prefixed(ENV_PREFIX))
}

fn merge_env(config: ExtractionConfig, env: Env) -> Result<ExtractionConfig> {
    Figment::from(Serialized::defaults(config))
        .merge(env.split("__"))
        .extract()
        .context("Invalid environment override for extraction config")
}

/// Parse TOML config, accepting an optional `[product-context]` or `[pctx]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<ExtractionConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = NESTED_SECTIONS
        .iter()
        .find_map(|section| raw.get(*section).cloned())
        .unwrap_or(raw);

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn parse_yaml_config(content: &str, config_file: &Path) -> Result<ExtractionConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = NESTED_SECTIONS
        .iter()
        .find_map(|section| raw.get(*section).cloned())
        .unwrap_or(raw);

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(search_root: &Path) -> Option<PathBuf> {
    let candidates = [
        "product-context.toml",
        ".product-context.toml",
        "product-context.yml",
        "product-context.yaml",
        ".product-context.yml",
        ".product-context.yaml",
    ];

    candidates.iter().map(|candidate| search_root.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_present() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, ExtractionConfig::default());
    }

    #[test]
    fn explicit_toml_with_nested_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[product-context.flows]\nmax_flows = 3\n").expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.flows.max_flows, 3);
        assert_eq!(cfg.flows.max_entry_points, 12);
    }

    #[test]
    fn explicit_yaml_overrides_denylist() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.yaml");
        fs::write(&path, "entities:\n  technical_denylist: [\"Users\"]\n").expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.entities.technical_denylist, vec!["Users".to_string()]);
        assert_eq!(cfg.entities.max_entities, 50);
    }

    #[test]
    fn explicit_config_with_invalid_type_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[sitemap]\nmax_items = \"many\"\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn auto_discovered_invalid_config_falls_back_to_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("product-context.toml"), "[sitemap]\nmax_items = \"many\"\n")
            .expect("write");

        let cfg = load_config(tmp.path(), None).expect("soft-fail on auto-discovery");
        assert_eq!(cfg.sitemap.max_items, 200);
    }

    #[test]
    fn unsupported_extension_is_an_error_when_explicit() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("cfg.ini");
        fs::write(&path, "max_items=1").expect("write");

        let err = load_config(tmp.path(), Some(&path)).expect_err("ini is not supported");
        assert!(err.to_string().contains("Unsupported config extension"));
    }

    #[test]
    fn env_overrides_replace_nested_values() {
        std::env::set_var("PCTX_LOADER_TEST_TOPOLOGY__MAX_SEMANTIC_FOLDERS", "7");
        let cfg = merge_env(ExtractionConfig::default(), Env::prefixed("PCTX_LOADER_TEST_"))
            .expect("merge env");
        std::env::remove_var("PCTX_LOADER_TEST_TOPOLOGY__MAX_SEMANTIC_FOLDERS");

        assert_eq!(cfg.topology.max_semantic_folders, 7);
        assert_eq!(cfg.topology.max_subtree_depth, 4);
    }
}
