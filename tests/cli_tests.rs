//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SOURCES: &str = r#"{
  "productId": "acme",
  "sources": [{
    "sourceType": "github",
    "sourceId": "web",
    "sourceLabel": "Web app",
    "structureSummary": {
      "routePaths": [
        "app/routes/_index.tsx",
        "app/routes/login.tsx",
        "app/routes/projects/$projectId.tsx"
      ],
      "folderTree": [{"name": "app", "children": [{"name": "features", "children": [
        {"name": "billing", "children": [{"name": "index.ts"}]}
      ]}]}],
      "fileExcerpts": [{
        "path": "server/prisma/schema.prisma",
        "content": "model Project {\n  id String @id\n  name String\n}\n"
      }],
      "defaultBranch": "main"
    },
    "surfaceSignals": [
      {"surface": "front-end", "bucketId": "app"},
      {"surface": "platform", "bucketId": "server"}
    ]
  }]
}"#;

fn product_context() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("product-context"))
}

fn write_sources(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("sources.json");
    fs::write(&path, content).expect("write sources");
    path
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read artifact");
    serde_json::from_str(&text).expect("artifact is JSON")
}

#[test]
fn test_cli_version() {
    let mut cmd = product_context();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("product-context"));
}

#[test]
fn test_cli_help() {
    let mut cmd = product_context();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_extract_writes_four_artifacts() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);
    let out = tmp.path().join("out");

    let mut cmd = product_context();
    cmd.arg("extract")
        .arg("--input")
        .arg(&input)
        .args(["--generated-at", "2024-05-01T00:00:00+00:00"])
        .arg("--output-dir")
        .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete!"))
        .stdout(predicate::str::contains("Screens:         3"));

    let sitemap = read_json(&out.join("ui_sitemap.json"));
    assert_eq!(sitemap["schema"], "ui_sitemap_v1");
    assert_eq!(sitemap["productId"], "acme");
    assert_eq!(sitemap["items"][2]["path"], "/projects/:projectId");

    let flows = read_json(&out.join("user_flows.json"));
    assert_eq!(flows["schema"], "user_flows_v1");

    let model = read_json(&out.join("business_data_model.json"));
    assert_eq!(model["entities"][0]["id"], "Project");

    let topology = read_json(&out.join("repo_folder_topology.json"));
    assert_eq!(topology["surfaces"][0]["surface"], "front-end");
    assert_eq!(topology["surfaces"][0]["semanticFolders"][0]["name"], "billing");
}

#[test]
fn test_extract_bundle_on_stdout_is_reproducible() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);

    let run = || {
        let output = product_context()
            .arg("extract")
            .arg("--input")
            .arg(&input)
            .args(["--product-id", "override", "--generated-at", "2024-05-01T00:00:00+00:00"])
            .output()
            .expect("run extract");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("utf8 stdout")
    };

    let first = run();
    let second = run();
    similar_asserts::assert_eq!(first, second);

    let bundle: Value = serde_json::from_str(&first).expect("bundle is JSON");
    assert_eq!(bundle["uiSitemap"]["productId"], "override");
    assert_eq!(bundle["repoFolderTopology"]["generatedAt"], "2024-05-01T00:00:00+00:00");
}

#[test]
fn test_extract_requires_product_id() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), r#"[{"sourceId": "web"}]"#);

    let mut cmd = product_context();
    cmd.arg("extract").arg("--input").arg(&input);
    cmd.assert().failure().stderr(predicate::str::contains("No product id"));
}

#[test]
fn test_extract_rejects_malformed_document() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), r#"[{"sourceId": "web", "surfaceSignals": 3}]"#);

    let mut cmd = product_context();
    cmd.arg("extract").arg("--input").arg(&input).args(["--product-id", "acme"]);
    cmd.assert().failure().stderr(predicate::str::contains("Malformed sources document"));
}

#[test]
fn test_extract_discovers_config_next_to_input() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);
    fs::write(tmp.path().join("product-context.toml"), "[sitemap]\nmax_items = 1\n")
        .expect("write config");

    let output = product_context()
        .arg("extract")
        .arg("--input")
        .arg(&input)
        .output()
        .expect("run extract");
    assert!(output.status.success());

    let bundle: Value = serde_json::from_slice(&output.stdout).expect("bundle is JSON");
    assert_eq!(bundle["uiSitemap"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(bundle["uiSitemap"]["cursor"], "truncated");
}

#[test]
fn test_extract_explicit_config_must_parse() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);
    let config = tmp.path().join("broken.toml");
    fs::write(&config, "[sitemap\n").expect("write config");

    let mut cmd = product_context();
    cmd.arg("extract").arg("--input").arg(&input).arg("--config").arg(&config);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid TOML syntax"));
}

#[test]
fn test_extract_env_override() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);

    let output = product_context()
        .env("PRODUCT_CONTEXT_FLOWS__MAX_FLOWS", "1")
        .arg("extract")
        .arg("--input")
        .arg(&input)
        .output()
        .expect("run extract");
    assert!(output.status.success());

    let bundle: Value = serde_json::from_slice(&output.stdout).expect("bundle is JSON");
    assert_eq!(bundle["userFlows"]["flows"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_info_summarizes_sources() {
    let tmp = TempDir::new().expect("tmp");
    let input = write_sources(tmp.path(), SOURCES);

    let mut cmd = product_context();
    cmd.arg("info").arg("--input").arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Product: acme"))
        .stdout(predicate::str::contains("Source: web"))
        .stdout(predicate::str::contains("Route paths:     3"))
        .stdout(predicate::str::contains("Default branch:  main"))
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn test_info_reports_missing_input() {
    let mut cmd = product_context();
    cmd.args(["info", "--input", "/nonexistent/sources.json"]);
    cmd.assert().failure().stderr(predicate::str::contains("Failed reading"));
}
