//! Document-table dialect: `name: defineTable({ field: v.string(), ... })`
//! declarations in a `convex/schema.{ts,js}` file.

use super::source_text::{balanced_body, depth_at};
use super::{attribute, entity_for_table, SchemaExtractor};
use crate::domain::{BusinessAttribute, BusinessEntity, FileExcerpt};
use crate::utils::{normalize_path, path_segments};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?([A-Za-z_][A-Za-z0-9_]*)["']?\s*:\s*defineTable\s*\("#)
        .expect("valid defineTable regex")
});

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?([A-Za-z_][A-Za-z0-9_]*)["']?\s*:\s*v\.(?:optional\s*\(\s*v\.)?([A-Za-z0-9]+)\s*\("#)
        .expect("valid validator field regex")
});

pub struct DocumentTableExtractor;

impl SchemaExtractor for DocumentTableExtractor {
    fn name(&self) -> &'static str {
        "document-table"
    }

    fn can_handle(&self, sample: &FileExcerpt) -> bool {
        let path = normalize_path(&sample.path);
        let segments = path_segments(&path);
        match segments.as_slice() {
            [.., dir, file] => *dir == "convex" && matches!(*file, "schema.ts" | "schema.js"),
            _ => false,
        }
    }

    fn extract(&self, sample: &FileExcerpt, source_id: &str) -> Vec<BusinessEntity> {
        let content = sample.content.as_str();
        let mut entities = Vec::new();

        for caps in TABLE_RE.captures_iter(content) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // The match ends right after the opening paren of `defineTable(`.
            let body = balanced_body(content, whole.end(), b'(', b')');
            let description = format!("Table `{}` declared in {}", name.as_str(), sample.path);
            if let Some(entity) =
                entity_for_table(name.as_str(), parse_fields(body), description, source_id)
            {
                entities.push(entity);
            }
        }

        entities
    }
}

/// Top-level fields of the `{ ... }` argument. Fields of nested
/// `v.object({ ... })` validators sit deeper and are skipped.
fn parse_fields(body: &str) -> Vec<BusinessAttribute> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut attributes = Vec::new();
    for caps in FIELD_RE.captures_iter(body) {
        let (Some(whole), Some(name), Some(kind)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if depth_at(body, whole.start()) != 1 {
            continue;
        }
        if seen.insert(name.as_str()) {
            attributes.push(attribute(name.as_str(), semantic_type(kind.as_str())));
        }
    }
    attributes
}

fn semantic_type(validator: &str) -> &str {
    match validator {
        "string" => "string",
        "number" | "float64" | "int64" | "bigint" => "number",
        "boolean" => "boolean",
        "id" => "id",
        "array" => "array",
        "object" | "record" => "object",
        other => other,
    }
}
