//! Block-style ORM dialect: `model Name { field Type ... }` in `.prisma` files.

use super::source_text::balanced_body;
use super::{attribute, entity_for_table, SchemaExtractor};
use crate::domain::{BusinessAttribute, BusinessEntity, FileExcerpt};
use once_cell::sync::Lazy;
use regex::Regex;

static MODEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*model\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{")
        .expect("valid model block regex")
});

pub struct BlockOrmExtractor;

impl SchemaExtractor for BlockOrmExtractor {
    fn name(&self) -> &'static str {
        "block-orm"
    }

    fn can_handle(&self, sample: &FileExcerpt) -> bool {
        sample.path.to_ascii_lowercase().ends_with(".prisma")
    }

    fn extract(&self, sample: &FileExcerpt, source_id: &str) -> Vec<BusinessEntity> {
        MODEL_RE
            .captures_iter(&sample.content)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let body = balanced_body(&sample.content, caps.get(0)?.end(), b'{', b'}');
                let description = format!("Model `{}` declared in {}", name, sample.path);
                entity_for_table(name, parse_body(body), description, source_id)
            })
            .collect()
    }
}

fn parse_body(body: &str) -> Vec<BusinessAttribute> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//") && !line.starts_with("@@"))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let raw_type = parts.next()?;
            let base = raw_type.trim_end_matches('?').trim_end_matches("[]");
            Some(attribute(name, semantic_type(base)))
        })
        .collect()
}

fn semantic_type(scalar: &str) -> &str {
    match scalar {
        "String" => "string",
        "Int" | "Float" | "Decimal" | "BigInt" => "number",
        "Boolean" => "boolean",
        "DateTime" => "datetime",
        "Json" => "object",
        "Bytes" => "bytes",
        other => other,
    }
}
