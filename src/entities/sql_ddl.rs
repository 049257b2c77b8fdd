//! SQL DDL: `CREATE TABLE` presence only, no column parsing.

use super::{entity_for_table, SchemaExtractor};
use crate::domain::{BusinessEntity, FileExcerpt};
use once_cell::sync::Lazy;
use regex::Regex;

static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\bcreate\s+table\s+(?:if\s+not\s+exists\s+)?(?:[`"\[]?\w+[`"\]]?\.)?[`"\[]?(\w+)[`"\]]?"#,
    )
    .expect("valid create table regex")
});

static HAS_DDL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcreate\s+table\b").expect("valid create table regex"));

pub struct SqlDdlExtractor;

impl SchemaExtractor for SqlDdlExtractor {
    fn name(&self) -> &'static str {
        "sql-ddl"
    }

    fn can_handle(&self, sample: &FileExcerpt) -> bool {
        HAS_DDL_RE.is_match(&sample.content)
    }

    fn extract(&self, sample: &FileExcerpt, source_id: &str) -> Vec<BusinessEntity> {
        CREATE_TABLE_RE
            .captures_iter(&sample.content)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let description = format!("SQL table `{}` created in {}", name, sample.path);
                entity_for_table(name, Vec::new(), description, source_id)
            })
            .collect()
    }
}
