//! Typed table-builder calls such as `pgTable("users", { ... })`. Presence only.

use super::{entity_for_table, SchemaExtractor};
use crate::domain::{BusinessEntity, FileExcerpt};
use regex::Regex;

const SCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".mjs", ".cjs"];

pub struct TableBuilderExtractor {
    /// `None` when no builder names are configured.
    call_re: Option<Regex>,
}

impl TableBuilderExtractor {
    pub fn new(builders: &[String]) -> Self {
        let names: Vec<String> =
            builders.iter().filter(|b| !b.is_empty()).map(|b| regex::escape(b)).collect();
        let call_re = if names.is_empty() {
            None
        } else {
            Regex::new(&format!(r#"\b(?:{})\s*\(\s*["'`]([^"'`]+)["'`]"#, names.join("|"))).ok()
        };
        Self { call_re }
    }
}

impl SchemaExtractor for TableBuilderExtractor {
    fn name(&self) -> &'static str {
        "table-builder"
    }

    fn can_handle(&self, sample: &FileExcerpt) -> bool {
        let path = sample.path.to_ascii_lowercase();
        self.call_re.is_some() && SCRIPT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
    }

    fn extract(&self, sample: &FileExcerpt, source_id: &str) -> Vec<BusinessEntity> {
        let Some(call_re) = &self.call_re else {
            return Vec::new();
        };
        call_re
            .captures_iter(&sample.content)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let description = format!("Table `{}` built in {}", name, sample.path);
                entity_for_table(name, Vec::new(), description, source_id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityConfig;

    fn sample(path: &str, content: &str) -> FileExcerpt {
        FileExcerpt { path: path.to_string(), content: content.to_string() }
    }

    #[test]
    fn extracts_configured_builders_only() {
        let ex = TableBuilderExtractor::new(&EntityConfig::default().table_builders);
        let code = r#"
export const users = pgTable("users", { id: serial("id") });
export const teams = sqliteTable('team_members', {});
export const other = makeTable("ignored", {});
"#;
        let s = sample("api/db/schema.ts", code);
        assert!(ex.can_handle(&s));
        let ids: Vec<String> = ex.extract(&s, "repo").into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["Users".to_string(), "TeamMembers".to_string()]);
    }

    #[test]
    fn no_builders_means_no_matches() {
        let ex = TableBuilderExtractor::new(&[]);
        let s = sample("api/db/schema.ts", r#"pgTable("users", {})"#);
        assert!(!ex.can_handle(&s));
        assert!(ex.extract(&s, "repo").is_empty());
    }

    #[test]
    fn ignores_non_script_files() {
        let ex = TableBuilderExtractor::new(&EntityConfig::default().table_builders);
        assert!(!ex.can_handle(&sample("api/notes.md", r#"pgTable("users")"#)));
    }
}
