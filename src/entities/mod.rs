//! Business data model extraction from back-end schema excerpts.
//!
//! Each schema dialect is a [`SchemaExtractor`] strategy. The merge step only
//! walks the registered list, so adding a dialect never touches it.

use crate::config::EntityConfig;
use crate::domain::{
    BusinessAttribute, BusinessDataModel, BusinessEntity, BusinessRelationship,
    ContextSourceInput, FileExcerpt, Surface, ToolWarning, WarningCode, MAX_ENTITIES,
};
use crate::utils::{is_under_prefix, pascal_case, resolve_generated_at};
use crate::validate::validate_business_data_model;
use std::collections::HashSet;

pub mod block_orm;
pub mod document_table;
mod source_text;
pub mod sql_ddl;
pub mod table_builder;

pub use block_orm::BlockOrmExtractor;
pub use document_table::DocumentTableExtractor;
pub use sql_ddl::SqlDdlExtractor;
pub use table_builder::TableBuilderExtractor;

/// Relationship type emitted for every inferred foreign key.
pub const ONE_TO_MANY: &str = "1:N";

/// One schema dialect.
pub trait SchemaExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, sample: &FileExcerpt) -> bool;

    fn extract(&self, sample: &FileExcerpt, source_id: &str) -> Vec<BusinessEntity>;
}

/// The stock dialects, in merge order.
pub fn default_extractors(config: &EntityConfig) -> Vec<Box<dyn SchemaExtractor>> {
    vec![
        Box::new(DocumentTableExtractor),
        Box::new(BlockOrmExtractor),
        Box::new(SqlDdlExtractor),
        Box::new(TableBuilderExtractor::new(&config.table_builders)),
    ]
}

pub struct EntityExtractor {
    config: EntityConfig,
    extractors: Vec<Box<dyn SchemaExtractor>>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(EntityConfig::default())
    }
}

impl EntityExtractor {
    pub fn new(config: EntityConfig) -> Self {
        let extractors = default_extractors(&config);
        Self { config, extractors }
    }

    pub fn with_extractors(
        config: EntityConfig,
        extractors: Vec<Box<dyn SchemaExtractor>>,
    ) -> Self {
        Self { config, extractors }
    }

    /// Append a dialect after the registered ones.
    pub fn register(mut self, extractor: Box<dyn SchemaExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn build(
        &self,
        product_id: &str,
        sources: &[ContextSourceInput],
        generated_at: Option<&str>,
    ) -> BusinessDataModel {
        let generated_at = resolve_generated_at(generated_at);
        let mut model = BusinessDataModel::empty(product_id, &generated_at);
        let mut seen: HashSet<String> = HashSet::new();
        let max_entities = self.config.max_entities.min(MAX_ENTITIES);

        for source in sources {
            let source_id = source.source_id.as_str();
            let buckets = source.bucket_ids(&Surface::Platform);
            if buckets.is_empty() {
                model.warnings.push(ToolWarning::for_source(
                    WarningCode::BusinessModelNoPlatformBuckets,
                    "Source declares no platform/back-end surface buckets",
                    source_id,
                ));
                continue;
            }

            let samples: Vec<&FileExcerpt> = source
                .structure_summary
                .file_excerpts
                .iter()
                .filter(|excerpt| buckets.iter().any(|b| is_under_prefix(&excerpt.path, b)))
                .collect();
            if samples.is_empty() {
                model.warnings.push(ToolWarning::for_source(
                    WarningCode::BusinessModelMissingSamples,
                    "No file excerpts were found under the platform buckets",
                    source_id,
                ));
                continue;
            }

            for entity in self.extract_source(&samples, source_id) {
                if model.entities.len() >= max_entities {
                    tracing::debug!(source = source_id, cap = max_entities, "entity cap reached");
                    break;
                }
                if self.is_technical(&entity.id) || !seen.insert(entity.id.clone()) {
                    continue;
                }
                model.entities.push(entity);
            }
        }

        model.relationships = infer_relationships(&model.entities);

        tracing::debug!(
            product = product_id,
            entities = model.entities.len(),
            relationships = model.relationships.len(),
            "built business data model"
        );

        if model.entities.is_empty() {
            model.warnings.push(ToolWarning::new(
                WarningCode::BusinessModelEmpty,
                "No business entities could be extracted from the platform sources",
            ));
        }

        validate_business_data_model(model)
    }

    fn extract_source(&self, samples: &[&FileExcerpt], source_id: &str) -> Vec<BusinessEntity> {
        let mut entities = Vec::new();
        for extractor in &self.extractors {
            for sample in samples.iter().filter(|s| extractor.can_handle(s)) {
                let found = extractor.extract(sample, source_id);
                if !found.is_empty() {
                    tracing::debug!(
                        dialect = extractor.name(),
                        path = %sample.path,
                        count = found.len(),
                        "extracted entities"
                    );
                }
                entities.extend(found);
            }
        }
        entities
    }

    fn is_technical(&self, entity_id: &str) -> bool {
        self.config.technical_denylist.iter().any(|denied| denied.eq_ignore_ascii_case(entity_id))
    }
}

/// Foreign keys whose target entity exists become `1:N` relationships.
/// References to entities that were never extracted are dropped.
pub fn infer_relationships(entities: &[BusinessEntity]) -> Vec<BusinessRelationship> {
    let known: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    let mut relationships = Vec::new();
    for entity in entities {
        for attribute in &entity.attributes {
            let Some(target) = attribute.ref_entity_id.as_deref() else {
                continue;
            };
            if known.contains(target) {
                relationships.push(BusinessRelationship {
                    from: entity.id.clone(),
                    to: target.to_string(),
                    kind: ONE_TO_MANY.to_string(),
                    via: Some(attribute.name.clone()),
                    source: entity.source.clone(),
                });
            }
        }
    }
    relationships
}

/// `projectId` → `Project`. Anything not ending in `Id` carries no reference.
pub fn infer_reference(field_name: &str) -> Option<String> {
    let stem = field_name.strip_suffix("Id")?;
    let target = pascal_case(stem);
    (!target.is_empty()).then_some(target)
}

pub(crate) fn attribute(name: &str, kind: &str) -> BusinessAttribute {
    BusinessAttribute {
        name: name.to_string(),
        kind: kind.to_string(),
        ref_entity_id: infer_reference(name),
    }
}

/// Entity named after a table/model declaration, or `None` if the name has
/// no identifier characters.
pub(crate) fn entity_for_table(
    table_name: &str,
    attributes: Vec<BusinessAttribute>,
    description: String,
    source_id: &str,
) -> Option<BusinessEntity> {
    let id = pascal_case(table_name);
    if id.is_empty() {
        return None;
    }
    Some(BusinessEntity {
        display_name: display_name(&id),
        id,
        description: Some(description),
        attributes,
        source: source_id.to_string(),
    })
}

/// `OrderItems` → `Order Items`.
fn display_name(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    let mut prev_lower = false;
    for ch in id.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        out.push(ch);
    }
    out
}

/// Build a business data model with the default [`EntityConfig`] and dialects.
pub fn build_business_data_model(
    product_id: &str,
    sources: &[ContextSourceInput],
    generated_at: Option<&str>,
) -> BusinessDataModel {
    EntityExtractor::default().build(product_id, sources, generated_at)
}
