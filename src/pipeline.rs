//! Orchestration of the four builders.
//!
//! The sitemap is built first and feeds the flow builder; entities and
//! topology read the sources independently. All four artifacts share one
//! `generatedAt` value.

use crate::config::ExtractionConfig;
use crate::domain::{ContextSourceInput, ProductContextInputs};
use crate::entities::EntityExtractor;
use crate::flows::FlowBuilder;
use crate::sitemap::SitemapBuilder;
use crate::topology::TopologyBuilder;
use crate::utils::resolve_generated_at;

pub struct ContextPipeline {
    sitemap: SitemapBuilder,
    flows: FlowBuilder,
    entities: EntityExtractor,
    topology: TopologyBuilder,
}

impl Default for ContextPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl ContextPipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            sitemap: SitemapBuilder::new(config.sitemap),
            flows: FlowBuilder::new(config.flows),
            entities: EntityExtractor::new(config.entities),
            topology: TopologyBuilder::new(config.topology),
        }
    }

    /// Replace the entity extractor, e.g. one with extra dialects registered.
    pub fn with_entity_extractor(mut self, entities: EntityExtractor) -> Self {
        self.entities = entities;
        self
    }

    pub fn run(
        &self,
        product_id: &str,
        sources: &[ContextSourceInput],
        generated_at: Option<&str>,
    ) -> ProductContextInputs {
        let generated_at = resolve_generated_at(generated_at);
        let ts = Some(generated_at.as_str());

        let ui_sitemap = self.sitemap.build(product_id, sources, ts);
        let user_flows = self.flows.build(product_id, &ui_sitemap, sources, ts);
        let business_data_model = self.entities.build(product_id, sources, ts);
        let repo_folder_topology = self.topology.build(product_id, sources, ts);

        let warnings = ui_sitemap.warnings.len()
            + user_flows.warnings.len()
            + business_data_model.warnings.len()
            + repo_folder_topology.warnings.len();
        tracing::info!(
            product = product_id,
            sources = sources.len(),
            screens = ui_sitemap.items.len(),
            flows = user_flows.flows.len(),
            entities = business_data_model.entities.len(),
            surfaces = repo_folder_topology.surfaces.len(),
            warnings,
            "extracted product context"
        );

        ProductContextInputs { ui_sitemap, user_flows, business_data_model, repo_folder_topology }
    }
}

/// Run every builder with the default [`ExtractionConfig`].
pub fn build_product_context_inputs(
    product_id: &str,
    sources: &[ContextSourceInput],
    generated_at: Option<&str>,
) -> ProductContextInputs {
    ContextPipeline::default().run(product_id, sources, generated_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileExcerpt, StructureSummary, Surface, SurfaceSignal, WarningCode};

    fn web_and_api() -> ContextSourceInput {
        ContextSourceInput {
            source_type: "github".to_string(),
            source_id: "acme/app".to_string(),
            source_label: "app".to_string(),
            structure_summary: StructureSummary {
                route_paths: vec![
                    "web/app/routes/_index.tsx".to_string(),
                    "web/app/routes/projects.tsx".to_string(),
                    "web/app/routes/projects/$projectId.tsx".to_string(),
                ],
                file_excerpts: vec![FileExcerpt {
                    path: "api/prisma/schema.prisma".to_string(),
                    content: "model Project {\n  id String @id\n  ownerId String\n}\n\
                              model Owner {\n  id String @id\n}\n"
                        .to_string(),
                }],
                ..StructureSummary::default()
            },
            surface_signals: vec![
                SurfaceSignal {
                    surface: Surface::FrontEnd,
                    bucket_id: "web".to_string(),
                    evidence: None,
                },
                SurfaceSignal {
                    surface: Surface::Platform,
                    bucket_id: "api".to_string(),
                    evidence: None,
                },
            ],
        }
    }

    #[test]
    fn artifacts_share_one_timestamp_when_none_is_given() {
        let out = build_product_context_inputs("acme", &[web_and_api()], None);
        let ts = &out.ui_sitemap.generated_at;
        assert_eq!(&out.user_flows.generated_at, ts);
        assert_eq!(&out.business_data_model.generated_at, ts);
        assert_eq!(&out.repo_folder_topology.generated_at, ts);
    }

    #[test]
    fn runs_all_builders() {
        let ts = Some("2024-05-01T00:00:00+00:00");
        let out = build_product_context_inputs("acme", &[web_and_api()], ts);
        assert!(!out.ui_sitemap.items.is_empty());
        assert!(!out.user_flows.flows.is_empty());
        let entities = &out.business_data_model.entities;
        let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Project", "Owner"]);
        assert_eq!(out.business_data_model.relationships.len(), 1);
        assert_eq!(out.repo_folder_topology.surfaces.len(), 2);
    }

    #[test]
    fn custom_config_is_honored() {
        let mut config = ExtractionConfig::default();
        config.sitemap.max_items = 1;
        let out = ContextPipeline::new(config).run("acme", &[web_and_api()], Some("ts"));
        assert_eq!(out.ui_sitemap.items.len(), 1);
        assert_eq!(out.ui_sitemap.cursor.as_deref(), Some("truncated"));
    }

    #[test]
    fn no_sources_yields_empty_artifacts_with_warnings() {
        let out = build_product_context_inputs("acme", &[], Some("ts"));
        assert_eq!(out.ui_sitemap.warnings[0].code, WarningCode::UiSitemapEmpty);
        assert_eq!(out.user_flows.warnings[0].code, WarningCode::UserFlowsEmpty);
        assert_eq!(out.business_data_model.warnings[0].code, WarningCode::BusinessModelEmpty);
        assert!(out.repo_folder_topology.warnings.is_empty());
    }
}
