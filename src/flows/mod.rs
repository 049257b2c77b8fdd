//! Representative user flows derived from the sitemap's route tree.

use crate::config::FlowConfig;
use crate::domain::{
    ContextSourceInput, FlowStep, ToolWarning, UiSitemap, UserFlow, UserFlows, WarningCode,
    MAX_FLOWS, MAX_FLOW_STEPS,
};
use crate::utils::{path_segments, resolve_generated_at, slugify, title_from_segment};
use crate::validate::validate_user_flows;

pub mod tree;

pub use tree::RouteTree;

#[derive(Debug, Clone, Default)]
pub struct FlowBuilder {
    config: FlowConfig,
}

impl FlowBuilder {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    pub fn build(
        &self,
        product_id: &str,
        sitemap: &UiSitemap,
        sources: &[ContextSourceInput],
        generated_at: Option<&str>,
    ) -> UserFlows {
        let generated_at = resolve_generated_at(generated_at);
        let mut flows = UserFlows::empty(product_id, &generated_at);

        let tree = RouteTree::from_paths(sitemap.items.iter().map(|item| item.path.as_str()));
        let fallback_source = sources.first().map(|s| s.source_id.as_str()).unwrap_or(product_id);

        let max_flows = self.config.max_flows.min(MAX_FLOWS);
        for entry in self.entry_points(sitemap) {
            if flows.flows.len() >= max_flows {
                break;
            }
            flows.flows.push(self.flow_from_entry(entry, sitemap, &tree, fallback_source));
        }

        tracing::debug!(
            product = product_id,
            flows = flows.flows.len(),
            tree_nodes = tree.node_count(),
            "built user flows"
        );

        if flows.flows.is_empty() {
            flows.warnings.push(ToolWarning::new(
                WarningCode::UserFlowsEmpty,
                "No user flows could be derived because the sitemap has no entry routes",
            ));
        }

        validate_user_flows(flows)
    }

    /// Shallow sitemap paths, sorted, capped.
    fn entry_points<'a>(&self, sitemap: &'a UiSitemap) -> Vec<&'a str> {
        let mut entries: Vec<&str> = sitemap
            .items
            .iter()
            .map(|item| item.path.as_str())
            .filter(|path| path_segments(path).len() <= self.config.max_entry_segments)
            .collect();
        entries.sort_unstable();
        entries.truncate(self.config.max_entry_points);
        entries
    }

    fn flow_from_entry(
        &self,
        entry: &str,
        sitemap: &UiSitemap,
        tree: &RouteTree,
        fallback_source: &str,
    ) -> UserFlow {
        let entry_step = step_for(entry, 1, sitemap);
        let name = entry_step.title.clone();
        let source = sitemap
            .item_by_path(entry)
            .map(|item| item.source.clone())
            .unwrap_or_else(|| fallback_source.to_string());

        let mut steps = vec![entry_step];
        for child in tree.children(entry).take(self.config.max_children_per_flow) {
            steps.push(step_for(child, steps.len() + 1, sitemap));
        }
        steps.truncate(self.config.max_steps_per_flow.min(MAX_FLOW_STEPS));

        UserFlow { id: format!("flow-{}", slugify(entry)), name, steps, source }
    }
}

fn step_for(path: &str, order: usize, sitemap: &UiSitemap) -> FlowStep {
    match sitemap.item_by_path(path) {
        Some(item) => FlowStep {
            order,
            path: path.to_string(),
            title: item.title.clone(),
            screen_id: Some(item.id.clone()),
        },
        None => FlowStep {
            order,
            path: path.to_string(),
            title: title_from_segment(path_segments(path).last().copied().unwrap_or("")),
            screen_id: None,
        },
    }
}

/// Build user flows with the default [`FlowConfig`].
pub fn build_user_flows(
    product_id: &str,
    sitemap: &UiSitemap,
    sources: &[ContextSourceInput],
    generated_at: Option<&str>,
) -> UserFlows {
    FlowBuilder::default().build(product_id, sitemap, sources, generated_at)
}
