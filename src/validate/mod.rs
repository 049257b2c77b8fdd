//! Artifact validators.
//!
//! Every builder passes its output through one of these before returning.
//! A malformed artifact is never handed out: its payload arrays are emptied,
//! the schema tag is reset, and a `schema_validation_failed` warning is
//! appended. `productId` and `generatedAt` are kept.

use crate::domain::{
    BusinessDataModel, RepoFolderTopology, ToolWarning, UiSitemap, UserFlows, WarningCode,
    BUSINESS_DATA_MODEL_SCHEMA, MAX_ENTITIES, MAX_FLOWS, MAX_FLOW_STEPS, MAX_SEMANTIC_FOLDERS,
    MAX_SITEMAP_ITEMS, MAX_SUBTREE_NODES, REPO_FOLDER_TOPOLOGY_SCHEMA, UI_SITEMAP_SCHEMA,
    USER_FLOWS_SCHEMA,
};
use std::collections::HashSet;

pub mod json;

pub use json::{validate_artifact_value, ArtifactKind};

fn check_header(schema: &str, expected: &str, product_id: &str) -> Result<(), String> {
    if schema != expected {
        return Err(format!("schema tag `{schema}` does not match `{expected}`"));
    }
    if product_id.trim().is_empty() {
        return Err("productId is empty".to_string());
    }
    Ok(())
}

fn check_bound(name: &str, len: usize, max: usize) -> Result<(), String> {
    if len > max {
        return Err(format!("{name} has {len} entries, limit is {max}"));
    }
    Ok(())
}

pub(crate) fn failure_warning(schema: &str, problem: &str) -> ToolWarning {
    tracing::warn!(schema, problem, "artifact failed validation; substituting empty payload");
    ToolWarning::new(
        WarningCode::SchemaValidationFailed,
        format!("{schema} artifact failed validation: {problem}"),
    )
}

pub fn validate_ui_sitemap(mut sitemap: UiSitemap) -> UiSitemap {
    let verdict = check_header(&sitemap.schema, UI_SITEMAP_SCHEMA, &sitemap.product_id)
        .and_then(|_| check_bound("items", sitemap.items.len(), MAX_SITEMAP_ITEMS))
        .and_then(|_| {
            let mut paths = HashSet::new();
            match sitemap.items.iter().find(|item| !paths.insert(item.path.as_str())) {
                Some(dup) => Err(format!("duplicate sitemap path `{}`", dup.path)),
                None => Ok(()),
            }
        });

    if let Err(problem) = verdict {
        sitemap.warnings.push(failure_warning(UI_SITEMAP_SCHEMA, &problem));
        sitemap.schema = UI_SITEMAP_SCHEMA.to_string();
        sitemap.items.clear();
        sitemap.cursor = None;
    }
    sitemap
}

pub fn validate_user_flows(mut flows: UserFlows) -> UserFlows {
    let verdict = check_header(&flows.schema, USER_FLOWS_SCHEMA, &flows.product_id)
        .and_then(|_| check_bound("flows", flows.flows.len(), MAX_FLOWS))
        .and_then(|_| {
            flows
                .flows
                .iter()
                .try_for_each(|flow| check_bound(&flow.id, flow.steps.len(), MAX_FLOW_STEPS))
        });

    if let Err(problem) = verdict {
        flows.warnings.push(failure_warning(USER_FLOWS_SCHEMA, &problem));
        flows.schema = USER_FLOWS_SCHEMA.to_string();
        flows.flows.clear();
    }
    flows
}

pub fn validate_business_data_model(mut model: BusinessDataModel) -> BusinessDataModel {
    let verdict = check_header(&model.schema, BUSINESS_DATA_MODEL_SCHEMA, &model.product_id)
        .and_then(|_| check_bound("entities", model.entities.len(), MAX_ENTITIES))
        .and_then(|_| {
            let mut ids = HashSet::new();
            match model.entities.iter().find(|entity| !ids.insert(entity.id.as_str())) {
                Some(dup) => Err(format!("duplicate entity id `{}`", dup.id)),
                None => Ok(()),
            }
        });

    if let Err(problem) = verdict {
        model.warnings.push(failure_warning(BUSINESS_DATA_MODEL_SCHEMA, &problem));
        model.schema = BUSINESS_DATA_MODEL_SCHEMA.to_string();
        model.entities.clear();
        model.relationships.clear();
    }
    model
}

pub fn validate_repo_folder_topology(mut topology: RepoFolderTopology) -> RepoFolderTopology {
    let verdict =
        check_header(&topology.schema, REPO_FOLDER_TOPOLOGY_SCHEMA, &topology.product_id)
            .and_then(|_| {
                topology.surfaces.iter().try_for_each(|surface| {
                    check_bound("nodes", surface.nodes.len(), MAX_SUBTREE_NODES)?;
                    check_bound(
                        "semanticFolders",
                        surface.semantic_folders.len(),
                        MAX_SEMANTIC_FOLDERS,
                    )
                })
            });

    if let Err(problem) = verdict {
        topology.warnings.push(failure_warning(REPO_FOLDER_TOPOLOGY_SCHEMA, &problem));
        topology.schema = REPO_FOLDER_TOPOLOGY_SCHEMA.to_string();
        topology.surfaces.clear();
    }
    topology
}
