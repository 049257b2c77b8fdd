//! Repository folder topology per surface, with semantic-folder scoring.

use crate::config::TopologyConfig;
use crate::domain::{
    ContextSourceInput, RepoFolderTopology, Surface, ToolWarning, TopologyNode, TopologySurface,
    WarningCode, MAX_SEMANTIC_FOLDERS, MAX_SUBTREE_NODES,
};
use crate::utils::{is_under_prefix, normalize_path, path_segments, resolve_generated_at};
use crate::validate::validate_repo_folder_topology;

pub mod index;
pub mod scoring;

pub use index::{FolderEntry, FolderIndex};
pub use scoring::FolderScorer;

/// Surfaces that get a topology, in output order.
const TOPOLOGY_SURFACES: [Surface; 2] = [Surface::FrontEnd, Surface::Platform];

#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    config: TopologyConfig,
}

impl TopologyBuilder {
    pub fn new(config: TopologyConfig) -> Self {
        Self { config }
    }

    pub fn build(
        &self,
        product_id: &str,
        sources: &[ContextSourceInput],
        generated_at: Option<&str>,
    ) -> RepoFolderTopology {
        let generated_at = resolve_generated_at(generated_at);
        let mut topology = RepoFolderTopology::empty(product_id, &generated_at);

        for source in sources {
            let source_id = source.source_id.as_str();
            let surfaces: Vec<(Surface, Vec<String>)> = TOPOLOGY_SURFACES
                .iter()
                .map(|surface| (surface.clone(), root_paths(source, surface)))
                .filter(|(_, roots)| !roots.is_empty())
                .collect();

            if surfaces.is_empty() {
                topology.warnings.push(ToolWarning::for_source(
                    WarningCode::RepoTopologyNoSurfaces,
                    "Source declares neither front-end nor platform surface buckets",
                    source_id,
                ));
                continue;
            }

            let index = FolderIndex::build(&source.structure_summary.folder_tree, &self.config);
            if index.is_empty() {
                topology.warnings.push(ToolWarning::for_source(
                    WarningCode::RepoTopologyMissingTree,
                    "Source has no folder tree; surfaces carry root paths only",
                    source_id,
                ));
            }
            tracing::debug!(source = source_id, paths = index.len(), "indexed folder tree");

            let scorer = FolderScorer::new(&self.config);
            for (surface, roots) in surfaces {
                let (nodes, truncated) = self.subtree(&index, &roots);
                let semantic_folders = scorer.score(
                    &index,
                    &roots,
                    self.config.max_semantic_folders.min(MAX_SEMANTIC_FOLDERS),
                );
                topology.surfaces.push(TopologySurface {
                    source_id: source_id.to_string(),
                    surface,
                    root_paths: roots,
                    nodes,
                    truncated,
                    semantic_folders,
                });
            }
        }

        validate_repo_folder_topology(topology)
    }

    /// Nodes at or below a root, at most `max_subtree_depth` levels down,
    /// sorted by path. Depth counts segments below the root, so a
    /// whole-repository root (`""` or `.`) puts top-level entries at depth 1.
    /// The flag reports whether the node cap cut the list.
    fn subtree(&self, index: &FolderIndex, roots: &[String]) -> (Vec<TopologyNode>, bool) {
        let max_nodes = self.config.max_subtree_nodes.min(MAX_SUBTREE_NODES);
        let mut nodes = Vec::new();
        let mut truncated = false;

        for (path, entry) in index.iter() {
            let Some(root) = roots.iter().find(|root| is_under_prefix(path, root)) else {
                continue;
            };
            let depth = path_segments(path).len().saturating_sub(root_depth(root));
            if depth > self.config.max_subtree_depth {
                continue;
            }
            if nodes.len() >= max_nodes {
                truncated = true;
                break;
            }
            nodes.push(TopologyNode {
                path: path.to_string(),
                name: entry.name.clone(),
                kind: entry.kind,
                depth,
            });
        }

        (nodes, truncated)
    }
}

fn root_depth(root: &str) -> usize {
    if root == "." {
        0
    } else {
        path_segments(root).len()
    }
}

/// Distinct normalized bucket prefixes for `surface`, in declaration order.
fn root_paths(source: &ContextSourceInput, surface: &Surface) -> Vec<String> {
    let mut roots: Vec<String> = Vec::new();
    for bucket in source.bucket_ids(surface) {
        let root = normalize_path(&bucket);
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

/// Build a repository folder topology with the default [`TopologyConfig`].
pub fn build_repo_folder_topology(
    product_id: &str,
    sources: &[ContextSourceInput],
    generated_at: Option<&str>,
) -> RepoFolderTopology {
    TopologyBuilder::default().build(product_id, sources, generated_at)
}
