//! Flat path index over a nested folder tree.

use crate::config::TopologyConfig;
use crate::domain::{FolderTreeNode, NodeKind};
use crate::utils::normalize_path;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Trees nested deeper than this are not walked further.
const MAX_WALK_DEPTH: usize = 64;

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+\.[A-Za-z0-9]{1,8}$").expect("valid file name regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct FolderEntry {
    pub name: String,
    /// 0 for top-level entries.
    pub depth: usize,
    pub kind: NodeKind,
    /// Full paths of direct children, in input order.
    pub children: Vec<String>,
    pub has_index_file: bool,
}

/// Full path → entry, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    entries: BTreeMap<String, FolderEntry>,
}

impl FolderIndex {
    pub fn build(tree: &[FolderTreeNode], config: &TopologyConfig) -> Self {
        let mut index = Self::default();
        for node in tree {
            index.walk(node, "", 0, config);
        }
        index
    }

    /// Returns the full path of `node`, or `None` when it was skipped.
    fn walk(
        &mut self,
        node: &FolderTreeNode,
        parent: &str,
        depth: usize,
        config: &TopologyConfig,
    ) -> Option<String> {
        if depth > MAX_WALK_DEPTH {
            return None;
        }

        let name = normalize_path(&node.name);
        if name.is_empty() || name == "." {
            // A nameless wrapper stands for its parent; hoist its children.
            for child in &node.children {
                self.walk(child, parent, depth, config);
            }
            return None;
        }

        let path = if parent.is_empty() { name.clone() } else { format!("{parent}/{name}") };
        let children: Vec<String> = node
            .children
            .iter()
            .filter_map(|child| self.walk(child, &path, depth + 1, config))
            .collect();

        let has_index_file = node
            .children
            .iter()
            .any(|child| child.children.is_empty() && is_index_file(&child.name, config));
        let kind = if !node.children.is_empty() || !is_file_name(&name) {
            NodeKind::Dir
        } else {
            NodeKind::File
        };
        let display_name = name.rsplit('/').next().unwrap_or(&name).to_string();

        self.entries.insert(
            path.clone(),
            FolderEntry { name: display_name, depth, kind, children, has_index_file },
        );
        Some(path)
    }

    pub fn get(&self, path: &str) -> Option<&FolderEntry> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FolderEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names ending in a short alphanumeric extension are files.
pub fn is_file_name(name: &str) -> bool {
    FILE_NAME_RE.is_match(name)
}

fn is_index_file(name: &str, config: &TopologyConfig) -> bool {
    if !is_file_name(name) {
        return false;
    }
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    config.index_file_stems.iter().any(|s| s == stem)
        && config.index_file_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
