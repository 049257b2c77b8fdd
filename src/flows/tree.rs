//! Prefix tree over sitemap paths.

use crate::utils::path_segments;
use std::collections::{BTreeMap, BTreeSet};

pub const ROOT: &str = "/";

/// Parent → children map where every intermediate prefix is a node.
///
/// Children are kept in lexicographic order so traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    children: BTreeMap<String, BTreeSet<String>>,
}

impl RouteTree {
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tree = Self::default();
        for path in paths {
            tree.insert(path);
        }
        tree
    }

    pub fn insert(&mut self, path: &str) {
        let mut parent = ROOT.to_string();
        let mut current = String::new();
        for segment in path_segments(path) {
            current.push('/');
            current.push_str(segment);
            self.children.entry(parent).or_default().insert(current.clone());
            parent = current.clone();
        }
    }

    /// Direct children of `path`, sorted.
    pub fn children(&self, path: &str) -> impl Iterator<Item = &str> {
        self.children.get(path).into_iter().flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn node_count(&self) -> usize {
        let mut nodes: BTreeSet<&str> = BTreeSet::new();
        for (parent, kids) in &self.children {
            nodes.insert(parent);
            nodes.extend(kids.iter().map(String::as_str));
        }
        nodes.len()
    }
}
