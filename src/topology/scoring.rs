//! Semantic-folder scoring.
//!
//! A folder earns points for living under a feature/domain convention, for
//! not being structural boilerplate, for sitting at a moderate depth, and for
//! exposing an index file. Each point carries a reason code.

use super::index::{FolderEntry, FolderIndex};
use crate::config::TopologyConfig;
use crate::domain::{NodeKind, SemanticFolder};
use crate::utils::{is_under_prefix, normalize_path, path_segments};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const REASON_PREFERRED_ROOT: &str = "under_preferred_root";
pub const REASON_NOT_IN_DENYLIST: &str = "not_in_denylist";
pub const REASON_DEPTH: &str = "depth_2_5";
pub const REASON_HAS_INDEX: &str = "has_index";

const PREFERRED_ROOT_WEIGHT: f64 = 0.4;
const NOT_IN_DENYLIST_WEIGHT: f64 = 0.3;
const DEPTH_WEIGHT: f64 = 0.2;
const HAS_INDEX_WEIGHT: f64 = 0.1;

static FOLDER_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]{3,24}$").expect("valid folder name regex"));

pub struct FolderScorer<'a> {
    config: &'a TopologyConfig,
}

impl<'a> FolderScorer<'a> {
    pub fn new(config: &'a TopologyConfig) -> Self {
        Self { config }
    }

    /// Score every directory strictly below one of `root_paths`, merge folders
    /// sharing a name, and return the best `limit` by score then name.
    pub fn score(
        &self,
        index: &FolderIndex,
        root_paths: &[String],
        limit: usize,
    ) -> Vec<SemanticFolder> {
        let mut folders: Vec<SemanticFolder> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for (path, entry) in index.iter() {
            if entry.kind != NodeKind::Dir {
                continue;
            }
            let Some(root) = root_paths
                .iter()
                .map(|r| normalize_path(r))
                .find(|r| is_under_prefix(path, r) && path != r.as_str())
            else {
                continue;
            };
            let Some((score, reason)) = self.score_folder(path, &root, entry) else {
                continue;
            };

            match by_name.get(&entry.name) {
                Some(&slot) => {
                    let folder = &mut folders[slot];
                    folder.paths.push(path.to_string());
                    if score > folder.score {
                        folder.score = score;
                        folder.reason = reason;
                    }
                }
                None => {
                    by_name.insert(entry.name.clone(), folders.len());
                    folders.push(SemanticFolder {
                        name: entry.name.clone(),
                        paths: vec![path.to_string()],
                        reason,
                        score,
                    });
                }
            }
        }

        folders.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        folders.truncate(limit);
        folders
    }

    fn score_folder(
        &self,
        path: &str,
        root: &str,
        entry: &FolderEntry,
    ) -> Option<(f64, Vec<String>)> {
        let name = entry.name.as_str();
        if self.is_structural(name) || !FOLDER_NAME_RE.is_match(name) {
            return None;
        }

        let relative = path.strip_prefix(root).unwrap_or(path).trim_start_matches('/');
        let relative_depth = path_segments(relative).len();

        let mut score = 0.0;
        let mut reason = Vec::new();
        if self.under_preferred_root(relative) {
            score += PREFERRED_ROOT_WEIGHT;
            reason.push(REASON_PREFERRED_ROOT.to_string());
        }
        score += NOT_IN_DENYLIST_WEIGHT;
        reason.push(REASON_NOT_IN_DENYLIST.to_string());
        if (2..=5).contains(&relative_depth) {
            score += DEPTH_WEIGHT;
            reason.push(REASON_DEPTH.to_string());
        }
        if entry.has_index_file {
            score += HAS_INDEX_WEIGHT;
            reason.push(REASON_HAS_INDEX.to_string());
        }

        Some((round_score(score), reason))
    }

    fn is_structural(&self, name: &str) -> bool {
        self.config.structural_denylist.iter().any(|denied| denied.eq_ignore_ascii_case(name))
    }

    /// Preferred roots are matched against the path below the surface root,
    /// so a convention folder above the root earns nothing.
    fn under_preferred_root(&self, relative: &str) -> bool {
        self.config.preferred_roots.iter().any(|prefix| relative.starts_with(prefix.as_str()))
    }
}

fn round_score(score: f64) -> f64 {
    (score.min(1.0) * 100.0).round() / 100.0
}
