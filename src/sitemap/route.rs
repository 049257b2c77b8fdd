//! File-system route path → URL template.

use crate::config::SitemapConfig;

/// Normalize a file-system route path into a canonical URL template.
///
/// `apps/web/app/routes/projects/$projectId/index.tsx` → `/projects/:projectId`.
/// Returns `None` when the path has no route-anchor segment.
pub fn normalize_route_path(path: &str, config: &SitemapConfig) -> Option<String> {
    let forward = path.replace('\\', "/");
    let segments: Vec<&str> = forward.split('/').collect();
    let anchor = segments.iter().position(|segment| *segment == config.route_anchor)?;

    let kept: Vec<String> = segments[anchor + 1..]
        .iter()
        .filter_map(|segment| normalize_segment(segment, config))
        .collect();

    Some(format!("/{}", kept.join("/")))
}

fn normalize_segment(segment: &str, config: &SitemapConfig) -> Option<String> {
    let stem = strip_route_extension(segment, &config.route_extensions);
    if stem.is_empty() || stem == "index" || config.layout_tokens.iter().any(|t| t == stem) {
        return None;
    }

    match stem.strip_prefix('$') {
        Some("") => Some(":splat".to_string()),
        Some(param) => Some(format!(":{param}")),
        None => Some(stem.to_string()),
    }
}

fn strip_route_extension<'a>(segment: &'a str, extensions: &[String]) -> &'a str {
    let lower = segment.to_ascii_lowercase();
    for ext in extensions {
        if lower.ends_with(ext.as_str()) {
            return &segment[..segment.len() - ext.len()];
        }
    }
    segment
}
