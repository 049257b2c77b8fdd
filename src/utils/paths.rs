//! Path normalization

/// Forward slashes only, no leading `./` or `/`, no trailing `/`.
pub fn normalize_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let trimmed = forward.trim_start_matches("./").trim_start_matches('/');
    trimmed.trim_end_matches('/').to_string()
}

/// Whether `path` equals `prefix` or lives beneath it, compared segment-wise.
///
/// An empty prefix (or `.`) covers the whole repository.
pub fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let path = normalize_path(path);
    let prefix = normalize_path(prefix);
    if prefix.is_empty() || prefix == "." {
        return true;
    }
    path == prefix || path.strip_prefix(&prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Non-empty `/`-separated segments of a URL or file path.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
