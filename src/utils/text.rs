//! Identifier and label shaping.

/// Uppercase the first character, keep the rest untouched.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Deterministic lowercase slug: runs of non-alphanumerics become one `-`.
///
/// Returns `root` when nothing alphanumeric remains (e.g. for `/`).
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug.to_string()
    }
}

/// `order_items` → `OrderItems`, `userProfiles` → `UserProfiles`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(capitalize)
        .collect()
}

/// Human title for one URL segment: `api-keys` → `Api Keys`, `:id` → `Id`.
pub fn title_from_segment(segment: &str) -> String {
    let words: Vec<String> = segment
        .split(|c: char| matches!(c, '-' | '_' | ':' | '.' | ' '))
        .filter(|t| !t.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        "Home".to_string()
    } else {
        words.join(" ")
    }
}
