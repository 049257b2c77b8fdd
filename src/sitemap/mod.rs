//! UI sitemap extraction from front-end route files.

use crate::config::SitemapConfig;
use crate::domain::{
    ContextSourceInput, NavGroup, Surface, ToolWarning, UiSitemap, UiSitemapItem, WarningCode,
    MAX_SITEMAP_ITEMS,
};
use crate::utils::{
    is_under_prefix, path_segments, resolve_generated_at, slugify, title_from_segment,
};
use crate::validate::validate_ui_sitemap;
use std::collections::HashSet;

pub mod route;

pub use route::normalize_route_path;

pub const INTERNAL_FLAG: &str = "internal";

#[derive(Debug, Clone, Default)]
pub struct SitemapBuilder {
    config: SitemapConfig,
}

impl SitemapBuilder {
    pub fn new(config: SitemapConfig) -> Self {
        Self { config }
    }

    pub fn build(
        &self,
        product_id: &str,
        sources: &[ContextSourceInput],
        generated_at: Option<&str>,
    ) -> UiSitemap {
        let generated_at = resolve_generated_at(generated_at);
        let mut sitemap = UiSitemap::empty(product_id, &generated_at);
        let mut seen: HashSet<String> = HashSet::new();

        for source in sources {
            let buckets = source.bucket_ids(&Surface::FrontEnd);
            if buckets.is_empty() {
                tracing::debug!(source = %source.source_id, "no front-end buckets");
                continue;
            }

            for raw_path in &source.structure_summary.route_paths {
                if !buckets.iter().any(|bucket| is_under_prefix(raw_path, bucket)) {
                    continue;
                }
                let Some(path) = normalize_route_path(raw_path, &self.config) else {
                    continue;
                };
                if seen.contains(&path) || self.is_hidden(&path) {
                    continue;
                }
                seen.insert(path.clone());
                sitemap.items.push(self.classify(path, &source.source_id));
            }
        }

        tracing::debug!(product = product_id, items = sitemap.items.len(), "built ui sitemap");

        let max_items = self.config.max_items.min(MAX_SITEMAP_ITEMS);
        if sitemap.items.len() > max_items {
            sitemap.items.truncate(max_items);
            sitemap.cursor = Some("truncated".to_string());
        }

        if sitemap.items.is_empty() {
            sitemap.warnings.push(ToolWarning::new(
                WarningCode::UiSitemapEmpty,
                "No front-end routes were found under the declared front-end buckets",
            ));
        }

        validate_ui_sitemap(sitemap)
    }

    fn classify(&self, path: String, source_id: &str) -> UiSitemapItem {
        let segments = path_segments(&path);
        let title = title_from_segment(segments.last().copied().unwrap_or(""));
        let nav_group = nav_group_for(&segments);
        // Auth routes (login, signup, ...) are marked as not requiring auth;
        // every other page is marked as requiring it.
        let requires_auth = !self.matches_auth_route(&segments);
        let flags = self.has_internal_segment(&segments).then(|| vec![INTERNAL_FLAG.to_string()]);

        UiSitemapItem {
            id: slugify(&path),
            path,
            title,
            nav_group,
            requires_auth,
            surface_hint: Surface::FrontEnd.to_string(),
            source: source_id.to_string(),
            flags,
        }
    }

    /// Routes whose first segment is an internal token never reach the sitemap.
    fn is_hidden(&self, path: &str) -> bool {
        path_segments(path)
            .first()
            .is_some_and(|first| contains_token(&self.config.internal_tokens, first))
    }

    fn has_internal_segment(&self, segments: &[&str]) -> bool {
        segments.iter().any(|s| contains_token(&self.config.internal_tokens, s))
    }

    fn matches_auth_route(&self, segments: &[&str]) -> bool {
        segments.iter().any(|s| contains_token(&self.config.auth_tokens, s))
    }
}

fn contains_token(tokens: &[String], segment: &str) -> bool {
    tokens.iter().any(|token| token.eq_ignore_ascii_case(segment))
}

fn nav_group_for(segments: &[&str]) -> NavGroup {
    let Some(first) = segments.first() else {
        return NavGroup::Primary;
    };
    if first.eq_ignore_ascii_case("settings") {
        NavGroup::Secondary
    } else if first.eq_ignore_ascii_case("app") || first.eq_ignore_ascii_case("product") {
        NavGroup::Primary
    } else {
        NavGroup::None
    }
}

/// Build a UI sitemap with the default [`SitemapConfig`].
pub fn build_ui_sitemap(
    product_id: &str,
    sources: &[ContextSourceInput],
    generated_at: Option<&str>,
) -> UiSitemap {
    SitemapBuilder::default().build(product_id, sources, generated_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StructureSummary, SurfaceSignal};

    const TS: Option<&str> = Some("2024-05-01T00:00:00+00:00");

    fn source(routes: &[&str], signals: &[(&str, &str)]) -> ContextSourceInput {
        ContextSourceInput {
            source_type: "github".to_string(),
            source_id: "src-1".to_string(),
            source_label: "web".to_string(),
            structure_summary: StructureSummary {
                route_paths: routes.iter().map(|r| r.to_string()).collect(),
                ..StructureSummary::default()
            },
            surface_signals: signals
                .iter()
                .map(|(surface, bucket)| SurfaceSignal {
                    surface: Surface::from(*surface),
                    bucket_id: bucket.to_string(),
                    evidence: None,
                })
                .collect(),
        }
    }

    #[test]
    fn routes_outside_front_end_buckets_are_excluded() {
        let src = source(
            &["apps/web/app/routes/login.tsx", "apps/docs/app/routes/guide.tsx"],
            &[("front-end", "apps/web"), ("docs", "apps/docs")],
        );
        let sitemap = build_ui_sitemap("prod", &[src], TS);
        let paths: Vec<&str> = sitemap.items.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/login"]);
    }

    #[test]
    fn classifies_nav_group_auth_and_flags() {
        let src = source(
            &[
                "web/app/routes/settings/profile.tsx",
                "web/app/routes/app/dashboard.tsx",
                "web/app/routes/login.tsx",
                "web/app/routes/reports/debug.tsx",
            ],
            &[("front-end", "web")],
        );
        let sitemap = build_ui_sitemap("prod", &[src], TS);

        let settings = sitemap.item_by_path("/settings/profile").expect("settings");
        assert_eq!(settings.nav_group, NavGroup::Secondary);
        assert_eq!(settings.title, "Profile");
        assert!(settings.requires_auth);

        let dashboard = sitemap.item_by_path("/app/dashboard").expect("dashboard");
        assert_eq!(dashboard.nav_group, NavGroup::Primary);
        assert_eq!(dashboard.id, "app-dashboard");

        let login = sitemap.item_by_path("/login").expect("login");
        assert!(!login.requires_auth);
        assert_eq!(login.nav_group, NavGroup::None);

        let debug = sitemap.item_by_path("/reports/debug").expect("nested internal stays visible");
        assert_eq!(debug.flags.as_deref(), Some(&["internal".to_string()][..]));
    }

    #[test]
    fn internal_root_routes_and_duplicates_are_skipped() {
        let src = source(
            &[
                "web/routes/health.ts",
                "web/routes/storybook/button.tsx",
                "web/routes/about.tsx",
                "web/routes/about/index.tsx",
            ],
            &[("front-end", "web")],
        );
        let sitemap = build_ui_sitemap("prod", &[src], TS);
        assert_eq!(sitemap.items.len(), 1);
        assert_eq!(sitemap.items[0].path, "/about");
        assert!(sitemap.warnings.is_empty());
    }

    #[test]
    fn empty_routes_warn() {
        let src = source(&[], &[("front-end", "web")]);
        let sitemap = build_ui_sitemap("prod", &[src], TS);
        assert!(sitemap.items.is_empty());
        let codes: Vec<WarningCode> = sitemap.warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec![WarningCode::UiSitemapEmpty]);
    }

    #[test]
    fn truncates_and_sets_cursor() {
        let routes: Vec<String> = (0..5).map(|i| format!("web/routes/page{i}.tsx")).collect();
        let refs: Vec<&str> = routes.iter().map(String::as_str).collect();
        let src = source(&refs, &[("front-end", "web")]);
        let config = SitemapConfig { max_items: 3, ..SitemapConfig::default() };

        let sitemap = SitemapBuilder::new(config).build("prod", &[src], TS);
        assert_eq!(sitemap.items.len(), 3);
        assert_eq!(sitemap.items[0].path, "/page0");
        assert_eq!(sitemap.cursor.as_deref(), Some("truncated"));
    }
}
