// src/extract/script.rs
//! Facts about the non-markup part of a component: hooks, branches, imports, CSS.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static FETCH_HOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(useQuery|useSWR|useSWRInfinite|useFetch|useInfiniteQuery|useSuspenseQuery|useLoaderData|useAxios|useResource)\s*[<(]")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static RAW_FETCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(fetch\s*\(|axios\s*[.(]|ky\s*\.)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static EFFECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buseEffect\s*\(").unwrap_or_else(|_| panic!("Invalid Regex")));
static LOADING_BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(\bif\s*\([^)]*\b\w*(loading|pending|fetching)\w*|\b\w*(loading|pending|fetching)\w*\s*(\?|&&|\|\|)|status\s*===?\s*['"](loading|pending)['"])"#,
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static ERROR_BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(\bif\s*\([^)]*\b\w*(error|err|failed)\w*|\b\w*(error|failed)\w*\s*(\?|&&|\|\|)|status\s*===?\s*['"]error['"]|\bcatch\s*[({])"#,
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static EMPTY_BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\.length\s*(===?\s*0|<\s*1|\?|&&|>\s*0)|!\s*[\w$.?]+\.length\b|\bisEmpty\b)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static MEMO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(React\.)?memo\s*[<(]").unwrap_or_else(|_| panic!("Invalid Regex")));
static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+(?:default\s+)?(?:function|const|let|class)\s+([A-Z][\w$]*)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s+(?:type\s+)?[^'";]*?\bfrom\s*['"]([^'"]+)['"]"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DYNAMIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(import\s*\(|lazy\s*\(|dynamic\s*\(|loadable\s*\()").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static VALIDATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w*(errors?|invalid|validat\w*|isValid)\b").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static MEDIA_MAX_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@media[^{]*\bmax-width\s*:").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static CSS_PX_FONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)font-size\s*:\s*\d+(\.\d+)?px").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FOCUS_SELECTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):focus(-visible|-within)?\b").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Script-level facts for one component.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptFacts {
    /// Data-fetch-shaped calls, e.g. `useQuery` or `useEffect+fetch`.
    pub fetch_hooks: Vec<String>,
    pub handles_loading: bool,
    pub handles_error: bool,
    pub handles_empty: bool,
    pub memoized: bool,
    pub exported_components: Vec<String>,
    pub imports: Vec<String>,
    pub dynamic_imports: bool,
    pub mentions_validation: bool,
    /// `@media (max-width: ...)` queries in embedded CSS.
    pub max_width_queries: usize,
    /// `font-size: Npx` declarations in embedded CSS.
    pub css_px_font_sizes: usize,
    /// Embedded CSS styles `:focus` or `:focus-visible`.
    pub css_focus_styles: bool,
}

impl ScriptFacts {
    #[must_use]
    pub fn scan(script: &str, css: &str) -> Self {
        let mut fetch_hooks: Vec<String> = FETCH_HOOK_RE
            .captures_iter(script)
            .map(|c| c[1].to_string())
            .collect();
        if EFFECT_RE.is_match(script) && RAW_FETCH_RE.is_match(script) {
            fetch_hooks.push("useEffect+fetch".to_string());
        }
        fetch_hooks.sort();
        fetch_hooks.dedup();

        let mut imports: Vec<String> = IMPORT_RE
            .captures_iter(script)
            .map(|c| c[1].to_string())
            .collect();
        imports.dedup();

        Self {
            fetch_hooks,
            handles_loading: LOADING_BRANCH_RE.is_match(script),
            handles_error: ERROR_BRANCH_RE.is_match(script),
            handles_empty: EMPTY_BRANCH_RE.is_match(script),
            memoized: MEMO_RE.is_match(script),
            exported_components: EXPORT_RE
                .captures_iter(script)
                .map(|c| c[1].to_string())
                .collect(),
            imports,
            dynamic_imports: DYNAMIC_IMPORT_RE.is_match(script),
            mentions_validation: VALIDATION_RE.is_match(script),
            max_width_queries: MEDIA_MAX_WIDTH_RE.find_iter(css).count(),
            css_px_font_sizes: CSS_PX_FONT_RE.find_iter(css).count(),
            css_focus_styles: FOCUS_SELECTOR_RE.is_match(css),
        }
    }

    #[must_use]
    pub fn fetches_data(&self) -> bool {
        !self.fetch_hooks.is_empty()
    }

    /// Names of the async states the component never branches on.
    #[must_use]
    pub fn missing_states(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.handles_loading {
            out.push("loading");
        }
        if !self.handles_error {
            out.push("error");
        }
        if !self.handles_empty {
            out.push("empty");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_query_hook_and_branches() {
        let script = r"
            const { data, isLoading, error } = useQuery(['todos'], fetchTodos);
            if (isLoading) return ;
            if (error) return ;
            return data.length === 0 ?  : ;
        ";
        let facts = ScriptFacts::scan(script, "");
        assert_eq!(facts.fetch_hooks, vec!["useQuery"]);
        assert!(facts.handles_loading);
        assert!(facts.handles_error);
        assert!(facts.handles_empty);
        assert!(facts.missing_states().is_empty());
    }

    #[test]
    fn effect_with_fetch_counts_as_data_fetch() {
        let script = "useEffect(() => { fetch('/api/items').then(r => r.json()).then(setItems); }, []);";
        let facts = ScriptFacts::scan(script, "");
        assert!(facts.fetches_data());
        assert_eq!(facts.missing_states(), vec!["loading", "error", "empty"]);
    }

    #[test]
    fn effect_alone_is_not_data_fetch() {
        let facts = ScriptFacts::scan("useEffect(() => { document.title = 'x'; }, []);", "");
        assert!(!facts.fetches_data());
    }

    #[test]
    fn collects_exports_imports_and_memo() {
        let script = r"
            import React, { memo } from 'react';
            import moment from 'moment';
            export const UserList = memo(function UserList() {});
        ";
        let facts = ScriptFacts::scan(script, "");
        assert_eq!(facts.imports, vec!["react", "moment"]);
        assert_eq!(facts.exported_components, vec!["UserList"]);
        assert!(facts.memoized);
        assert!(!facts.dynamic_imports);
    }

    #[test]
    fn scans_embedded_css() {
        let css = r"
            .title { font-size: 14px; }
            @media (max-width: 600px) { .title { font-size: 12px; } }
            button:focus-visible { outline: 2px solid; }
        ";
        let facts = ScriptFacts::scan("", css);
        assert_eq!(facts.max_width_queries, 1);
        assert_eq!(facts.css_px_font_sizes, 2);
        assert!(facts.css_focus_styles);
    }
}
