use crate::commands::{ListedSnippet, SnippetPage};
use crate::error::{Result, StashError};
use crate::model::Snippet;
use std::str::FromStr;
use uuid::Uuid;

/// Snippets shown per page of a listing.
pub const PAGE_SIZE: usize = 20;

const PREVIEW_CHARS: usize = 60;

/// How a snippet is named on the command line: either a 1-based position
/// from the most recent listing, or an id (full or unambiguous prefix).
#[derive(Debug, Clone, PartialEq)]
pub enum SnippetSelector {
    Position(usize),
    Id(String),
}

impl FromStr for SnippetSelector {
    type Err = StashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<usize>() {
            Ok(0) => Err(StashError::Api("Positions start at 1".to_string())),
            Ok(n) => Ok(SnippetSelector::Position(n)),
            Err(_) => Ok(SnippetSelector::Id(s.to_string())),
        }
    }
}

impl std::fmt::Display for SnippetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnippetSelector::Position(n) => write!(f, "{}", n),
            SnippetSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Pair every snippet with its position, then keep the ones matching
/// `query`. Positions are assigned before filtering so they line up with
/// the unfiltered listing.
pub fn listed_snippets(snippets: &[Snippet], query: &str) -> Vec<ListedSnippet> {
    snippets
        .iter()
        .enumerate()
        .filter(|(_, s)| s.matches(query))
        .map(|(i, s)| ListedSnippet {
            position: i + 1,
            snippet: s.clone(),
        })
        .collect()
}

pub fn resolve_selector(snippets: &[Snippet], selector: &SnippetSelector) -> Result<Snippet> {
    match selector {
        SnippetSelector::Position(n) => snippets
            .get(n - 1)
            .cloned()
            .ok_or_else(|| StashError::Api(format!("No snippet at position {}", n))),
        SnippetSelector::Id(raw) => {
            if let Ok(id) = Uuid::parse_str(raw) {
                return snippets
                    .iter()
                    .find(|s| s.id == id)
                    .cloned()
                    .ok_or(StashError::SnippetNotFound(id));
            }
            let needle = raw.to_lowercase();
            let mut matches = snippets
                .iter()
                .filter(|s| s.id.to_string().starts_with(&needle));
            match (matches.next(), matches.next()) {
                (Some(found), None) => Ok(found.clone()),
                (Some(_), Some(_)) => Err(StashError::Api(format!(
                    "Id '{}' is ambiguous, give more characters",
                    raw
                ))),
                (None, _) => Err(StashError::Api(format!("No snippet matches id '{}'", raw))),
            }
        }
    }
}

pub fn resolve_selectors(
    snippets: &[Snippet],
    selectors: &[SnippetSelector],
) -> Result<Vec<Snippet>> {
    selectors
        .iter()
        .map(|sel| resolve_selector(snippets, sel))
        .collect()
}

/// Slice `items` down to the requested page. Out-of-range page numbers
/// are clamped rather than rejected.
pub fn paginate(items: Vec<ListedSnippet>, page: usize) -> SnippetPage {
    let total = items.len();
    let total_pages = std::cmp::max(1, total.div_ceil(PAGE_SIZE));
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    SnippetPage {
        items,
        page,
        total_pages,
        total,
    }
}

/// One-line teaser of a snippet's text for confirmations and listings.
pub fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    let mut chars = flat.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str) -> Snippet {
        Snippet::new(text.to_string(), String::new(), String::new(), String::new())
    }

    #[test]
    fn test_selector_parses_positions_and_ids() {
        assert_eq!(
            "3".parse::<SnippetSelector>().unwrap(),
            SnippetSelector::Position(3)
        );
        assert_eq!(
            "8f14e4".parse::<SnippetSelector>().unwrap(),
            SnippetSelector::Id("8f14e4".to_string())
        );
    }

    #[test]
    fn test_selector_rejects_position_zero() {
        let err = "0".parse::<SnippetSelector>().unwrap_err();
        assert!(err.to_string().contains("start at 1"));
    }

    #[test]
    fn test_positions_survive_filtering() {
        let snippets = vec![snippet("alpha"), snippet("beta"), snippet("alphabet")];
        let listed = listed_snippets(&snippets, "alpha");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].position, 1);
        assert_eq!(listed[1].position, 3);
    }

    #[test]
    fn test_empty_query_lists_everything() {
        let snippets = vec![snippet("one"), snippet("two")];
        let listed = listed_snippets(&snippets, "");
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_resolve_by_position() {
        let snippets = vec![snippet("first"), snippet("second")];
        let found = resolve_selector(&snippets, &SnippetSelector::Position(2)).unwrap();
        assert_eq!(found.text, "second");
    }

    #[test]
    fn test_resolve_position_out_of_range() {
        let snippets = vec![snippet("only")];
        let err = resolve_selector(&snippets, &SnippetSelector::Position(5)).unwrap_err();
        assert!(err.to_string().contains("position 5"));
    }

    #[test]
    fn test_resolve_by_full_id() {
        let snippets = vec![snippet("target")];
        let id = snippets[0].id.to_string();
        let found = resolve_selector(&snippets, &SnippetSelector::Id(id)).unwrap();
        assert_eq!(found.text, "target");
    }

    #[test]
    fn test_resolve_unknown_full_id() {
        let snippets = vec![snippet("present")];
        let missing = Uuid::new_v4();
        let err =
            resolve_selector(&snippets, &SnippetSelector::Id(missing.to_string())).unwrap_err();
        assert!(matches!(err, StashError::SnippetNotFound(id) if id == missing));
    }

    fn snippet_with_id(text: &str, id: &str) -> Snippet {
        let mut s = snippet(text);
        s.id = Uuid::parse_str(id).unwrap();
        s
    }

    #[test]
    fn test_resolve_by_unique_prefix() {
        let snippets = vec![
            snippet_with_id("a", "aaaaaaaa-0000-4000-8000-000000000001"),
            snippet_with_id("b", "bbbbbbbb-0000-4000-8000-000000000002"),
        ];
        let found =
            resolve_selector(&snippets, &SnippetSelector::Id("bbbb".to_string())).unwrap();
        assert_eq!(found.text, "b");
    }

    #[test]
    fn test_resolve_prefix_miss() {
        let snippets = vec![snippet("a")];
        let err =
            resolve_selector(&snippets, &SnippetSelector::Id("zzzz".to_string())).unwrap_err();
        assert!(err.to_string().contains("No snippet matches"));
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let snippets = vec![
            snippet_with_id("a", "aaaaaaaa-0000-4000-8000-000000000001"),
            snippet_with_id("b", "aaaaaaaa-0000-4000-8000-000000000002"),
        ];
        let err =
            resolve_selector(&snippets, &SnippetSelector::Id("aaaa".to_string())).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_resolve_selectors_fails_on_any_miss() {
        let snippets = vec![snippet("a")];
        let selectors = vec![SnippetSelector::Position(1), SnippetSelector::Position(9)];
        assert!(resolve_selectors(&snippets, &selectors).is_err());
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::new(), 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_paginate_splits_and_clamps() {
        let snippets: Vec<Snippet> = (0..45).map(|i| snippet(&format!("s{}", i))).collect();
        let listed = listed_snippets(&snippets, "");

        let first = paginate(listed.clone(), 1);
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 45);
        assert_eq!(first.items[0].position, 1);

        let last = paginate(listed.clone(), 3);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].position, 41);

        let high = paginate(listed.clone(), 99);
        assert_eq!(high.page, 3);
        assert_eq!(high.items.len(), 5);

        let low = paginate(listed, 0);
        assert_eq!(low.page, 1);
        assert_eq!(low.items[0].position, 1);
    }

    #[test]
    fn test_preview_truncates_and_flattens() {
        let long = "x".repeat(80);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), 61);
        assert!(cut.ends_with('…'));

        assert_eq!(preview("two\nlines"), "two lines");
        assert_eq!(preview("short"), "short");
    }
}
