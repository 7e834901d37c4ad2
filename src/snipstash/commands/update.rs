use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StashError};
use crate::model::SnippetPatch;
use crate::store::{SnippetStore, VaultBackend};

use super::helpers::{preview, resolve_selectors, SnippetSelector};

/// Apply an annotation patch (tags, notes, favorite, color, folder) to
/// one or more snippets. Every selector must resolve before anything is
/// written.
pub fn run<B: VaultBackend>(
    store: &SnippetStore<B>,
    selectors: &[SnippetSelector],
    patch: &SnippetPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        return Err(StashError::Api("Nothing to update".to_string()));
    }

    let snippets = store.get_all()?;
    let resolved = resolve_selectors(&snippets, selectors)?;

    let mut result = CmdResult::default();
    for snippet in resolved {
        store.update(snippet.id, patch.clone())?;

        let mut updated = snippet;
        patch.clone().apply(&mut updated);
        result.add_message(CmdMessage::success(format!(
            "Updated: {}",
            preview(&updated.text)
        )));
        result.affected_snippets.push(updated);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snippet;
    use crate::store::memory::InMemoryVault;

    fn store_with(texts: &[&str]) -> SnippetStore<InMemoryVault> {
        let store = SnippetStore::with_backend(InMemoryVault::new());
        for text in texts.iter().rev() {
            store
                .save(&Snippet::new(
                    text.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_marks_favorite() {
        let store = store_with(&["a"]);
        let patch = SnippetPatch {
            is_favorite: Some(true),
            ..Default::default()
        };
        let result = run(&store, &[SnippetSelector::Position(1)], &patch).unwrap();

        assert!(result.affected_snippets[0].is_favorite);
        assert!(store.get_all().unwrap()[0].is_favorite);
    }

    #[test]
    fn test_updates_several_at_once() {
        let store = store_with(&["a", "b", "c"]);
        let patch = SnippetPatch {
            tags: Some(vec!["shared".to_string()]),
            ..Default::default()
        };
        let selectors = [SnippetSelector::Position(1), SnippetSelector::Position(3)];
        run(&store, &selectors, &patch).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all[0].tags, vec!["shared"]);
        assert!(all[1].tags.is_empty());
        assert_eq!(all[2].tags, vec!["shared"]);
    }

    #[test]
    fn test_clears_color_with_nested_none() {
        let store = store_with(&["a"]);
        run(
            &store,
            &[SnippetSelector::Position(1)],
            &SnippetPatch {
                color: Some(Some("teal".to_string())),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(store.get_all().unwrap()[0].color.as_deref(), Some("teal"));

        run(
            &store,
            &[SnippetSelector::Position(1)],
            &SnippetPatch {
                color: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(store.get_all().unwrap()[0].color.is_none());
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let store = store_with(&["a"]);
        let err = run(
            &store,
            &[SnippetSelector::Position(1)],
            &SnippetPatch::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[test]
    fn test_bad_selector_aborts_before_any_write() {
        let store = store_with(&["a", "b"]);
        let patch = SnippetPatch {
            is_favorite: Some(true),
            ..Default::default()
        };
        let selectors = [SnippetSelector::Position(1), SnippetSelector::Position(9)];
        assert!(run(&store, &selectors, &patch).is_err());

        let all = store.get_all().unwrap();
        assert!(!all[0].is_favorite);
        assert!(!all[1].is_favorite);
    }
}
