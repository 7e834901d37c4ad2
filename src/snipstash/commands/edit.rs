use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StashError};
use crate::model::SnippetPatch;
use crate::store::{SnippetStore, VaultBackend};

use super::helpers::{preview, resolve_selector, SnippetSelector};

/// Replace a snippet's text. The first edit that actually changes the
/// text stashes the pre-edit version in `original_text`; later edits
/// leave that record alone.
pub fn run<B: VaultBackend>(
    store: &SnippetStore<B>,
    selector: &SnippetSelector,
    new_text: &str,
) -> Result<CmdResult> {
    let snippets = store.get_all()?;
    let snippet = resolve_selector(&snippets, selector)?;

    let new_text = new_text.trim();
    if new_text.is_empty() {
        return Err(StashError::Api("Snippet text cannot be empty".to_string()));
    }
    if new_text == snippet.text {
        let mut result = CmdResult::default().with_affected_snippets(vec![snippet]);
        result.add_message(CmdMessage::info("Nothing changed."));
        return Ok(result);
    }

    let mut patch = SnippetPatch {
        text: Some(new_text.to_string()),
        ..Default::default()
    };
    if snippet.original_text.is_none() {
        patch.original_text = Some(snippet.text.clone());
    }
    store.update(snippet.id, patch.clone())?;

    let mut updated = snippet;
    patch.apply(&mut updated);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Snippet updated: {}",
        preview(&updated.text)
    )));
    Ok(result.with_affected_snippets(vec![updated]))
}
