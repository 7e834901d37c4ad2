use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{SnippetStore, VaultBackend};

use super::helpers::{resolve_selector, SnippetSelector};

pub fn run<B: VaultBackend>(
    store: &SnippetStore<B>,
    selector: &SnippetSelector,
) -> Result<CmdResult> {
    let snippets = store.get_all()?;
    let snippet = resolve_selector(&snippets, selector)?;
    Ok(CmdResult::default().with_affected_snippets(vec![snippet]))
}
