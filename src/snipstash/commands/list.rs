use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{SnippetStore, VaultBackend};

use super::helpers::{listed_snippets, paginate};

pub fn run<B: VaultBackend>(
    store: &SnippetStore<B>,
    query: &str,
    page: usize,
) -> Result<CmdResult> {
    let snippets = store.get_all()?;
    let listed = listed_snippets(&snippets, query);
    let matched = listed.len();

    let mut result = CmdResult::default().with_page(paginate(listed, page));
    if snippets.is_empty() {
        result.add_message(CmdMessage::info(
            "No snippets yet. Capture one with: snip capture \"some text\"",
        ));
    } else if matched == 0 {
        result.add_message(CmdMessage::info(format!(
            "No snippets match '{}'.",
            query
        )));
    }
    Ok(result)
}
