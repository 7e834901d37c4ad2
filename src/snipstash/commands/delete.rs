use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StashError};
use crate::store::{SnippetStore, VaultBackend};
use std::io::{self, Write};

use super::helpers::{preview, resolve_selectors, SnippetSelector};

/// Permanently remove snippets. Deletion is not recoverable, so the user
/// confirms first unless `skip_confirm` says otherwise.
pub fn run<B: VaultBackend>(
    store: &SnippetStore<B>,
    selectors: &[SnippetSelector],
    skip_confirm: bool,
) -> Result<CmdResult> {
    // 1. Resolve every target up front; a bad selector aborts the whole run
    let snippets = store.get_all()?;
    let targets = resolve_selectors(&snippets, selectors)?;

    if targets.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Nothing to delete."));
        return Ok(res);
    }

    // 2. Confirm
    if !skip_confirm {
        println!("This will permanently remove the following snippets:");
        for snippet in &targets {
            println!("  {}", preview(&snippet.text));
        }
        print!("[Y] To delete: ");
        io::stdout().flush().map_err(StashError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(StashError::Io)?;

        if input.trim() != "Y" {
            let mut res = CmdResult::default();
            res.add_message(CmdMessage::info("Operation cancelled."));
            return Ok(res);
        }
    }

    // 3. Delete
    let mut result = CmdResult::default();
    for snippet in targets {
        store.remove(snippet.id)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted: {}",
            preview(&snippet.text)
        )));
        result.affected_snippets.push(snippet);
    }

    Ok(result)
}
