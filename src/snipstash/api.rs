//! # API Facade
//!
//! A **thin facade** over the command layer. It is the single entry point
//! for vault management operations, regardless of the UI driving them.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing selector strings)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It explicitly avoids business logic (that belongs in `commands/*.rs`),
//! I/O to stdout/stderr, and presentation concerns.
//!
//! ## Generic Over VaultBackend
//!
//! `StashApi<B: VaultBackend>` is generic over the storage backend:
//! - Production: `StashApi<FileVault>`
//! - Testing: `StashApi<InMemoryVault>`
//!
//! The capture path does not come through here: the store worker on the
//! bus owns its own store (see `bus`).

use crate::commands;
use crate::commands::helpers::SnippetSelector;
use crate::error::Result;
use crate::model::SnippetPatch;
use crate::store::{SnippetStore, VaultBackend};
use std::path::{Path, PathBuf};

pub struct StashApi<B: VaultBackend> {
    store: SnippetStore<B>,
    vault_dir: PathBuf,
}

impl<B: VaultBackend> StashApi<B> {
    pub fn new(store: SnippetStore<B>, vault_dir: PathBuf) -> Self {
        Self { store, vault_dir }
    }

    pub fn list(&self, query: &str, page: usize) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query, page)
    }

    pub fn view(&self, selector: &str) -> Result<commands::CmdResult> {
        let selector: SnippetSelector = selector.parse()?;
        commands::view::run(&self.store, &selector)
    }

    pub fn edit(&self, selector: &str, new_text: &str) -> Result<commands::CmdResult> {
        let selector: SnippetSelector = selector.parse()?;
        commands::edit::run(&self.store, &selector, new_text)
    }

    pub fn annotate<I: AsRef<str>>(
        &self,
        selectors: &[I],
        patch: &SnippetPatch,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::update::run(&self.store, &selectors, patch)
    }

    pub fn delete<I: AsRef<str>>(
        &self,
        selectors: &[I],
        skip_confirm: bool,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&self.store, &selectors, skip_confirm)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.vault_dir, action)
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<SnippetSelector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ListedSnippet, MessageLevel, SnippetPage};
