//! # Storage Layer
//!
//! The whole snippet collection lives under a single key. [`VaultBackend`]
//! abstracts the raw whole-collection read/write so [`SnippetStore`] can
//! carry the rules (capacity limit, ordering, quota translation) without
//! knowing where the bytes go.
//!
//! ## Implementations
//!
//! - [`fs::FileVault`]: production storage, `snippets.json` in the vault
//!   directory, atomic replace via tmp file + rename
//! - [`memory::InMemoryVault`]: in-memory storage for testing, with
//!   write-error injection
//!
//! Every operation is a read-modify-write of the full collection. There is
//! no in-process caching and no partial-write recovery; a crash between
//! read and write loses that one update.

use crate::error::{Result, StashError};
use crate::model::{Snippet, SnippetPatch};
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Hard cap on the number of stored snippets.
pub const MAX_SNIPPETS: usize = 10_000;

/// Marker backends embed in quota failures. `save` recognizes it in the
/// rendered message, whichever error variant carried it.
pub const QUOTA_MARKER: &str = "QUOTA_BYTES";

/// Abstract interface for raw collection I/O.
///
/// The backend handles the "how" of storage (filesystem vs memory), while
/// `SnippetStore` handles the "what".
pub trait VaultBackend {
    /// Load the full collection. Missing storage loads as empty.
    fn load_collection(&self) -> Result<Vec<Snippet>>;

    /// Replace the full collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_collection(&self, snippets: &[Snippet]) -> Result<()>;
}

pub struct SnippetStore<B: VaultBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: VaultBackend> SnippetStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The full collection, most recent first. Empty if nothing stored yet.
    pub fn get_all(&self) -> Result<Vec<Snippet>> {
        self.backend.load_collection()
    }

    /// Prepend a new snippet to the collection.
    ///
    /// Fails with [`StashError::LimitExceeded`] when the collection is at
    /// capacity; the write is not attempted in that case. A write failure
    /// carrying the quota marker surfaces as [`StashError::QuotaExceeded`];
    /// any other failure propagates with its original message.
    pub fn save(&self, snippet: &Snippet) -> Result<()> {
        let snippets = self.backend.load_collection()?;
        if snippets.len() >= MAX_SNIPPETS {
            return Err(StashError::LimitExceeded(MAX_SNIPPETS));
        }

        let mut next = Vec::with_capacity(snippets.len() + 1);
        next.push(snippet.clone());
        next.extend(snippets);

        self.backend
            .save_collection(&next)
            .map_err(translate_quota)
    }

    /// Remove the snippet with the given id (at most one; ids are unique).
    /// Removing an absent id is a silent no-op: the unchanged collection is
    /// rewritten.
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut snippets = self.backend.load_collection()?;
        snippets.retain(|s| s.id != id);
        self.backend.save_collection(&snippets)
    }

    /// Apply a patch to the snippet with the given id; every other record
    /// is untouched. Patching an absent id is a silent no-op.
    pub fn update(&self, id: Uuid, patch: SnippetPatch) -> Result<()> {
        let mut snippets = self.backend.load_collection()?;
        if let Some(snippet) = snippets.iter_mut().find(|s| s.id == id) {
            patch.apply(snippet);
        }
        self.backend.save_collection(&snippets)
    }
}

fn translate_quota(err: StashError) -> StashError {
    if err.to_string().contains(QUOTA_MARKER) {
        StashError::QuotaExceeded
    } else {
        err
    }
}
