use super::VaultBackend;
use crate::error::{Result, StashError};
use crate::model::Snippet;
use std::cell::RefCell;

/// In-memory vault for testing.
///
/// Uses `RefCell` for interior mutability; nothing here is shared across
/// threads, which keeps the `VaultBackend` trait at `&self` without lock
/// overhead.
#[derive(Default)]
pub struct InMemoryVault {
    snippets: RefCell<Vec<Snippet>>,
    write_error: RefCell<Option<String>>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with the given message. `None` restores
    /// normal behavior.
    pub fn set_write_error(&self, message: Option<&str>) {
        *self.write_error.borrow_mut() = message.map(str::to_string);
    }
}

impl VaultBackend for InMemoryVault {
    fn load_collection(&self) -> Result<Vec<Snippet>> {
        Ok(self.snippets.borrow().clone())
    }

    fn save_collection(&self, snippets: &[Snippet]) -> Result<()> {
        if let Some(message) = self.write_error.borrow().as_ref() {
            return Err(StashError::Store(message.clone()));
        }
        *self.snippets.borrow_mut() = snippets.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let vault = InMemoryVault::new();
        assert!(vault.load_collection().unwrap().is_empty());
    }

    #[test]
    fn test_write_error_injection() {
        let vault = InMemoryVault::new();
        vault.set_write_error(Some("injected"));

        let err = vault.save_collection(&[]).unwrap_err();
        assert!(err.to_string().contains("injected"));

        vault.set_write_error(None);
        assert!(vault.save_collection(&[]).is_ok());
    }
}
