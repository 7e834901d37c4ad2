use crate::config::StashConfig;
use crate::model::Snippet;

pub mod config;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A snippet paired with its 1-based position in the newest-first
/// collection. Positions come from the full collection, so they stay
/// stable when a query filters the listing down.
#[derive(Debug, Clone)]
pub struct ListedSnippet {
    pub position: usize,
    pub snippet: Snippet,
}

#[derive(Debug, Clone)]
pub struct SnippetPage {
    pub items: Vec<ListedSnippet>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_snippets: Vec<Snippet>,
    pub page: Option<SnippetPage>,
    pub config: Option<StashConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.affected_snippets = snippets;
        self
    }

    pub fn with_page(mut self, page: SnippetPage) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_config(mut self, config: StashConfig) -> Self {
        self.config = Some(config);
        self
    }
}
