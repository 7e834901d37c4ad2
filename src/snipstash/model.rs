use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A captured passage plus its metadata. Persisted as camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub page_title: String,
    /// Surrounding text with a [[SNIPPET]] marker at the selection's
    /// position. Empty when the selection could not be located.
    #[serde(default)]
    pub context: String,
    pub timestamp: DateTime<Utc>,
    // Redundant with timestamp; kept for fast date grouping
    pub created_date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub folder_id: Option<String>,
    /// The pre-edit text, set once on first edit and never reassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl Snippet {
    pub fn new(text: String, url: String, page_title: String, context: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            url,
            page_title,
            context,
            timestamp: now,
            created_date: now.date_naive(),
            tags: Vec::new(),
            notes: String::new(),
            color: None,
            is_favorite: false,
            folder_id: None,
            original_text: None,
        }
    }

    /// Case-insensitive substring match across text, title, url and tags.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.text.to_lowercase().contains(&q)
            || self.page_title.to_lowercase().contains(&q)
            || self.url.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }
}

/// A partial update for one snippet. `None` leaves the field untouched.
/// `color` and `folder_id` carry a second `Option` so they can be cleared.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub is_favorite: Option<bool>,
    pub color: Option<Option<String>>,
    pub folder_id: Option<Option<String>>,
    pub original_text: Option<String>,
}

impl SnippetPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.is_favorite.is_none()
            && self.color.is_none()
            && self.folder_id.is_none()
            && self.original_text.is_none()
    }

    /// Shallow overwrite of the named fields only.
    pub fn apply(self, snippet: &mut Snippet) {
        if let Some(text) = self.text {
            snippet.text = text;
        }
        if let Some(tags) = self.tags {
            snippet.tags = tags;
        }
        if let Some(notes) = self.notes {
            snippet.notes = notes;
        }
        if let Some(flag) = self.is_favorite {
            snippet.is_favorite = flag;
        }
        if let Some(color) = self.color {
            snippet.color = color;
        }
        if let Some(folder_id) = self.folder_id {
            snippet.folder_id = folder_id;
        }
        if let Some(original) = self.original_text {
            snippet.original_text = Some(original);
        }
    }
}
