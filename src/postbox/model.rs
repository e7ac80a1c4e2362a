use serde::{Deserialize, Serialize};

/// A post as stored by the remote service.
///
/// Posts are immutable once created; the client only ever holds transient
/// copies fetched from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Service-assigned identifier, unique and stable.
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Labels in insertion order; may be empty.
    pub tags: Vec<String>,
    /// Nanoseconds since the Unix epoch, assigned by the service at creation.
    pub timestamp: i64,
}

impl Post {
    pub fn new(id: u64, title: String, content: String, tags: Vec<String>, timestamp: i64) -> Self {
        Self {
            id,
            title,
            content,
            tags,
            timestamp,
        }
    }
}

/// Which kind of display currently occupies the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentView {
    #[default]
    List,
    Post,
}

/// The client's in-memory record of what is currently displayed.
///
/// A single instance lives inside the view controller. It is mutated only in
/// response to interpreted commands or form events and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub current_view: CurrentView,
    /// Set when `current_view` is [`CurrentView::Post`].
    pub current_post_id: Option<u64>,
    /// Whether the composition form is collecting input.
    pub form_open: bool,
}
