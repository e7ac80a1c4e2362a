use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{PostboxError, Result};
use crate::model::Post;
use crate::service::RemoteService;

/// How many times each remote operation has been invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create_post: usize,
    pub get_post: usize,
    pub get_posts: usize,
    pub search_posts: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.create_post + self.get_post + self.get_posts + self.search_posts
    }
}

#[derive(Debug, Default)]
struct Inner {
    posts: Vec<Post>,
    next_id: u64,
    calls: CallCounts,
    fail_next: Option<String>,
}

/// In-process stand-in for the remote service, used by tests.
///
/// Assigns sequential ids and nanosecond timestamps like the real backend.
/// Search is a case-insensitive substring match over title, content, and
/// tags. Tests can inject a one-shot failure and inspect call counts.
#[derive(Debug, Default)]
pub struct InMemoryService {
    inner: Mutex<Inner>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next remote call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_next = Some(message.to_string());
    }

    pub fn call_counts(&self) -> CallCounts {
        self.lock().calls
    }

    /// Seed a post directly, bypassing the call counters.
    pub fn seed(&self, title: &str, content: &str, tags: &[&str]) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let post = Post::new(
            id,
            title.to_string(),
            content.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            now_nanos(),
        );
        inner.posts.push(post);
        id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("service lock poisoned")
    }
}

fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

fn take_injected_failure(inner: &mut Inner) -> Result<()> {
    match inner.fail_next.take() {
        Some(message) => Err(PostboxError::Remote(message)),
        None => Ok(()),
    }
}

#[async_trait]
impl RemoteService for InMemoryService {
    async fn create_post(&self, title: &str, content: &str, tags: &[String]) -> Result<u64> {
        let mut inner = self.lock();
        inner.calls.create_post += 1;
        take_injected_failure(&mut inner)?;

        let id = inner.next_id;
        inner.next_id += 1;
        let post = Post::new(
            id,
            title.to_string(),
            content.to_string(),
            tags.to_vec(),
            now_nanos(),
        );
        inner.posts.push(post);
        Ok(id)
    }

    async fn get_post(&self, id: u64) -> Result<Option<Post>> {
        let mut inner = self.lock();
        inner.calls.get_post += 1;
        take_injected_failure(&mut inner)?;

        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn get_posts(&self) -> Result<Vec<Post>> {
        let mut inner = self.lock();
        inner.calls.get_posts += 1;
        take_injected_failure(&mut inner)?;

        Ok(inner.posts.clone())
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        let mut inner = self.lock();
        inner.calls.search_posts += 1;
        take_injected_failure(&mut inner)?;

        let needle = query.to_lowercase();
        Ok(inner
            .posts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}
