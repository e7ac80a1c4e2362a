//! # Remote Service Boundary
//!
//! The post-storage backend is opaque to the client: four operations, no
//! update or delete. The [`RemoteService`] trait is the only wire boundary.
//!
//! ## Implementations
//!
//! - [`http::HttpService`]: production client over a JSON HTTP API
//! - [`memory::InMemoryService`]: in-process backend for tests, with call
//!   counting and failure injection
//!
//! Search semantics (substring vs. tag match, case sensitivity) belong to
//! the service; the client renders whatever comes back.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::Post;

pub mod http;
pub mod memory;

/// The four operations exposed by the remote post-storage service.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Create a post; returns the service-assigned id.
    async fn create_post(&self, title: &str, content: &str, tags: &[String]) -> Result<u64>;

    /// Fetch a post by id; `None` when no post has that id.
    async fn get_post(&self, id: u64) -> Result<Option<Post>>;

    /// Fetch all posts.
    async fn get_posts(&self) -> Result<Vec<Post>>;

    /// Fetch posts matching `query`.
    async fn search_posts(&self, query: &str) -> Result<Vec<Post>>;
}
