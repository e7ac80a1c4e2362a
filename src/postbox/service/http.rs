use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::Post;
use crate::service::RemoteService;

/// Production client for a post-storage service speaking JSON over HTTP.
///
/// Endpoint layout:
/// - `POST {base}/posts` — create, body `{title, content, tags}`, returns `{id}`
/// - `GET  {base}/posts/{id}` — fetch one; 404 means "no such post"
/// - `GET  {base}/posts` — fetch all
/// - `GET  {base}/posts/search?q={query}` — search
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    title: &'a str,
    content: &'a str,
    tags: &'a [String],
}

#[derive(Deserialize)]
struct CreatePostResponse {
    id: u64,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RemoteService for HttpService {
    async fn create_post(&self, title: &str, content: &str, tags: &[String]) -> Result<u64> {
        debug!(title, "createPost");
        let response = self
            .client
            .post(self.url("/posts"))
            .json(&CreatePostRequest {
                title,
                content,
                tags,
            })
            .send()
            .await?
            .error_for_status()?;
        let created: CreatePostResponse = response.json().await?;
        Ok(created.id)
    }

    async fn get_post(&self, id: u64) -> Result<Option<Post>> {
        debug!(id, "getPost");
        let response = self
            .client
            .get(self.url(&format!("/posts/{}", id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let post: Post = response.error_for_status()?.json().await?;
        Ok(Some(post))
    }

    async fn get_posts(&self) -> Result<Vec<Post>> {
        debug!("getPosts");
        let response = self
            .client
            .get(self.url("/posts"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        debug!(query, "searchPosts");
        let response = self
            .client
            .get(self.url("/posts/search"))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let service = HttpService::new("http://localhost:8080/");
        assert_eq!(service.url("/posts"), "http://localhost:8080/posts");
    }
}
