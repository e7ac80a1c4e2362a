use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostboxError {
    #[error("Post not found: {0}")]
    PostNotFound(u64),

    #[error("{0}")]
    Validation(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PostboxError>;
