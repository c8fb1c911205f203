//! Domain service for the post resource.
//!
//! Full-row CRUD only: no partial updates, no soft delete.

use crate::models::post::{Post, PostInput};
use thiserror::Error;

/// Errors specific to post operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("post with id {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for posts.
#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    /// Lists every stored post.
    async fn list(&self) -> Result<Vec<Post>, PostError>;

    /// Inserts a post and returns it with its assigned id.
    async fn create(&self, input: PostInput) -> Result<Post, PostError>;

    async fn get(&self, id: i32) -> Result<Post, PostError>;

    /// Replaces title, content and published flag of an existing post.
    async fn update(&self, id: i32, input: PostInput) -> Result<Post, PostError>;

    async fn delete(&self, id: i32) -> Result<(), PostError>;
}
