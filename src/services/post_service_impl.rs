//! `SeaORM` implementation of the `PostService` trait.

use crate::db::Store;
use crate::models::post::{Post, PostInput};
use crate::services::post_service::{PostError, PostService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmPostService {
    store: Store,
}

impl SeaOrmPostService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostService for SeaOrmPostService {
    async fn list(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.store.list_posts().await?)
    }

    async fn create(&self, input: PostInput) -> Result<Post, PostError> {
        let post = self.store.create_post(&input).await?;
        info!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn get(&self, id: i32) -> Result<Post, PostError> {
        self.store
            .get_post(id)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn update(&self, id: i32, input: PostInput) -> Result<Post, PostError> {
        let post = self
            .store
            .update_post(id, &input)
            .await?
            .ok_or(PostError::NotFound(id))?;
        info!(post_id = id, "Post updated");
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), PostError> {
        if self.store.delete_post(id).await? {
            info!(post_id = id, "Post deleted");
            Ok(())
        } else {
            Err(PostError::NotFound(id))
        }
    }
}
