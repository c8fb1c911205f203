use crate::entities::{post, prelude::*};
use crate::models::post::{Post as PostRow, PostInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set,
};
use tracing::debug;

/// Repository for the `post` table
pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<PostRow>> {
        let rows = Post::find()
            .order_by_asc(post::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(PostRow::from).collect())
    }

    pub async fn create(&self, input: &PostInput) -> Result<PostRow> {
        let active_model = post::ActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            content: Set(input.content.clone()),
            published: Set(input.published),
        };

        let model = active_model.insert(&self.conn).await?;
        debug!("Created post {}", model.id);
        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> Result<Option<PostRow>> {
        let row = Post::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(PostRow::from))
    }

    /// Replaces every mutable column. Returns `None` when no row has this id.
    pub async fn update(&self, id: i32, input: &PostInput) -> Result<Option<PostRow>> {
        let active_model = post::ActiveModel {
            id: Set(id),
            title: Set(input.title.clone()),
            content: Set(input.content.clone()),
            published: Set(input.published),
        };

        match active_model.update(&self.conn).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Post::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
