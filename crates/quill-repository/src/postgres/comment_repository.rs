//! PostgreSQL comment repository implementation.

use crate::{traits::CommentRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{CommentId, PostId, QuillError, QuillResult, UserId};
use quill_domain::{Comment, CommentChanges};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL comment repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CommentRepository)]
pub struct PgCommentRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCommentRepository {
    /// Creates a new PostgreSQL comment repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    owner_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::from_uuid(row.id),
            post_id: PostId::from_uuid(row.post_id),
            owner_id: UserId::from_uuid(row.owner_id),
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> QuillResult<Option<Comment>> {
        debug!("Finding comment by id: {}", id);

        let row = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT id, post_id, owner_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn find_by_post(&self, post_id: PostId) -> QuillResult<Vec<Comment>> {
        debug!("Finding comments for post: {}", post_id);

        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT id, post_id, owner_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn save(&self, comment: &Comment) -> QuillResult<Comment> {
        debug!("Saving comment {} on post {}", comment.id, comment.post_id);

        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.owner_id.into_inner())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(self.pool.inner())
        .await
        .map_err(|e| match QuillError::from(e) {
            // the post was deleted between the existence check and the insert
            QuillError::NotFound { .. } => QuillError::not_found("Post", comment.post_id),
            other => other,
        })?;

        Ok(comment.clone())
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
    ) -> QuillResult<Option<Comment>> {
        debug!("Updating comment: {}", id);

        let row = sqlx::query_as::<_, CommentRow>(
            r"
            UPDATE comments
            SET content    = COALESCE($2, content),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, owner_id, content, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(changes.content.as_deref())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: CommentId) -> QuillResult<bool> {
        debug!("Deleting comment: {}", id);

        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
