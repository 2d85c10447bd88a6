//! PostgreSQL post repository implementation.

use crate::{traits::PostRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{PostId, QuillResult, UserId};
use quill_domain::{Post, PostChanges};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL post repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PostRepository)]
pub struct PgPostRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgPostRepository {
    /// Creates a new PostgreSQL post repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>> {
        debug!("Finding post by id: {}", id);

        let row = sqlx::query_as::<_, PostRow>(
            r"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn find_all(&self) -> QuillResult<Vec<Post>> {
        debug!("Finding all posts");

        let rows = sqlx::query_as::<_, PostRow>(
            r"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id
            ",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn save(&self, post: &Post) -> QuillResult<Post> {
        debug!("Saving post: {}", post.id);

        sqlx::query(
            r"
            INSERT INTO posts (id, owner_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.owner_id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(post.clone())
    }

    async fn update(&self, id: PostId, changes: &PostChanges) -> QuillResult<Option<Post>> {
        debug!("Updating post: {}", id);

        let row = sqlx::query_as::<_, PostRow>(
            r"
            UPDATE posts
            SET title      = COALESCE($2, title),
                content    = COALESCE($3, content),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, title, content, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: PostId) -> QuillResult<bool> {
        debug!("Deleting post: {}", id);

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
