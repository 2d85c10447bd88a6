//! Transport-neutral entry points for content mutations and reads.
//!
//! [`ContentGateway`] takes loosely typed calls (string ids, JSON fields),
//! routes them to the post and comment services and reports a flat status
//! instead of an error.

use crate::comment_service::CommentService;
use crate::dto::{CreateCommentRequest, CreatePostRequest, UpdateCommentRequest, UpdatePostRequest};
use crate::post_service::PostService;
use quill_core::{CommentId, PostId, QuillError, QuillResult, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Entity kinds reachable through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Post,
    Comment,
}

/// Mutation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

/// Inbound mutation call.
///
/// `scope_id` names the parent post of a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRequest {
    pub actor_id: Option<UserId>,
    pub kind: EntityKind,
    pub operation: Operation,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub scope_id: Option<String>,
    #[serde(default)]
    pub fields: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    Created,
    Updated,
    Deleted,
    NotFound,
    Forbidden,
    ValidationFailed,
    Unauthorized,
    Conflict,
    Unavailable,
    Internal,
}

/// Result of a mutation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub status: MutationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationOutcome {
    fn success(status: MutationStatus, entity: Option<Value>) -> Self {
        Self {
            status,
            entity,
            message: None,
        }
    }

    fn failure(error: &QuillError) -> Self {
        Self {
            status: Outcome::from(error).mutation,
            entity: None,
            message: Some(error.public_message()),
        }
    }
}

/// Inbound read call.
///
/// With a `target_id` one entity is read; without it the listing is read.
/// Comment reads need `scope_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub kind: EntityKind,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub scope_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Ok,
    NotFound,
    Unavailable,
    Internal,
}

/// Result of a read call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOutcome {
    pub status: ReadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Value>>,
}

struct Outcome {
    mutation: MutationStatus,
    read: ReadStatus,
}

impl From<&QuillError> for Outcome {
    fn from(error: &QuillError) -> Self {
        let (mutation, read) = match error {
            QuillError::NotFound { .. } => (MutationStatus::NotFound, ReadStatus::NotFound),
            QuillError::Forbidden(_) => (MutationStatus::Forbidden, ReadStatus::Internal),
            QuillError::Validation(_) => (MutationStatus::ValidationFailed, ReadStatus::Internal),
            QuillError::Conflict(_) => (MutationStatus::Conflict, ReadStatus::Internal),
            QuillError::Unauthorized(_)
            | QuillError::InvalidToken(_)
            | QuillError::TokenExpired
            | QuillError::InvalidCredentials => (MutationStatus::Unauthorized, ReadStatus::Internal),
            QuillError::DependencyUnavailable(_) => {
                (MutationStatus::Unavailable, ReadStatus::Unavailable)
            }
            _ => (MutationStatus::Internal, ReadStatus::Internal),
        };
        Self { mutation, read }
    }
}

/// Routes loosely typed content calls to the services.
#[derive(Clone)]
pub struct ContentGateway {
    posts: Arc<dyn PostService>,
    comments: Arc<dyn CommentService>,
}

impl ContentGateway {
    #[must_use]
    pub fn new(posts: Arc<dyn PostService>, comments: Arc<dyn CommentService>) -> Self {
        Self { posts, comments }
    }

    /// Runs a mutation. A call without an actor is `Unauthorized` before
    /// anything else is looked at.
    pub async fn mutate(&self, request: MutationRequest) -> MutationOutcome {
        if request.actor_id.is_none() {
            return MutationOutcome::failure(&QuillError::unauthorized("Authentication required"));
        }

        debug!(
            "Gateway mutation: {:?} {:?} target={:?}",
            request.operation, request.kind, request.target_id
        );

        let status = match request.operation {
            Operation::Create => MutationStatus::Created,
            Operation::Update => MutationStatus::Updated,
            Operation::Delete => MutationStatus::Deleted,
        };

        match self.dispatch_mutation(request).await {
            Ok(entity) => MutationOutcome::success(status, entity),
            Err(e) => {
                if Outcome::from(&e).mutation == MutationStatus::Internal {
                    error!("Gateway mutation failed: {}", e);
                }
                MutationOutcome::failure(&e)
            }
        }
    }

    /// Reads one entity or a listing.
    pub async fn read(&self, request: ReadRequest) -> ReadOutcome {
        match self.dispatch_read(request).await {
            Ok(Listing::One(entity)) => ReadOutcome {
                status: ReadStatus::Ok,
                entity: Some(entity),
                entities: None,
            },
            Ok(Listing::Many(entities)) => ReadOutcome {
                status: ReadStatus::Ok,
                entity: None,
                entities: Some(entities),
            },
            Err(e) => {
                let status = Outcome::from(&e).read;
                if status == ReadStatus::Internal {
                    error!("Gateway read failed: {}", e);
                }
                ReadOutcome {
                    status,
                    entity: None,
                    entities: None,
                }
            }
        }
    }

    async fn dispatch_mutation(&self, request: MutationRequest) -> QuillResult<Option<Value>> {
        let MutationRequest {
            actor_id: actor,
            kind,
            operation,
            target_id,
            scope_id,
            fields,
        } = request;

        match (kind, operation) {
            (EntityKind::Post, Operation::Create) => {
                let created = self.posts.create_post(actor, fields_as(fields)?).await?;
                to_value(&created).map(Some)
            }
            (EntityKind::Post, Operation::Update) => {
                let request: UpdatePostRequest = fields_as(fields)?;
                let id = parse_id::<PostId>("Post", target_id)?;
                let updated = self.posts.update_post(actor, id, request).await?;
                to_value(&updated).map(Some)
            }
            (EntityKind::Post, Operation::Delete) => {
                let id = parse_id::<PostId>("Post", target_id)?;
                self.posts.delete_post(actor, id).await.map(|()| None)
            }
            (EntityKind::Comment, Operation::Create) => {
                let request: CreateCommentRequest = fields_as(fields)?;
                let post_id = parse_id::<PostId>("Post", scope_id)?;
                let created = self.comments.create_comment(actor, post_id, request).await?;
                to_value(&created).map(Some)
            }
            (EntityKind::Comment, Operation::Update) => {
                let request: UpdateCommentRequest = fields_as(fields)?;
                let post_id = parse_id::<PostId>("Post", scope_id)?;
                let id = parse_id::<CommentId>("Comment", target_id)?;
                let updated = self.comments.update_comment(actor, post_id, id, request).await?;
                to_value(&updated).map(Some)
            }
            (EntityKind::Comment, Operation::Delete) => {
                let post_id = parse_id::<PostId>("Post", scope_id)?;
                let id = parse_id::<CommentId>("Comment", target_id)?;
                self.comments
                    .delete_comment(actor, post_id, id)
                    .await
                    .map(|()| None)
            }
        }
    }

    async fn dispatch_read(&self, request: ReadRequest) -> QuillResult<Listing> {
        match request.kind {
            EntityKind::Post => match request.target_id {
                Some(raw) => {
                    let id = parse_id::<PostId>("Post", Some(raw))?;
                    to_value(&self.posts.get_post(id).await?).map(Listing::One)
                }
                None => to_values(self.posts.list_posts().await?),
            },
            EntityKind::Comment => {
                let post_id = parse_id::<PostId>("Post", request.scope_id)?;
                match request.target_id {
                    Some(raw) => {
                        let id = parse_id::<CommentId>("Comment", Some(raw))?;
                        to_value(&self.comments.get_comment(post_id, id).await?).map(Listing::One)
                    }
                    None => to_values(self.comments.list_comments(post_id).await?),
                }
            }
        }
    }
}

impl std::fmt::Debug for ContentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGateway").finish_non_exhaustive()
    }
}

enum Listing {
    One(Value),
    Many(Vec<Value>),
}

/// Ids are opaque: an absent or unparseable id names nothing.
fn parse_id<T: std::str::FromStr>(resource_type: &'static str, raw: Option<String>) -> QuillResult<T> {
    let raw = raw.unwrap_or_default();
    raw.parse()
        .map_err(|_| QuillError::not_found(resource_type, raw.as_str()))
}

fn fields_as<T: DeserializeOwned>(fields: Value) -> QuillResult<T> {
    let fields = if fields.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        fields
    };
    serde_json::from_value(fields).map_err(|e| QuillError::validation(e.to_string()))
}

fn to_value<T: Serialize>(value: &T) -> QuillResult<Value> {
    serde_json::to_value(value).map_err(|e| QuillError::Internal(e.to_string()))
}

fn to_values<T: Serialize>(values: Vec<T>) -> QuillResult<Listing> {
    values
        .iter()
        .map(to_value)
        .collect::<QuillResult<Vec<_>>>()
        .map(Listing::Many)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#impl::{CommentServiceComponent, PostServiceComponent};
    use crate::test_support::{InMemoryStore, RecordingCache};
    use quill_config::LISTING_TTL_SECS;
    use serde_json::json;
    use std::time::Duration;

    struct Fixture {
        store: InMemoryStore,
        cache: Arc<RecordingCache>,
        gateway: ContentGateway,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let cache = Arc::new(RecordingCache::new());
        let ttl = Duration::from_secs(LISTING_TTL_SECS);
        let posts = PostServiceComponent::new(store.posts(), cache.clone(), ttl);
        let comments =
            CommentServiceComponent::new(store.posts(), store.comments(), cache.clone(), ttl);
        Fixture {
            store,
            cache,
            gateway: ContentGateway::new(Arc::new(posts), Arc::new(comments)),
        }
    }

    fn mutation(
        actor: Option<UserId>,
        kind: EntityKind,
        operation: Operation,
        target_id: Option<String>,
        scope_id: Option<String>,
        fields: Value,
    ) -> MutationRequest {
        MutationRequest {
            actor_id: actor,
            kind,
            operation,
            target_id,
            scope_id,
            fields,
        }
    }

    async fn create_post(f: &Fixture, actor: UserId) -> String {
        let outcome = f
            .gateway
            .mutate(mutation(
                Some(actor),
                EntityKind::Post,
                Operation::Create,
                None,
                None,
                json!({"title": "Gateway post", "content": "Body text"}),
            ))
            .await;
        assert_eq!(outcome.status, MutationStatus::Created);
        outcome.entity.unwrap()["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_missing_actor_short_circuits_before_store() {
        let f = fixture();
        f.store.set_unavailable(true);

        let outcome = f
            .gateway
            .mutate(mutation(
                None,
                EntityKind::Post,
                Operation::Delete,
                Some("whatever".to_string()),
                None,
                Value::Null,
            ))
            .await;

        assert_eq!(outcome.status, MutationStatus::Unauthorized);
        assert!(f.cache.ops().is_empty());
    }

    #[tokio::test]
    async fn test_post_lifecycle() {
        let f = fixture();
        let owner = UserId::new();
        let id = create_post(&f, owner).await;

        let updated = f
            .gateway
            .mutate(mutation(
                Some(owner),
                EntityKind::Post,
                Operation::Update,
                Some(id.clone()),
                None,
                json!({"title": "Renamed"}),
            ))
            .await;
        assert_eq!(updated.status, MutationStatus::Updated);
        assert_eq!(updated.entity.unwrap()["title"], "Renamed");

        let listing = f
            .gateway
            .read(ReadRequest {
                kind: EntityKind::Post,
                target_id: None,
                scope_id: None,
            })
            .await;
        assert_eq!(listing.status, ReadStatus::Ok);
        assert_eq!(listing.entities.unwrap()[0]["title"], "Renamed");

        let deleted = f
            .gateway
            .mutate(mutation(
                Some(owner),
                EntityKind::Post,
                Operation::Delete,
                Some(id.clone()),
                None,
                Value::Null,
            ))
            .await;
        assert_eq!(deleted.status, MutationStatus::Deleted);
        assert!(deleted.entity.is_none());

        let read = f
            .gateway
            .read(ReadRequest {
                kind: EntityKind::Post,
                target_id: Some(id),
                scope_id: None,
            })
            .await;
        assert_eq!(read.status, ReadStatus::NotFound);
    }

    #[tokio::test]
    async fn test_non_owner_comment_update_is_forbidden() {
        let f = fixture();
        let post_id = create_post(&f, UserId::new()).await;
        let author = UserId::new();

        let created = f
            .gateway
            .mutate(mutation(
                Some(author),
                EntityKind::Comment,
                Operation::Create,
                None,
                Some(post_id.clone()),
                json!({"content": "Original"}),
            ))
            .await;
        assert_eq!(created.status, MutationStatus::Created);
        let comment_id = created.entity.unwrap()["id"].as_str().unwrap().to_string();

        let outcome = f
            .gateway
            .mutate(mutation(
                Some(UserId::new()),
                EntityKind::Comment,
                Operation::Update,
                Some(comment_id.clone()),
                Some(post_id.clone()),
                json!({"content": "Hijacked"}),
            ))
            .await;
        assert_eq!(outcome.status, MutationStatus::Forbidden);

        let read = f
            .gateway
            .read(ReadRequest {
                kind: EntityKind::Comment,
                target_id: Some(comment_id),
                scope_id: Some(post_id),
            })
            .await;
        assert_eq!(read.entity.unwrap()["content"], "Original");
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_ids_are_not_found() {
        let f = fixture();
        let actor = Some(UserId::new());

        for target in [Some("not-a-uuid".to_string()), Some(PostId::new().to_string()), None] {
            let outcome = f
                .gateway
                .mutate(mutation(
                    actor,
                    EntityKind::Post,
                    Operation::Delete,
                    target,
                    None,
                    Value::Null,
                ))
                .await;
            assert_eq!(outcome.status, MutationStatus::NotFound);
        }
        assert!(f.cache.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_bad_fields_are_validation_failures() {
        let f = fixture();
        let actor = Some(UserId::new());

        let wrong_shape = f
            .gateway
            .mutate(mutation(
                actor,
                EntityKind::Post,
                Operation::Create,
                None,
                None,
                json!({"title": 42}),
            ))
            .await;
        assert_eq!(wrong_shape.status, MutationStatus::ValidationFailed);

        let id = create_post(&f, actor.unwrap()).await;
        let empty = f
            .gateway
            .mutate(mutation(
                actor,
                EntityKind::Post,
                Operation::Update,
                Some(id),
                None,
                json!({}),
            ))
            .await;
        assert_eq!(empty.status, MutationStatus::ValidationFailed);
        assert_eq!(empty.message.as_deref(), Some("Validation error: payload cannot be empty"));
    }

    #[tokio::test]
    async fn test_store_outage_is_unavailable() {
        let f = fixture();
        f.store.set_unavailable(true);

        let read = f
            .gateway
            .read(ReadRequest {
                kind: EntityKind::Post,
                target_id: None,
                scope_id: None,
            })
            .await;

        assert_eq!(read.status, ReadStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_comment_listing_read() {
        let f = fixture();
        let post_id = create_post(&f, UserId::new()).await;
        for text in ["First", "Second"] {
            f.gateway
                .mutate(mutation(
                    Some(UserId::new()),
                    EntityKind::Comment,
                    Operation::Create,
                    None,
                    Some(post_id.clone()),
                    json!({ "content": text }),
                ))
                .await;
        }

        let listing = f
            .gateway
            .read(ReadRequest {
                kind: EntityKind::Comment,
                target_id: None,
                scope_id: Some(post_id),
            })
            .await;

        assert_eq!(listing.status, ReadStatus::Ok);
        assert_eq!(listing.entities.unwrap().len(), 2);
    }
}
