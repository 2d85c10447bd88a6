//! User service implementation.

use crate::cache::{CacheCoordinator, CacheInterface};
use crate::dto::{UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use quill_config::LISTING_TTL_SECS;
use quill_core::{QuillError, QuillResult, UserId};
use quill_domain::{User, UserChanges};
use quill_repository::UserRepository;
use quill_security::{require_actor, require_owner, PasswordHasherInterface};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = Duration::from_secs(LISTING_TTL_SECS))]
    listing_ttl: Duration,
}

impl UserServiceComponent {
    /// Creates the service outside of a DI module.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn CacheInterface>,
        listing_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            cache,
            listing_ttl,
        }
    }

    fn coordinator(&self) -> CacheCoordinator<'_> {
        CacheCoordinator::new(self.cache.as_ref(), self.listing_ttl)
    }

    async fn fetch(&self, id: UserId) -> QuillResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn get_current_user(&self, actor: Option<UserId>) -> QuillResult<UserResponse> {
        let actor = require_actor(actor)?;
        debug!("Getting user: {}", actor);
        self.fetch(actor).await.map(UserResponse::from)
    }

    async fn update_user(
        &self,
        actor: Option<UserId>,
        request: UpdateUserRequest,
    ) -> QuillResult<UserResponse> {
        let actor = require_actor(actor)?;
        let update = request.into_update()?;

        let user = self.fetch(actor).await?;
        require_owner(actor, &user)?;

        if let Some(email) = &update.email {
            if let Some(existing) = self.user_repository.find_by_email(email.as_str()).await? {
                if existing.id != user.id {
                    return Err(QuillError::conflict(format!(
                        "Email '{email}' is already registered"
                    )));
                }
            }
        }

        let password_hash = update
            .password
            .as_deref()
            .map(|password| self.password_hasher.hash(password))
            .transpose()?;

        let changes = UserChanges {
            first_name: update.first_name,
            last_name: update.last_name,
            email: update.email,
            password_hash,
        };

        let updated = self
            .user_repository
            .update(actor, &changes)
            .await?
            .ok_or_else(|| QuillError::not_found("User", actor))?;

        info!("User updated: {}", actor);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, actor: Option<UserId>) -> QuillResult<()> {
        let actor = require_actor(actor)?;

        let user = self.fetch(actor).await?;
        require_owner(actor, &user)?;

        let affected = self
            .user_repository
            .delete(actor)
            .await?
            .ok_or_else(|| QuillError::not_found("User", actor))?;

        self.coordinator().invalidate_posts_and_comments(&affected).await;

        info!("User deleted: {} ({} posts touched)", actor, affected.len());
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}
