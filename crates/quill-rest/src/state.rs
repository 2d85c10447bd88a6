//! Application state for Axum handlers.

use quill_repository::DatabasePoolInterface;
use quill_security::TokenProviderInterface;
use quill_service::{AuthService, CommentService, PostService, UserService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub post_service: Arc<dyn PostService>,
    pub comment_service: Arc<dyn CommentService>,
    pub token_provider: Arc<dyn TokenProviderInterface>,
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Resolves every handler dependency from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn AuthService>
            + HasComponent<dyn UserService>
            + HasComponent<dyn PostService>
            + HasComponent<dyn CommentService>
            + HasComponent<dyn TokenProviderInterface>
            + HasComponent<dyn DatabasePoolInterface>,
    {
        Self {
            auth_service: module.resolve(),
            user_service: module.resolve(),
            post_service: module.resolve(),
            comment_service: module.resolve(),
            token_provider: module.resolve(),
            database: module.resolve(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
