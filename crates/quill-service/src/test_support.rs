//! In-memory doubles shared by the service tests and, behind the
//! `test-support` feature, by the REST tests.

use crate::cache::{CacheInterface, InMemoryCache};
use async_trait::async_trait;
use quill_core::{CommentId, PostId, QuillError, QuillResult, UserId, UNIQUE_VIOLATION_MESSAGE};
use quill_domain::{Comment, CommentChanges, Post, PostChanges, User, UserChanges};
use quill_repository::{CommentRepository, PostRepository, UserRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call observed by [`RecordingCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Get(String),
    Set(String, Duration),
    Delete(String),
}

/// Cache double that records every call and can be switched to fail.
#[derive(Default)]
pub struct RecordingCache {
    inner: InMemoryCache,
    ops: Mutex<Vec<CacheOp>>,
    failing: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().unwrap().clear();
    }

    pub fn deletes(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                CacheOp::Delete(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    /// Reads an entry without recording the call.
    pub fn raw(&self, key: &str) -> Option<String> {
        futures::executor::block_on(self.inner.get_raw(key)).unwrap()
    }

    fn record(&self, op: CacheOp) -> QuillResult<()> {
        self.ops.lock().unwrap().push(op);
        if self.failing.load(Ordering::SeqCst) {
            return Err(QuillError::Cache("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for RecordingCache {
    async fn get_raw(&self, key: &str) -> QuillResult<Option<String>> {
        self.record(CacheOp::Get(key.to_string()))?;
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> QuillResult<()> {
        self.record(CacheOp::Set(key.to_string(), ttl))?;
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> QuillResult<bool> {
        self.record(CacheOp::Delete(key.to_string()))?;
        self.inner.delete(key).await
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    posts: HashMap<PostId, Post>,
    comments: HashMap<CommentId, Comment>,
}

/// In-memory entity store with the same cascade rules as the database.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    writes: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MemUsers(self.clone()))
    }

    pub fn posts(&self) -> Arc<dyn PostRepository> {
        Arc::new(MemPosts(self.clone()))
    }

    pub fn comments(&self) -> Arc<dyn CommentRepository> {
        Arc::new(MemComments(self.clone()))
    }

    /// Number of successful store writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert_user(&self, user: &User) {
        self.state.lock().unwrap().users.insert(user.id, user.clone());
    }

    pub fn insert_post(&self, post: &Post) {
        self.state.lock().unwrap().posts.insert(post.id, post.clone());
    }

    pub fn insert_comment(&self, comment: &Comment) {
        self.state.lock().unwrap().comments.insert(comment.id, comment.clone());
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        self.state.lock().unwrap().posts.get(&id).cloned()
    }

    pub fn comment(&self, id: CommentId) -> Option<Comment> {
        self.state.lock().unwrap().comments.get(&id).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    fn check(&self) -> QuillResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(QuillError::DependencyUnavailable("store unreachable".to_string()));
        }
        Ok(())
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

struct MemUsers(InMemoryStore);
struct MemPosts(InMemoryStore);
struct MemComments(InMemoryStore);

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: UserId) -> QuillResult<Option<User>> {
        self.0.check()?;
        Ok(self.0.user(id))
    }

    async fn find_by_email(&self, email: &str) -> QuillResult<Option<User>> {
        self.0.check()?;
        let state = self.0.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .find(|u| u.email.as_str().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> QuillResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, user: &User) -> QuillResult<User> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        if state.users.values().any(|u| u.email == user.email) {
            return Err(QuillError::conflict(UNIQUE_VIOLATION_MESSAGE));
        }
        state.users.insert(user.id, user.clone());
        self.0.wrote();
        Ok(user.clone())
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> QuillResult<Option<User>> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        if let Some(email) = &changes.email {
            if state.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(QuillError::conflict(UNIQUE_VIOLATION_MESSAGE));
            }
        }
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(changes);
        self.0.wrote();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> QuillResult<Option<Vec<PostId>>> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        if state.users.remove(&id).is_none() {
            return Ok(None);
        }
        let mut touched: Vec<PostId> = state
            .posts
            .values()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .chain(state.comments.values().filter(|c| c.owner_id == id).map(|c| c.post_id))
            .collect();
        touched.sort();
        touched.dedup();
        state.posts.retain(|_, p| p.owner_id != id);
        let posts: Vec<PostId> = state.posts.keys().copied().collect();
        state
            .comments
            .retain(|_, c| c.owner_id != id && posts.contains(&c.post_id));
        self.0.wrote();
        Ok(Some(touched))
    }
}

#[async_trait]
impl PostRepository for MemPosts {
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>> {
        self.0.check()?;
        Ok(self.0.post(id))
    }

    async fn find_all(&self) -> QuillResult<Vec<Post>> {
        self.0.check()?;
        let mut posts: Vec<Post> = self.0.state.lock().unwrap().posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn save(&self, post: &Post) -> QuillResult<Post> {
        self.0.check()?;
        self.0.insert_post(post);
        self.0.wrote();
        Ok(post.clone())
    }

    async fn update(&self, id: PostId, changes: &PostChanges) -> QuillResult<Option<Post>> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        let Some(post) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        post.apply(changes);
        self.0.wrote();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> QuillResult<bool> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.comments.retain(|_, c| c.post_id != id);
        self.0.wrote();
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemComments {
    async fn find_by_id(&self, id: CommentId) -> QuillResult<Option<Comment>> {
        self.0.check()?;
        Ok(self.0.comment(id))
    }

    async fn find_by_post(&self, post_id: PostId) -> QuillResult<Vec<Comment>> {
        self.0.check()?;
        let mut comments: Vec<Comment> = self
            .0
            .state
            .lock()
            .unwrap()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn save(&self, comment: &Comment) -> QuillResult<Comment> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        if !state.posts.contains_key(&comment.post_id) {
            return Err(QuillError::not_found("Post", comment.post_id));
        }
        state.comments.insert(comment.id, comment.clone());
        self.0.wrote();
        Ok(comment.clone())
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
    ) -> QuillResult<Option<Comment>> {
        self.0.check()?;
        let mut state = self.0.state.lock().unwrap();
        let Some(comment) = state.comments.get_mut(&id) else {
            return Ok(None);
        };
        comment.apply(changes);
        self.0.wrote();
        Ok(Some(comment.clone()))
    }

    async fn delete(&self, id: CommentId) -> QuillResult<bool> {
        self.0.check()?;
        let removed = self.0.state.lock().unwrap().comments.remove(&id).is_some();
        if removed {
            self.0.wrote();
        }
        Ok(removed)
    }
}
