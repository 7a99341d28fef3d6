//! Mock post repository for testing.

use super::{Script, respond};
use crate::error::Result;
use crate::model::{ImageUpload, IngredientItem, PostCard, PostFull, TagItem};
use crate::repository::PostRepository;
use crate::request::NewPost;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct State {
    feed: Script<Vec<PostCard>>,
    post: Script<PostFull>,
    tags: Script<Vec<TagItem>>,
    ingredients: Script<Vec<IngredientItem>>,
    create: Script<PostCard>,
    upload: Script<String>,
    post_requests: Vec<(i64, Option<i64>)>,
    searches: Vec<Option<String>>,
    created: Vec<NewPost>,
    uploads: Vec<ImageUpload>,
}

/// Mock post repository.
///
/// Clones share their script and call log.
#[derive(Debug, Clone, Default)]
pub struct MockPostRepository {
    state: Arc<Mutex<State>>,
}

impl MockPostRepository {
    /// Create a mock with nothing scripted; every call fails until scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Scripting
    // ═══════════════════════════════════════════════════════════════════════

    /// Script the next feed response.
    #[must_use]
    pub fn with_feed(self, result: Result<Vec<PostCard>>) -> Self {
        self.with_feed_after(Duration::ZERO, result)
    }

    /// Script the next feed response, delivered after `delay`.
    #[must_use]
    pub fn with_feed_after(self, delay: Duration, result: Result<Vec<PostCard>>) -> Self {
        self.lock().feed.push(delay, result);
        self
    }

    /// Script the next full post response.
    #[must_use]
    pub fn with_post(self, result: Result<PostFull>) -> Self {
        self.with_post_after(Duration::ZERO, result)
    }

    /// Script the next full post response, delivered after `delay`.
    #[must_use]
    pub fn with_post_after(self, delay: Duration, result: Result<PostFull>) -> Self {
        self.lock().post.push(delay, result);
        self
    }

    /// Script the next tag lookup response.
    #[must_use]
    pub fn with_tags(self, result: Result<Vec<TagItem>>) -> Self {
        self.with_tags_after(Duration::ZERO, result)
    }

    /// Script the next tag lookup response, delivered after `delay`.
    #[must_use]
    pub fn with_tags_after(self, delay: Duration, result: Result<Vec<TagItem>>) -> Self {
        self.lock().tags.push(delay, result);
        self
    }

    /// Script the next ingredient lookup response.
    #[must_use]
    pub fn with_ingredients(self, result: Result<Vec<IngredientItem>>) -> Self {
        self.lock().ingredients.push(Duration::ZERO, result);
        self
    }

    /// Script the next creation response.
    #[must_use]
    pub fn with_created(self, result: Result<PostCard>) -> Self {
        self.lock().create.push(Duration::ZERO, result);
        self
    }

    /// Script the next upload response.
    #[must_use]
    pub fn with_upload(self, result: Result<String>) -> Self {
        self.with_upload_after(Duration::ZERO, result)
    }

    /// Script the next upload response, delivered after `delay`.
    #[must_use]
    pub fn with_upload_after(self, delay: Duration, result: Result<String>) -> Self {
        self.lock().upload.push(delay, result);
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call log
    // ═══════════════════════════════════════════════════════════════════════

    /// Number of feed requests.
    #[must_use]
    pub fn feed_calls(&self) -> usize {
        self.lock().feed.calls()
    }

    /// `(id, current_user_id)` of every full post request.
    #[must_use]
    pub fn post_requests(&self) -> Vec<(i64, Option<i64>)> {
        self.lock().post_requests.clone()
    }

    /// Number of tag lookups.
    #[must_use]
    pub fn tag_calls(&self) -> usize {
        self.lock().tags.calls()
    }

    /// Number of ingredient lookups.
    #[must_use]
    pub fn ingredient_calls(&self) -> usize {
        self.lock().ingredients.calls()
    }

    /// Search text of every tag and ingredient lookup, in call order.
    #[must_use]
    pub fn searches(&self) -> Vec<Option<String>> {
        self.lock().searches.clone()
    }

    /// Every payload passed to `create_post`.
    #[must_use]
    pub fn created_posts(&self) -> Vec<NewPost> {
        self.lock().created.clone()
    }

    /// Every upload passed to `upload_image`.
    #[must_use]
    pub fn uploads(&self) -> Vec<ImageUpload> {
        self.lock().uploads.clone()
    }

    /// Requests of any kind.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        let state = self.lock();
        state.feed.calls()
            + state.post.calls()
            + state.tags.calls()
            + state.ingredients.calls()
            + state.create.calls()
            + state.upload.calls()
    }
}

impl PostRepository for MockPostRepository {
    fn published_posts(&self) -> impl Future<Output = Result<Vec<PostCard>>> + Send {
        let (delay, result) = self.lock().feed.next();
        respond(delay, result)
    }

    fn post(
        &self,
        id: i64,
        current_user_id: Option<i64>,
    ) -> impl Future<Output = Result<PostFull>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.post_requests.push((id, current_user_id));
            state.post.next()
        };
        respond(delay, result)
    }

    fn tags(&self, search: Option<String>) -> impl Future<Output = Result<Vec<TagItem>>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.searches.push(search);
            state.tags.next()
        };
        respond(delay, result)
    }

    fn ingredients(
        &self,
        search: Option<String>,
    ) -> impl Future<Output = Result<Vec<IngredientItem>>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.searches.push(search);
            state.ingredients.next()
        };
        respond(delay, result)
    }

    fn create_post(&self, post: NewPost) -> impl Future<Output = Result<PostCard>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.created.push(post);
            state.create.next()
        };
        respond(delay, result)
    }

    fn upload_image(&self, upload: ImageUpload) -> impl Future<Output = Result<String>> + Send {
        let (delay, result) = {
            let mut state = self.lock();
            state.uploads.push(upload);
            state.upload.next()
        };
        respond(delay, result)
    }
}
