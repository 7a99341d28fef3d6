//! Post creation reducer.
//!
//! The form has four independent request streams: tag lookup, ingredient
//! lookup, image uploads (one per target) and the submission itself. Each
//! stream keeps its own generation counter, so reloading tags never
//! invalidates an ingredient lookup and re-uploading a cover never drops a
//! step image.
//!
//! Step images are addressed by the row's [`StepKey`](crate::model::StepKey),
//! not its position. At submission every successful upload replaces the URL
//! in its slot; the form sends `ClearImage` when the user edits or removes a
//! slot so that a typed URL wins again.

use crate::environment::BlogEnvironment;
use crate::error::{Result, ValidationError};
use crate::model::{ImageTarget, ImageUpload, IngredientItem, PostCard, TagItem, UploadedImage};
use crate::repository::{AuthRepository, PostRepository};
use crate::request::PostCreateRequest;
use crate::view_state::ViewState;
use culinary_blog_core::async_effect;
use culinary_blog_core::effect::Effect;
use culinary_blog_core::generation::{Generation, RequestGeneration};
use culinary_blog_core::reducer::Reducer;
use culinary_blog_core::{SmallVec, smallvec};
use std::collections::BTreeMap;

/// Message for a failed submission without details.
pub const GENERIC_CREATE_ERROR: &str = "Не удалось создать публикацию";

/// Creation form state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatePostState {
    /// Tags offered for selection
    pub tags: ViewState<Vec<TagItem>>,
    /// Ingredients offered for selection
    pub ingredients: ViewState<Vec<IngredientItem>>,
    /// Image upload per target
    pub uploads: BTreeMap<ImageTarget, ViewState<String>>,
    /// Last submission; `Success` holds the created post
    pub submission: ViewState<PostCard>,
    /// Why the last submission was refused without contacting the server
    pub rejection: Option<ValidationError>,
    tag_requests: RequestGeneration,
    ingredient_requests: RequestGeneration,
    upload_requests: BTreeMap<ImageTarget, RequestGeneration>,
    submit_requests: RequestGeneration,
}

impl CreatePostState {
    /// URL of the uploaded image for `target`, if any upload succeeded.
    #[must_use]
    pub fn uploaded_url(&self, target: ImageTarget) -> Option<&str> {
        self.uploads
            .get(&target)
            .and_then(ViewState::data)
            .map(String::as_str)
    }

    /// Post created by the last submission.
    #[must_use]
    pub const fn created(&self) -> Option<&PostCard> {
        match &self.submission {
            ViewState::Success(post) => Some(post),
            _ => None,
        }
    }

    /// Whether any request of the form is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.tags.is_loading()
            || self.ingredients.is_loading()
            || self.submission.is_loading()
            || self.uploads.values().any(ViewState::is_loading)
    }

    /// Inline message: local rejection first, then the submission failure.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.rejection
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.submission.error().map(str::to_string))
    }
}

/// Creation form actions.
#[derive(Clone, Debug, PartialEq)]
pub enum CreatePostAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Lookups
    // ═══════════════════════════════════════════════════════════════════════
    /// Load tags, optionally filtered
    LoadTags {
        /// Search text
        search: Option<String>,
    },
    /// Tag lookup finished
    TagsLoaded {
        /// Generation the request was issued with
        generation: Generation,
        /// Tags or failure
        result: Result<Vec<TagItem>>,
    },
    /// Load ingredients, optionally filtered
    LoadIngredients {
        /// Search text
        search: Option<String>,
    },
    /// Ingredient lookup finished
    IngredientsLoaded {
        /// Generation the request was issued with
        generation: Generation,
        /// Ingredients or failure
        result: Result<Vec<IngredientItem>>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Images
    // ═══════════════════════════════════════════════════════════════════════
    /// Upload an image for the cover or a step
    UploadImage(ImageUpload),
    /// Forget the upload for a target, including one still in flight
    ClearImage(ImageTarget),
    /// Upload finished
    ImageUploaded {
        /// Generation the request was issued with
        generation: Generation,
        /// Where the image goes
        target: ImageTarget,
        /// Public URL or failure
        result: Result<String>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Submission
    // ═══════════════════════════════════════════════════════════════════════
    /// Validate and submit the form
    Submit(PostCreateRequest),
    /// Submission finished
    Submitted {
        /// Generation the request was issued with
        generation: Generation,
        /// Created post or failure
        result: Result<PostCard>,
    },
    /// Hide the rejection or submission error
    DismissError,
}

/// Post creation reducer.
#[derive(Debug, Clone)]
pub struct CreatePostReducer<P, A> {
    _phantom: std::marker::PhantomData<(P, A)>,
}

impl<P, A> CreatePostReducer<P, A> {
    /// Create a new post creation reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, A> Default for CreatePostReducer<P, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, A> Reducer for CreatePostReducer<P, A>
where
    P: PostRepository + Clone + 'static,
    A: AuthRepository + Clone + 'static,
{
    type State = CreatePostState;
    type Action = CreatePostAction;
    type Environment = BlogEnvironment<P, A>;

    #[allow(clippy::too_many_lines)] // One arm per action, kept together
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Lookups: last good list survives a failure
            // ═══════════════════════════════════════════════════════════════
            CreatePostAction::LoadTags { search } => {
                let generation = state.tag_requests.issue();
                state.tags.begin_loading();

                let posts = env.posts.clone();
                smallvec![async_effect! {
                    let result = posts.tags(search).await;
                    Some(CreatePostAction::TagsLoaded { generation, result })
                }]
            },

            CreatePostAction::TagsLoaded { generation, result } => {
                if !state.tag_requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded tag lookup");
                    return smallvec![Effect::None];
                }
                match result {
                    Ok(tags) => state.tags.succeed(tags),
                    Err(error) => {
                        tracing::warn!(%error, "Tag lookup failed");
                        state.tags.fail(error.to_string());
                    },
                }
                smallvec![Effect::None]
            },

            CreatePostAction::LoadIngredients { search } => {
                let generation = state.ingredient_requests.issue();
                state.ingredients.begin_loading();

                let posts = env.posts.clone();
                smallvec![async_effect! {
                    let result = posts.ingredients(search).await;
                    Some(CreatePostAction::IngredientsLoaded { generation, result })
                }]
            },

            CreatePostAction::IngredientsLoaded { generation, result } => {
                if !state.ingredient_requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded ingredient lookup");
                    return smallvec![Effect::None];
                }
                match result {
                    Ok(ingredients) => state.ingredients.succeed(ingredients),
                    Err(error) => {
                        tracing::warn!(%error, "Ingredient lookup failed");
                        state.ingredients.fail(error.to_string());
                    },
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Images: one stream per target
            // ═══════════════════════════════════════════════════════════════
            CreatePostAction::UploadImage(upload) => {
                let target = upload.target;
                let generation = state.upload_requests.entry(target).or_default().issue();
                state.uploads.entry(target).or_default().begin_loading();
                tracing::debug!(?target, %generation, size = upload.bytes.len(), "Uploading image");

                let posts = env.posts.clone();
                smallvec![async_effect! {
                    let result = posts.upload_image(upload).await;
                    Some(CreatePostAction::ImageUploaded { generation, target, result })
                }]
            },

            CreatePostAction::ClearImage(target) => {
                if let Some(requests) = state.upload_requests.get_mut(&target) {
                    requests.issue();
                }
                if state.uploads.remove(&target).is_some() {
                    tracing::debug!(?target, "Cleared uploaded image");
                }
                smallvec![Effect::None]
            },

            CreatePostAction::ImageUploaded {
                generation,
                target,
                result,
            } => {
                let current = state
                    .upload_requests
                    .get(&target)
                    .is_some_and(|requests| requests.is_current(generation));
                if !current {
                    tracing::debug!(?target, %generation, "Discarding superseded upload");
                    return smallvec![Effect::None];
                }

                let upload = state.uploads.entry(target).or_default();
                match result {
                    Ok(url) => upload.succeed(url),
                    Err(error) => {
                        tracing::warn!(?target, %error, "Image upload failed");
                        upload.fail(error.to_string());
                    },
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Submission: validate locally, then one request
            // ═══════════════════════════════════════════════════════════════
            CreatePostAction::Submit(request) => {
                state.rejection = None;

                let request = state.uploads.iter().fold(request, |request, (target, upload)| {
                    match upload.data() {
                        Some(url) => request.with_uploaded(&UploadedImage {
                            target: *target,
                            url: url.clone(),
                        }),
                        None => request,
                    }
                });

                let post = match request.validate() {
                    Ok(post) => post,
                    Err(rejection) => {
                        tracing::debug!(%rejection, "Post form rejected");
                        state.rejection = Some(rejection);
                        return smallvec![Effect::None];
                    },
                };

                let generation = state.submit_requests.issue();
                // A new submission forgets the previously created post
                state.submission = ViewState::Loading { previous: None };

                let posts = env.posts.clone();
                smallvec![async_effect! {
                    let result = posts.create_post(post).await;
                    Some(CreatePostAction::Submitted { generation, result })
                }]
            },

            CreatePostAction::Submitted { generation, result } => {
                if !state.submit_requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded submission");
                    return smallvec![Effect::None];
                }
                match result {
                    Ok(post) => state.submission.succeed(post),
                    Err(error) => {
                        tracing::warn!(%error, "Post creation failed");
                        let message = error.to_string();
                        state.submission.fail(if message.trim().is_empty() {
                            GENERIC_CREATE_ERROR.to_string()
                        } else {
                            message
                        });
                    },
                }
                smallvec![Effect::None]
            },

            CreatePostAction::DismissError => {
                state.rejection = None;
                state.submission.dismiss_error();
                smallvec![Effect::None]
            },
        }
    }
}
