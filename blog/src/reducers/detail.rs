//! Post detail reducer.
//!
//! The screen opens on the feed card the user tapped and shows it right away.
//! `Refresh` then loads the full post in the background. A failed refresh
//! never blanks the screen: the preview (or the last full post) stays, and
//! the failure is exposed as a dismissable indicator.

use crate::environment::BlogEnvironment;
use crate::error::Result;
use crate::model::{PostCard, PostFull, PostStep, PostType, RecipeDetails};
use crate::repository::{AuthRepository, PostRepository};
use crate::view_state::ViewState;
use culinary_blog_core::async_effect;
use culinary_blog_core::effect::Effect;
use culinary_blog_core::generation::{Generation, RequestGeneration};
use culinary_blog_core::reducer::Reducer;
use culinary_blog_core::{SmallVec, smallvec};

/// What the detail screen currently knows about the post.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailContent {
    /// Feed card, shown until the full post arrives
    Preview(PostCard),
    /// Full post
    Full(Box<PostFull>),
}

impl DetailContent {
    /// Post id.
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            Self::Preview(card) => card.id,
            Self::Full(post) => post.id,
        }
    }

    /// Title, empty when the server sent none.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Preview(card) => &card.title,
            Self::Full(post) => post.title.as_deref().unwrap_or_default(),
        }
    }

    /// Normalized post type.
    #[must_use]
    pub fn post_type(&self) -> &PostType {
        match self {
            Self::Preview(card) => &card.post_type,
            Self::Full(post) => &post.post_type,
        }
    }

    /// Type badge ("Рецепт" / "Статья").
    #[must_use]
    pub fn type_label(&self) -> &'static str {
        self.post_type().label()
    }

    /// Avatar placeholder letter.
    #[must_use]
    pub fn author_initial(&self) -> char {
        match self {
            Self::Preview(card) => card.author_initial(),
            Self::Full(post) => post.author_initial(),
        }
    }

    /// Cooking time and calories, for recipes only.
    #[must_use]
    pub fn recipe_details(&self) -> Option<RecipeDetails> {
        match self {
            Self::Preview(card) => card.recipe_details(),
            Self::Full(post) => post.recipe_details(),
        }
    }

    /// Ingredient labels; the preview has none.
    #[must_use]
    pub fn ingredient_labels(&self) -> Vec<String> {
        match self {
            Self::Preview(_) => Vec::new(),
            Self::Full(post) => post.ingredient_labels(),
        }
    }

    /// Steps in cooking order, for recipes only; the preview has none.
    #[must_use]
    pub fn steps(&self) -> &[PostStep] {
        match self {
            Self::Full(post) if post.post_type.is_recipe() => &post.steps,
            _ => &[],
        }
    }

    /// Whether the full post has arrived.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

/// Detail screen state.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailState {
    /// Post shown on the screen
    pub post_id: i64,
    /// Signed-in user, for per-user flags
    pub current_user_id: Option<i64>,
    /// Preview or full post, with load status
    pub content: ViewState<DetailContent>,
    requests: RequestGeneration,
}

impl DetailState {
    /// State seeded with the tapped feed card.
    #[must_use]
    pub fn from_preview(card: PostCard, current_user_id: Option<i64>) -> Self {
        Self {
            post_id: card.id,
            current_user_id,
            content: ViewState::Success(DetailContent::Preview(card)),
            requests: RequestGeneration::new(),
        }
    }

    /// State for a post opened without a preview (e.g. from a link).
    #[must_use]
    pub fn from_id(post_id: i64, current_user_id: Option<i64>) -> Self {
        Self {
            post_id,
            current_user_id,
            content: ViewState::Idle,
            requests: RequestGeneration::new(),
        }
    }

    /// Content on screen, preview or full.
    #[must_use]
    pub const fn shown(&self) -> Option<&DetailContent> {
        self.content.data()
    }

    /// Non-blocking error shown over the content.
    ///
    /// `None` when there is no content under it; the failure then fills the
    /// screen instead (see [`ViewState::presentation`]).
    #[must_use]
    pub fn error_indicator(&self) -> Option<&str> {
        self.shown().and_then(|_| self.content.error())
    }

    /// Whether a background refresh is running.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.content.is_loading()
    }
}

/// Detail actions.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailAction {
    /// Load the full post
    Refresh,
    /// Hide the error indicator
    DismissError,
    /// Full post request finished
    PostLoaded {
        /// Generation the request was issued with
        generation: Generation,
        /// Post or failure
        result: Result<PostFull>,
    },
}

/// Detail reducer.
#[derive(Debug, Clone)]
pub struct DetailReducer<P, A> {
    _phantom: std::marker::PhantomData<(P, A)>,
}

impl<P, A> DetailReducer<P, A> {
    /// Create a new detail reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, A> Default for DetailReducer<P, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, A> Reducer for DetailReducer<P, A>
where
    P: PostRepository + Clone + 'static,
    A: AuthRepository + Clone + 'static,
{
    type State = DetailState;
    type Action = DetailAction;
    type Environment = BlogEnvironment<P, A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DetailAction::Refresh => {
                let generation = state.requests.issue();
                state.content.begin_loading();

                let posts = env.posts.clone();
                let (id, current_user_id) = (state.post_id, state.current_user_id);
                tracing::debug!(post_id = id, %generation, "Refreshing post");

                smallvec![async_effect! {
                    let result = posts.post(id, current_user_id).await;
                    Some(DetailAction::PostLoaded { generation, result })
                }]
            },

            DetailAction::DismissError => {
                state.content.dismiss_error();
                smallvec![Effect::None]
            },

            DetailAction::PostLoaded { generation, result } => {
                if !state.requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded post response");
                    return smallvec![Effect::None];
                }

                match result {
                    Ok(post) => state
                        .content
                        .succeed(DetailContent::Full(Box::new(post))),
                    Err(error) => {
                        tracing::warn!(post_id = state.post_id, %error, "Post refresh failed");
                        state.content.fail(error.to_string());
                    },
                }
                smallvec![Effect::None]
            },
        }
    }
}
