//! Feed reducer.
//!
//! Loads the published posts once per `Load` and filters them by the selected
//! tab on the client.
//!
//! # Flow
//!
//! 1. `Load` issues a new generation and enters `Loading`, keeping the cards
//!    already on screen
//! 2. The repository call completes with `PostsLoaded`
//! 3. A completion whose generation is no longer current is dropped
//! 4. Otherwise the feed becomes `Success` or `Error` with the last good cards

use crate::environment::BlogEnvironment;
use crate::error::Result;
use crate::model::{PostCard, PostType};
use crate::repository::{AuthRepository, PostRepository};
use crate::view_state::{Presentation, ViewState};
use culinary_blog_core::async_effect;
use culinary_blog_core::effect::Effect;
use culinary_blog_core::generation::{Generation, RequestGeneration};
use culinary_blog_core::reducer::Reducer;
use culinary_blog_core::{SmallVec, smallvec};

/// Feed tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeedTab {
    /// Recipes only
    #[default]
    Recipes,
    /// Articles only
    Articles,
    /// Everything
    All,
}

impl FeedTab {
    /// Whether a post of this type belongs on the tab.
    #[must_use]
    pub const fn shows(self, post_type: &PostType) -> bool {
        match self {
            Self::Recipes => matches!(post_type, PostType::Recipe),
            Self::Articles => matches!(post_type, PostType::Article),
            Self::All => true,
        }
    }
}

/// Feed screen state.
///
/// The feed fetches as soon as it is created, so the default state is already
/// `Loading` with nothing to show. The owner dispatches [`FeedAction::Load`]
/// right after creating it; until then no generation has been issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedState {
    /// Every loaded card, unfiltered
    pub posts: ViewState<Vec<PostCard>>,
    /// Selected tab
    pub tab: FeedTab,
    requests: RequestGeneration,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: ViewState::Loading { previous: None },
            tab: FeedTab::default(),
            requests: RequestGeneration::new(),
        }
    }
}

impl FeedState {
    /// Cards on the selected tab, fresh or stale.
    #[must_use]
    pub fn visible_posts(&self) -> Vec<&PostCard> {
        self.posts
            .data()
            .map(|posts| {
                posts
                    .iter()
                    .filter(|post| self.tab.shows(&post.post_type))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether to show the "nothing here yet" placeholder.
    ///
    /// Only after a successful load; a failure shows its error instead.
    #[must_use]
    pub fn show_empty(&self) -> bool {
        matches!(self.posts, ViewState::Success(_)) && self.visible_posts().is_empty()
    }

    /// How the feed should render.
    #[must_use]
    pub fn presentation(&self) -> Presentation<'_> {
        self.posts.presentation()
    }

    /// Generation of the most recent load.
    #[must_use]
    pub const fn current_generation(&self) -> Generation {
        self.requests.current()
    }
}

/// Feed actions.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Intents
    // ═══════════════════════════════════════════════════════════════════════
    /// Load (or reload) the feed
    Load,
    /// Switch tab
    SelectTab(FeedTab),

    // ═══════════════════════════════════════════════════════════════════════
    // Completions
    // ═══════════════════════════════════════════════════════════════════════
    /// Feed request finished
    PostsLoaded {
        /// Generation the request was issued with
        generation: Generation,
        /// Cards or failure
        result: Result<Vec<PostCard>>,
    },
}

/// Feed reducer.
#[derive(Debug, Clone)]
pub struct FeedReducer<P, A> {
    _phantom: std::marker::PhantomData<(P, A)>,
}

impl<P, A> FeedReducer<P, A> {
    /// Create a new feed reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, A> Default for FeedReducer<P, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, A> Reducer for FeedReducer<P, A>
where
    P: PostRepository + Clone + 'static,
    A: AuthRepository + Clone + 'static,
{
    type State = FeedState;
    type Action = FeedAction;
    type Environment = BlogEnvironment<P, A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FeedAction::Load => {
                let generation = state.requests.issue();
                state.posts.begin_loading();
                tracing::debug!(%generation, "Loading feed");

                let posts = env.posts.clone();
                smallvec![async_effect! {
                    let result = posts.published_posts().await;
                    Some(FeedAction::PostsLoaded { generation, result })
                }]
            },

            FeedAction::SelectTab(tab) => {
                state.tab = tab;
                smallvec![Effect::None]
            },

            FeedAction::PostsLoaded { generation, result } => {
                if !state.requests.is_current(generation) {
                    tracing::debug!(%generation, "Discarding superseded feed response");
                    return smallvec![Effect::None];
                }

                match result {
                    Ok(posts) => state.posts.succeed(posts),
                    Err(error) => {
                        tracing::warn!(%error, "Feed load failed");
                        state.posts.fail(error.to_string());
                    },
                }
                smallvec![Effect::None]
            },
        }
    }
}
