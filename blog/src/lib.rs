//! # Culinary Blog
//!
//! Client core of a recipe and article blog: domain models, repositories over
//! the REST API, and one reducer per screen (feed, post detail, login and
//! registration, post creation).
//!
//! ## Architecture
//!
//! ```text
//! Intent → Reducer → (State, Effects) → Repository call → Completion → Reducer
//! ```
//!
//! Every screen keeps a single [`ViewState`] per piece of data. Each request
//! is tagged with a generation, and completions of superseded requests are
//! dropped, so the last issued request always wins.
//!
//! ## Example: loading the feed
//!
//! ```no_run
//! use culinary_blog::{BlogEnvironment, FeedAction, FeedReducer, FeedState};
//! use culinary_blog_api::{ApiConfig, BlogClient, InMemoryTokenStorage};
//! use culinary_blog_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BlogClient::new(ApiConfig::from_env(), Arc::new(InMemoryTokenStorage::new()))?;
//! let store = Store::new(
//!     FeedState::default(),
//!     FeedReducer::new(),
//!     BlogEnvironment::remote(client),
//! );
//!
//! let mut handle = store.send(FeedAction::Load).await?;
//! handle.wait().await;
//!
//! let cards = store.state(|state| state.visible_posts().len()).await;
//! println!("{cards} recipes");
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod environment;
pub mod error;
pub mod mapper;
pub mod mocks;
pub mod model;
pub mod reducers;
pub mod repository;
pub mod request;
pub mod validation;
pub mod view_state;

// Re-export main types for convenience
pub use environment::BlogEnvironment;
pub use error::{BlogError, Result, ValidationError};
pub use model::{PostCard, PostFull, PostType};
pub use reducers::{
    AuthAction, AuthReducer, AuthState, CreatePostAction, CreatePostReducer, CreatePostState,
    DetailAction, DetailReducer, DetailState, FeedAction, FeedReducer, FeedState, FeedTab,
};
pub use repository::{AuthRepository, PostRepository};
pub use request::PostCreateRequest;
pub use view_state::{Presentation, ViewState};
