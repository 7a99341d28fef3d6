//! Screen reducers.
//!
//! One reducer per screen, each run by its own `Store`. All of them share the
//! same environment type and follow the same pattern: an intent issues a
//! request generation and returns one effect; the completion carries that
//! generation back and is dropped if a newer request was issued since.

pub mod auth;
pub mod create_post;
pub mod detail;
pub mod feed;

pub use auth::{AuthAction, AuthReducer, AuthState};
pub use create_post::{CreatePostAction, CreatePostReducer, CreatePostState};
pub use detail::{DetailAction, DetailContent, DetailReducer, DetailState};
pub use feed::{FeedAction, FeedReducer, FeedState, FeedTab};
