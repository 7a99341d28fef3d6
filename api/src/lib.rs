//! # Culinary Blog API Client
//!
//! HTTP transport for the culinary blog REST API: configuration, wire types,
//! bearer-token handling and a `reqwest`-based client.
//!
//! ## Example
//!
//! ```no_run
//! use culinary_blog_api::{ApiConfig, BlogClient, InMemoryTokenStorage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL, timeout and optional token from CULINARY_BLOG_* variables
//!     let client = BlogClient::new(ApiConfig::from_env(), Arc::new(InMemoryTokenStorage::new()))?;
//!
//!     let posts = client.published_posts().await?.unwrap_or_default();
//!     println!("{} posts", posts.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - Feed, post detail, tag and ingredient lookups
//! - Post creation and multipart image upload
//! - Login and registration
//! - `Authorization: Bearer` on every non-auth request when a token is stored

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod token;

// Re-export main types for convenience
pub use client::{BlogClient, INGREDIENTS_PAGE_SIZE, TAGS_PAGE_SIZE};
pub use config::ApiConfig;
pub use dto::UploadKind;
pub use error::ApiError;
pub use token::{InMemoryTokenStorage, TokenStorage};
