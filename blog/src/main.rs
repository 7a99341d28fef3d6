//! Culinary blog feed viewer
//!
//! Loads the published feed from the configured API and prints the cards on
//! the requested tab.
//!
//! # Usage
//!
//! ```bash
//! # Point at a running API (defaults to http://localhost:8080/api/)
//! export CULINARY_BLOG_API_URL=http://localhost:8080/api/
//!
//! # Recipes (default), articles or everything
//! cargo run --bin culinary-blog -- articles
//! ```

use anyhow::Context;
use culinary_blog::{BlogEnvironment, FeedAction, FeedReducer, FeedState, FeedTab, Presentation};
use culinary_blog_api::{ApiConfig, BlogClient, InMemoryTokenStorage};
use culinary_blog_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "culinary_blog=debug,culinary_blog_runtime=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_tab(arg: Option<&str>) -> anyhow::Result<FeedTab> {
    match arg.map(str::to_lowercase).as_deref() {
        None | Some("recipes") => Ok(FeedTab::Recipes),
        Some("articles") => Ok(FeedTab::Articles),
        Some("all") => Ok(FeedTab::All),
        Some(other) => anyhow::bail!("unknown tab '{other}' (expected recipes, articles or all)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let tab = parse_tab(std::env::args().nth(1).as_deref())?;

    let config = ApiConfig::from_env();
    tracing::info!(base_url = config.base_url(), ?tab, "Starting feed viewer");

    let client = BlogClient::new(config, Arc::new(InMemoryTokenStorage::new()))
        .context("failed to build API client")?;
    let store = Store::new(
        FeedState::default(),
        FeedReducer::new(),
        BlogEnvironment::remote(client),
    );

    store.send(FeedAction::SelectTab(tab)).await?;
    let mut handle = store.send(FeedAction::Load).await?;
    handle.wait().await;

    let feed = store.state(Clone::clone).await;
    match feed.presentation() {
        Presentation::FullScreenError(message) | Presentation::ErrorBanner(message) => {
            eprintln!("Feed failed to load: {message}");
        },
        _ if feed.show_empty() => println!("Nothing here yet"),
        _ => {
            for post in feed.visible_posts() {
                println!(
                    "#{:<5} [{}] {}  by {}  ♥ {}",
                    post.id,
                    post.type_label(),
                    post.title,
                    post.author_display_name().unwrap_or("anonymous"),
                    post.likes_count,
                );
            }
        },
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
