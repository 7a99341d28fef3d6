//! Shared constants.

/// Normalized post type of recipes, and the type assumed when the server sends none.
pub const DEFAULT_POST_TYPE: &str = "recipe";

/// Normalized post type of articles.
pub const ARTICLE_POST_TYPE: &str = "article";

/// Status of a post that is not yet visible in the feed.
pub const DRAFT_STATUS: &str = "draft";

/// Status of a post visible in the feed.
pub const PUBLISHED_STATUS: &str = "published";

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Smallest ingredient amount accepted on submission.
pub const MIN_POSITIVE_AMOUNT: f64 = 0.01;

/// Avatar placeholder when the author has no usable name.
pub const UNKNOWN_AUTHOR_INITIAL: char = '?';
