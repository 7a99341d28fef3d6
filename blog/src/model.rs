//! Domain models.
//!
//! Every model is built from a server payload (see [`crate::mapper`]); none
//! of them invents an id or a timestamp.

use crate::constants::{ARTICLE_POST_TYPE, DEFAULT_POST_TYPE, UNKNOWN_AUTHOR_INITIAL};
use culinary_blog_api::UploadKind;
use std::collections::BTreeSet;
use std::fmt;

/// Normalized post type.
///
/// The server sends a free-form string that may be missing, blank or
/// differently cased. [`PostType::normalize`] is the single place that
/// interprets it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PostType {
    /// `recipe`, also assumed when the server sends nothing
    #[default]
    Recipe,
    /// `article`
    Article,
    /// Any other lower-cased value
    Other(String),
}

impl PostType {
    /// Lower-case the raw value; missing or blank becomes [`PostType::Recipe`].
    ///
    /// ```
    /// use culinary_blog::model::PostType;
    ///
    /// assert_eq!(PostType::normalize(None), PostType::Recipe);
    /// assert_eq!(PostType::normalize(Some("  ")), PostType::Recipe);
    /// assert_eq!(PostType::normalize(Some("ARTICLE")), PostType::Article);
    /// ```
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let normalized = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        match normalized.as_deref() {
            None | Some(DEFAULT_POST_TYPE) => Self::Recipe,
            Some(ARTICLE_POST_TYPE) => Self::Article,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Normalized wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Recipe => DEFAULT_POST_TYPE,
            Self::Article => ARTICLE_POST_TYPE,
            Self::Other(value) => value,
        }
    }

    /// Whether recipe-only sections (ingredients, steps, cooking time, calories) apply.
    #[must_use]
    pub const fn is_recipe(&self) -> bool {
        matches!(self, Self::Recipe)
    }

    /// Type badge shown on cards and the detail screen.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Article => "Статья",
            Self::Recipe | Self::Other(_) => "Рецепт",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status chosen on the creation form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PostStatus {
    /// Saved but not shown in the feed
    #[default]
    Draft,
    /// Shown in the feed
    Published,
}

impl PostStatus {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => crate::constants::DRAFT_STATUS,
            Self::Published => crate::constants::PUBLISHED_STATUS,
        }
    }
}

/// Cooking time and calories, shown only for recipes that have either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecipeDetails {
    /// Cooking time in minutes
    pub cooking_time_minutes: Option<i32>,
    /// Calories per serving
    pub calories: Option<i32>,
}

impl RecipeDetails {
    fn for_post(
        post_type: &PostType,
        cooking_time_minutes: Option<i32>,
        calories: Option<i32>,
    ) -> Option<Self> {
        (post_type.is_recipe() && (cooking_time_minutes.is_some() || calories.is_some())).then_some(
            Self {
                cooking_time_minutes,
                calories,
            },
        )
    }
}

/// Feed card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCard {
    /// Post id
    pub id: i64,
    /// Title, possibly empty
    pub title: String,
    /// Teaser, possibly empty
    pub excerpt: String,
    /// Cover image URL
    pub cover_url: Option<String>,
    /// Author id
    pub author_id: Option<i64>,
    /// Author display name as sent by the server
    pub author_name: Option<String>,
    /// Normalized post type
    pub post_type: PostType,
    /// Like count
    pub likes_count: i32,
    /// View count
    pub views_count: i64,
    /// Cooking time in minutes
    pub cooking_time_minutes: Option<i32>,
    /// Calories per serving
    pub calories: Option<i32>,
    /// Publication timestamp, opaque
    pub published_at: Option<String>,
    /// Tag names
    pub tags: BTreeSet<String>,
}

impl PostCard {
    /// Type badge ("Рецепт" / "Статья").
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        self.post_type.label()
    }

    /// Author name, `None` when missing or blank.
    #[must_use]
    pub fn author_display_name(&self) -> Option<&str> {
        non_blank(self.author_name.as_deref())
    }

    /// Upper-cased first letter of the author name, `'?'` without one.
    #[must_use]
    pub fn author_initial(&self) -> char {
        initial(self.author_name.as_deref())
    }

    /// Cover URL, `None` when missing or blank.
    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        non_blank(self.cover_url.as_deref())
    }

    /// Cooking time and calories, for recipes only.
    #[must_use]
    pub fn recipe_details(&self) -> Option<RecipeDetails> {
        RecipeDetails::for_post(&self.post_type, self.cooking_time_minutes, self.calories)
    }
}

/// Author block of a full post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostAuthor {
    /// Author id
    pub id: Option<i64>,
    /// Display name
    pub display_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Whether the current user follows this author
    pub subscribed: bool,
}

/// Tag attached to a full post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostTag {
    /// Tag id
    pub id: i64,
    /// Tag name
    pub name: String,
    /// Display colour
    pub color: Option<String>,
}

/// Ingredient line of a full post.
#[derive(Clone, Debug, PartialEq)]
pub struct PostIngredientLine {
    /// Ingredient id
    pub ingredient_id: i64,
    /// Ingredient name
    pub ingredient_name: String,
    /// Amount
    pub quantity: Option<f64>,
    /// Unit of the amount
    pub unit: Option<String>,
}

impl PostIngredientLine {
    /// `"<name> — <quantity> <unit>"`, or just the name without an amount.
    ///
    /// ```
    /// use culinary_blog::model::PostIngredientLine;
    ///
    /// let line = PostIngredientLine {
    ///     ingredient_id: 1,
    ///     ingredient_name: "Мука".to_string(),
    ///     quantity: Some(0.5),
    ///     unit: Some("кг".to_string()),
    /// };
    /// assert_eq!(line.label(), "Мука — 0.5 кг");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        let quantity = format_quantity(self.quantity, self.unit.as_deref());
        if quantity.is_empty() {
            self.ingredient_name.clone()
        } else {
            format!("{} — {quantity}", self.ingredient_name)
        }
    }
}

/// Cooking step of a full post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostStep {
    /// Position, 1-based
    pub order: i32,
    /// Step text
    pub description: String,
    /// Step illustration URL
    pub image_url: Option<String>,
}

/// Full post.
#[derive(Clone, Debug, PartialEq)]
pub struct PostFull {
    /// Post id
    pub id: i64,
    /// Normalized post type
    pub post_type: PostType,
    /// Publication status as sent by the server
    pub status: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Teaser
    pub excerpt: Option<String>,
    /// Body
    pub content: Option<String>,
    /// Cover image URL
    pub cover_url: Option<String>,
    /// Creation timestamp, opaque
    pub created_at: Option<String>,
    /// Last update timestamp, opaque
    pub updated_at: Option<String>,
    /// Author
    pub author: Option<PostAuthor>,
    /// Tags
    pub tags: Vec<PostTag>,
    /// Ingredient lines
    pub ingredients: Vec<PostIngredientLine>,
    /// Steps, ascending by order
    pub steps: Vec<PostStep>,
    /// Like count
    pub likes_count: i32,
    /// Whether the current user liked the post
    pub liked: bool,
    /// View count
    pub views_count: i64,
    /// Calories per serving
    pub calories: Option<i32>,
    /// Cooking time in minutes
    pub cooking_time_minutes: Option<i32>,
}

impl PostFull {
    /// Type badge ("Рецепт" / "Статья").
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        self.post_type.label()
    }

    /// Author name, `None` when missing or blank.
    #[must_use]
    pub fn author_display_name(&self) -> Option<&str> {
        non_blank(
            self.author
                .as_ref()
                .and_then(|author| author.display_name.as_deref()),
        )
    }

    /// Upper-cased first letter of the author name, `'?'` without one.
    #[must_use]
    pub fn author_initial(&self) -> char {
        initial(self.author_display_name())
    }

    /// Ingredient labels for recipes, blank labels dropped.
    ///
    /// Articles have no ingredient section and always yield an empty list.
    #[must_use]
    pub fn ingredient_labels(&self) -> Vec<String> {
        if !self.post_type.is_recipe() {
            return Vec::new();
        }
        self.ingredients
            .iter()
            .map(PostIngredientLine::label)
            .filter(|label| !label.trim().is_empty())
            .collect()
    }

    /// Cooking time and calories, for recipes only.
    #[must_use]
    pub fn recipe_details(&self) -> Option<RecipeDetails> {
        RecipeDetails::for_post(&self.post_type, self.cooking_time_minutes, self.calories)
    }
}

/// Tag offered on the creation form. Identity is the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagItem {
    /// Tag id
    pub id: i64,
    /// Tag name
    pub name: String,
    /// Display colour
    pub color: Option<String>,
}

/// Ingredient offered on the creation form. Identity is the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientItem {
    /// Ingredient id
    pub id: i64,
    /// Ingredient name
    pub name: String,
}

/// Tokens issued by login or registration.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Refresh token
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    pub expires_in: Option<i64>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Identity of a step row on the creation form.
///
/// The form hands one out when a row is added and never reuses it, so an
/// upload started for a row still finds that row after rows above it are
/// removed or reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepKey(u64);

impl StepKey {
    /// Wrap a key chosen by the form.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw key.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// Where an uploaded image goes on the creation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageTarget {
    /// Post cover
    Cover,
    /// Illustration of the step row with this key
    Step(StepKey),
}

impl ImageTarget {
    /// Upload category sent to the server.
    #[must_use]
    pub const fn kind(self) -> UploadKind {
        match self {
            Self::Cover => UploadKind::Cover,
            Self::Step(_) => UploadKind::Step,
        }
    }
}

/// Image bytes picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Destination on the form
    pub target: ImageTarget,
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("target", &self.target)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Image stored by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    /// Destination on the form
    pub target: ImageTarget,
    /// Public URL
    pub url: String,
}

/// `"<quantity> <unit>"` trimmed; whole numbers print without a fraction.
#[must_use]
pub fn format_quantity(quantity: Option<f64>, unit: Option<&str>) -> String {
    let value = quantity.map(|q| q.to_string()).unwrap_or_default();
    let unit = non_blank(unit).unwrap_or_default();
    format!("{value} {unit}").trim().to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn initial(name: Option<&str>) -> char {
    name.and_then(|n| n.trim().chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or(UNKNOWN_AUTHOR_INITIAL)
}
