//! Post creation payload.
//!
//! [`PostCreateRequest`] collects raw form input; [`PostCreateRequest::validate`]
//! turns it into a [`NewPost`] or a [`ValidationError`] without touching the
//! network.

use crate::constants::MIN_POSITIVE_AMOUNT;
use crate::error::ValidationError;
use crate::model::{ImageTarget, PostStatus, PostType, StepKey, UploadedImage};

/// One ingredient row of the creation form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngredientRow {
    /// Ingredient picked from the lookup, if any
    pub ingredient_id: Option<i64>,
    /// Amount typed by the user
    pub quantity: Option<f64>,
    /// Unit typed by the user
    pub unit: Option<String>,
}

impl IngredientRow {
    /// Row with a selected ingredient.
    #[must_use]
    pub fn new(ingredient_id: i64, quantity: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            ingredient_id: Some(ingredient_id),
            quantity,
            unit: Some(unit.into()),
        }
    }

    /// Row built from raw text fields.
    ///
    /// The amount accepts a decimal comma; anything unparsable or not finite
    /// (`inf`, `NaN`) is treated as missing.
    ///
    /// ```
    /// use culinary_blog::request::IngredientRow;
    ///
    /// let row = IngredientRow::from_input(Some(4), " 0,5 ", "kg");
    /// assert_eq!(row.quantity, Some(0.5));
    ///
    /// let blank = IngredientRow::from_input(Some(4), "", "kg");
    /// assert_eq!(blank.quantity, None);
    /// ```
    #[must_use]
    pub fn from_input(ingredient_id: Option<i64>, amount: &str, unit: &str) -> Self {
        let quantity = amount
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|quantity| quantity.is_finite());
        Self {
            ingredient_id,
            quantity,
            unit: Some(unit.to_string()),
        }
    }
}

/// One step row of the creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepRow {
    /// Row identity; uploads can only reach keyed rows
    pub key: Option<StepKey>,
    /// Step text
    pub description: String,
    /// Step illustration URL
    pub image_url: Option<String>,
}

impl StepRow {
    /// Row without an illustration.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            key: None,
            description: description.into(),
            image_url: None,
        }
    }

    /// Give the row the key its uploads are addressed to.
    #[must_use]
    pub const fn keyed(mut self, key: StepKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Attach an illustration URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Raw input of the creation form.
///
/// # Example
///
/// ```
/// use culinary_blog::request::{IngredientRow, PostCreateRequest, StepRow};
///
/// let post = PostCreateRequest::new(1, "Borscht", "Beet soup", "Cook it")
///     .tag(2)
///     .ingredient(IngredientRow::new(4, Some(0.5), "kg"))
///     .step(StepRow::new("Chop"))
///     .validate()
///     .unwrap();
///
/// assert_eq!(post.steps[0].order, 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PostCreateRequest {
    author_id: i64,
    title: String,
    excerpt: String,
    content: String,
    post_type: PostType,
    status: PostStatus,
    cover_url: Option<String>,
    cooking_time_minutes: Option<i32>,
    calories: Option<i32>,
    tag_ids: Vec<i64>,
    ingredients: Vec<IngredientRow>,
    steps: Vec<StepRow>,
}

impl PostCreateRequest {
    /// Start a draft recipe.
    #[must_use]
    pub fn new(
        author_id: i64,
        title: impl Into<String>,
        excerpt: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            post_type: PostType::Recipe,
            status: PostStatus::Draft,
            cover_url: None,
            cooking_time_minutes: None,
            calories: None,
            tag_ids: Vec::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Set the post type.
    #[must_use]
    pub fn post_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    /// Set the publication status.
    #[must_use]
    pub const fn status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the cover URL.
    #[must_use]
    pub fn cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    /// Set the cooking time in minutes.
    #[must_use]
    pub const fn cooking_time(mut self, minutes: i32) -> Self {
        self.cooking_time_minutes = Some(minutes);
        self
    }

    /// Set calories per serving.
    #[must_use]
    pub const fn calories(mut self, calories: i32) -> Self {
        self.calories = Some(calories);
        self
    }

    /// Select a tag. Selecting the same tag twice has no effect.
    #[must_use]
    pub fn tag(mut self, tag_id: i64) -> Self {
        if !self.tag_ids.contains(&tag_id) {
            self.tag_ids.push(tag_id);
        }
        self
    }

    /// Append an ingredient row.
    #[must_use]
    pub fn ingredient(mut self, row: IngredientRow) -> Self {
        self.ingredients.push(row);
        self
    }

    /// Append a step row.
    #[must_use]
    pub fn step(mut self, row: StepRow) -> Self {
        self.steps.push(row);
        self
    }

    /// Author of the post.
    #[must_use]
    pub const fn author_id(&self) -> i64 {
        self.author_id
    }

    /// Put an uploaded image into the cover or a step illustration.
    ///
    /// The upload replaces whatever URL the slot held, typed or not. Step
    /// uploads go to the row with the matching key wherever it now sits; an
    /// upload whose row was removed is dropped.
    #[must_use]
    pub fn with_uploaded(mut self, image: &UploadedImage) -> Self {
        let slot = match image.target {
            ImageTarget::Cover => Some(&mut self.cover_url),
            ImageTarget::Step(key) => self
                .steps
                .iter_mut()
                .find(|row| row.key == Some(key))
                .map(|row| &mut row.image_url),
        };
        match slot {
            Some(slot) => *slot = Some(image.url.clone()),
            None => tracing::debug!(target = ?image.target, "Dropping upload for a removed step row"),
        }
        self
    }

    /// Check the form and build the payload sent to the server.
    ///
    /// Ingredient and step rows are only considered for recipes; articles are
    /// submitted without them.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingRequiredFields`] if title, excerpt or content is blank
    /// - [`ValidationError::InvalidIngredientAmount`] if a selected ingredient has no
    ///   amount of at least [`MIN_POSITIVE_AMOUNT`], or rows exist but none selects an ingredient
    /// - [`ValidationError::MissingSteps`] if step rows exist but all are blank
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        let (Some(title), Some(excerpt), Some(content)) = (
            trimmed(Some(self.title.as_str())),
            trimmed(Some(self.excerpt.as_str())),
            trimmed(Some(self.content.as_str())),
        ) else {
            return Err(ValidationError::MissingRequiredFields);
        };

        let (ingredients, steps) = if self.post_type.is_recipe() {
            (
                validate_ingredients(&self.ingredients)?,
                validate_steps(&self.steps)?,
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(NewPost {
            author_id: self.author_id,
            post_type: self.post_type,
            status: self.status,
            title,
            excerpt,
            content,
            cover_url: trimmed(self.cover_url.as_deref()),
            cooking_time_minutes: self.cooking_time_minutes,
            calories: self.calories,
            tag_ids: self.tag_ids,
            ingredients,
            steps,
        })
    }
}

fn validate_ingredients(rows: &[IngredientRow]) -> Result<Vec<NewIngredientLine>, ValidationError> {
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(ingredient_id) = row.ingredient_id else {
            continue;
        };
        let quantity = row
            .quantity
            .filter(|quantity| quantity.is_finite() && *quantity >= MIN_POSITIVE_AMOUNT)
            .ok_or(ValidationError::InvalidIngredientAmount)?;
        lines.push(NewIngredientLine {
            ingredient_id,
            quantity,
            unit: trimmed(row.unit.as_deref()),
        });
    }

    if !rows.is_empty() && lines.is_empty() {
        return Err(ValidationError::InvalidIngredientAmount);
    }
    Ok(lines)
}

fn validate_steps(rows: &[StepRow]) -> Result<Vec<NewStep>, ValidationError> {
    // Order follows the row position, blank rows included
    let steps: Vec<NewStep> = (1..)
        .zip(rows)
        .filter_map(|(order, row)| {
            trimmed(Some(row.description.as_str())).map(|description| NewStep {
                order,
                description,
                image_url: trimmed(row.image_url.as_deref()),
            })
        })
        .collect();

    if !rows.is_empty() && steps.is_empty() {
        return Err(ValidationError::MissingSteps);
    }
    Ok(steps)
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validated ingredient line.
#[derive(Clone, Debug, PartialEq)]
pub struct NewIngredientLine {
    /// Selected ingredient
    pub ingredient_id: i64,
    /// Amount, at least [`MIN_POSITIVE_AMOUNT`]
    pub quantity: f64,
    /// Trimmed unit
    pub unit: Option<String>,
}

/// Validated step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStep {
    /// Position of the row on the form, 1-based
    pub order: i32,
    /// Trimmed, non-blank text
    pub description: String,
    /// Trimmed illustration URL
    pub image_url: Option<String>,
}

/// Validated creation payload.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    /// Author id
    pub author_id: i64,
    /// Post type
    pub post_type: PostType,
    /// Publication status
    pub status: PostStatus,
    /// Trimmed title
    pub title: String,
    /// Trimmed teaser
    pub excerpt: String,
    /// Trimmed body
    pub content: String,
    /// Trimmed cover URL
    pub cover_url: Option<String>,
    /// Cooking time in minutes
    pub cooking_time_minutes: Option<i32>,
    /// Calories per serving
    pub calories: Option<i32>,
    /// Selected tags
    pub tag_ids: Vec<i64>,
    /// Ingredient lines, empty for articles
    pub ingredients: Vec<NewIngredientLine>,
    /// Steps, empty for articles
    pub steps: Vec<NewStep>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    fn recipe() -> PostCreateRequest {
        PostCreateRequest::new(1, " Borscht ", "Beet soup", "Cook it")
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let result = PostCreateRequest::new(1, "Title", "   ", "Body").validate();
        assert_eq!(result, Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn test_fields_are_trimmed_and_defaults_applied() {
        let post = recipe().cover_url("  ").validate().unwrap();

        assert_eq!(post.title, "Borscht");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.post_type, PostType::Recipe);
        assert_eq!(post.cover_url, None);
    }

    #[test]
    fn test_selected_ingredient_without_amount_rejected() {
        let result = recipe()
            .ingredient(IngredientRow::from_input(Some(4), "", "kg"))
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidIngredientAmount));
    }

    #[test]
    fn test_amount_below_minimum_rejected() {
        let result = recipe()
            .ingredient(IngredientRow::new(4, Some(0.001), "kg"))
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidIngredientAmount));
    }

    #[test]
    fn test_rows_without_selection_are_skipped() {
        let post = recipe()
            .ingredient(IngredientRow::from_input(None, "", ""))
            .ingredient(IngredientRow::new(4, Some(0.01), " "))
            .validate()
            .unwrap();

        assert_eq!(
            post.ingredients,
            vec![NewIngredientLine {
                ingredient_id: 4,
                quantity: 0.01,
                unit: None,
            }]
        );
    }

    #[test]
    fn test_only_unselected_rows_rejected() {
        let result = recipe()
            .ingredient(IngredientRow::from_input(None, "2", "шт"))
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidIngredientAmount));
    }

    #[test]
    fn test_step_order_follows_row_position() {
        let post = recipe()
            .step(StepRow::new("Chop"))
            .step(StepRow::new("  "))
            .step(StepRow::new("Boil").with_image(" http://cdn.test/boil.png "))
            .validate()
            .unwrap();

        let orders: Vec<i32> = post.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 3]);
        assert_eq!(
            post.steps[1].image_url.as_deref(),
            Some("http://cdn.test/boil.png")
        );
    }

    #[test]
    fn test_all_blank_steps_rejected() {
        let result = recipe().step(StepRow::new(" ")).validate();
        assert_eq!(result, Err(ValidationError::MissingSteps));
    }

    #[test]
    fn test_article_drops_recipe_sections() {
        let post = recipe()
            .post_type(PostType::Article)
            .status(PostStatus::Published)
            .ingredient(IngredientRow::from_input(Some(4), "", ""))
            .step(StepRow::new(" "))
            .validate()
            .unwrap();

        assert!(post.ingredients.is_empty());
        assert!(post.steps.is_empty());
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_duplicate_tags_ignored() {
        let post = recipe().tag(2).tag(3).tag(2).validate().unwrap();
        assert_eq!(post.tag_ids, vec![2, 3]);
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        for amount in ["inf", "-inf", "Infinity", "NaN"] {
            let row = IngredientRow::from_input(Some(4), amount, "kg");
            assert_eq!(row.quantity, None, "{amount}");
            assert_eq!(
                recipe().ingredient(row).validate(),
                Err(ValidationError::InvalidIngredientAmount),
                "{amount}"
            );
        }

        let result = recipe()
            .ingredient(IngredientRow::new(4, Some(f64::INFINITY), "kg"))
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidIngredientAmount));
    }

    fn uploaded(target: ImageTarget, url: &str) -> UploadedImage {
        UploadedImage {
            target,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_upload_replaces_typed_url() {
        let boil = StepKey::new(2);
        let post = recipe()
            .cover_url("http://typed.test/cover.png")
            .step(StepRow::new("Boil").keyed(boil).with_image("http://typed.test/boil.png"))
            .with_uploaded(&uploaded(ImageTarget::Cover, "http://cdn.test/cover.png"))
            .with_uploaded(&uploaded(ImageTarget::Step(boil), "http://cdn.test/boil.png"))
            .validate()
            .unwrap();

        assert_eq!(post.cover_url.as_deref(), Some("http://cdn.test/cover.png"));
        assert_eq!(
            post.steps[0].image_url.as_deref(),
            Some("http://cdn.test/boil.png")
        );
    }

    #[test]
    fn test_step_upload_follows_its_row() {
        let (chop, boil, serve) = (StepKey::new(1), StepKey::new(2), StepKey::new(3));
        let upload = uploaded(ImageTarget::Step(boil), "http://cdn.test/boil.png");

        // "Chop" was removed after the upload started
        let post = recipe()
            .step(StepRow::new("Boil").keyed(boil))
            .step(StepRow::new("Serve").keyed(serve))
            .with_uploaded(&upload)
            .with_uploaded(&uploaded(ImageTarget::Step(chop), "http://cdn.test/chop.png"))
            .validate()
            .unwrap();

        assert_eq!(post.steps.len(), 2);
        assert_eq!(post.steps[0].description, "Boil");
        assert_eq!(
            post.steps[0].image_url.as_deref(),
            Some("http://cdn.test/boil.png")
        );
        assert_eq!(post.steps[1].image_url, None);
    }

    #[test]
    fn test_unkeyed_rows_receive_no_uploads() {
        let post = recipe()
            .step(StepRow::new("Chop"))
            .with_uploaded(&uploaded(
                ImageTarget::Step(StepKey::new(1)),
                "http://cdn.test/chop.png",
            ))
            .validate()
            .unwrap();

        assert_eq!(post.steps[0].image_url, None);
    }
}
