//! Wire types for the blog REST API.
//!
//! Field names follow the server's camelCase JSON. Everything except an
//! entity's `id` is optional on the wire; missing fields deserialize to
//! `None` and are defaulted during mapping, not here.

use serde::{Deserialize, Serialize};

/// Feed card returned by `GET posts` and `POST posts`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCardDto {
    /// Post id
    pub id: i64,
    /// Post title
    #[serde(default)]
    pub title: Option<String>,
    /// Short teaser
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Raw post type (`recipe`, `article`, possibly null or differently cased)
    #[serde(default)]
    pub post_type: Option<String>,
    /// Author id
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Author display name
    #[serde(default)]
    pub author_name: Option<String>,
    /// Like count
    #[serde(default)]
    pub likes_count: Option<i32>,
    /// View count
    #[serde(default)]
    pub views_count: Option<i64>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time_minutes: Option<i32>,
    /// Calories per serving
    #[serde(default)]
    pub calories: Option<i32>,
    /// Publication timestamp as sent by the server
    #[serde(default)]
    pub published_at: Option<String>,
    /// Tag names
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Author block of a full post
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthorDto {
    /// Author id
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Whether the current user follows this author
    #[serde(default)]
    pub subscribed: Option<bool>,
}

/// Tag attached to a full post
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTagDto {
    /// Tag id
    pub id: i64,
    /// Tag name
    #[serde(default)]
    pub name: Option<String>,
    /// Display colour
    #[serde(default)]
    pub color: Option<String>,
}

/// Ingredient line of a full post
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIngredientLineDto {
    /// Ingredient id
    pub ingredient_id: i64,
    /// Ingredient name
    #[serde(default)]
    pub ingredient_name: Option<String>,
    /// Amount
    #[serde(default)]
    pub quantity_value: Option<f64>,
    /// Unit of the amount
    #[serde(default)]
    pub unit: Option<String>,
}

/// Cooking step of a full post
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStepDto {
    /// Position of the step, 1-based
    pub order: i32,
    /// Step text
    #[serde(default)]
    pub description: Option<String>,
    /// Step illustration URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Full post returned by `GET posts/{id}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFullDto {
    /// Post id
    pub id: i64,
    /// Raw post type
    #[serde(default)]
    pub post_type: Option<String>,
    /// Publication status
    #[serde(default)]
    pub status: Option<String>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Teaser
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Body
    #[serde(default)]
    pub content: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Author
    #[serde(default)]
    pub author: Option<PostAuthorDto>,
    /// Tags
    #[serde(default)]
    pub tags: Option<Vec<PostTagDto>>,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Option<Vec<PostIngredientLineDto>>,
    /// Steps, in arbitrary order
    #[serde(default)]
    pub steps: Option<Vec<PostStepDto>>,
    /// Like count
    #[serde(default)]
    pub likes_count: Option<i32>,
    /// Whether the current user liked the post
    #[serde(default)]
    pub liked: Option<bool>,
    /// View count
    #[serde(default)]
    pub views_count: Option<i64>,
    /// Calories per serving
    #[serde(default)]
    pub calories: Option<i32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time_minutes: Option<i32>,
}

/// Paginated lookup envelope returned by `GET tags` and `GET ingredients`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponseDto<T> {
    /// Page contents
    #[serde(default)]
    pub results: Option<Vec<T>>,
    /// Cursor of the next page
    #[serde(default)]
    pub next: Option<String>,
}

/// Tag lookup entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    /// Tag id
    pub id: i64,
    /// Tag name
    #[serde(default)]
    pub name: String,
    /// Display colour
    #[serde(default)]
    pub color: Option<String>,
}

/// Ingredient lookup entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDto {
    /// Ingredient id
    pub id: i64,
    /// Ingredient name
    #[serde(default)]
    pub name: String,
}

/// Ingredient line of a creation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIngredientRequestDto {
    /// Selected ingredient
    pub ingredient_id: i64,
    /// Amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_value: Option<f64>,
    /// Unit of the amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Step of a creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepRequestDto {
    /// Position of the step, 1-based
    pub order: i32,
    /// Step text
    pub description: String,
    /// Step illustration URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `POST posts`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateDto {
    /// `recipe` or `article`
    pub post_type: String,
    /// `draft` or `published`
    pub status: String,
    /// Title
    pub title: String,
    /// Teaser
    pub excerpt: String,
    /// Body
    pub content: String,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Cooking time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time_minutes: Option<i32>,
    /// Calories per serving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    /// Author id
    pub author_id: i64,
    /// Selected tag ids
    pub tag_ids: Vec<i64>,
    /// Ingredient lines
    pub ingredients: Vec<PostIngredientRequestDto>,
    /// Steps
    pub steps: Vec<RecipeStepRequestDto>,
}

/// Body of `POST api/auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequestDto {
    /// Username or email
    pub username: String,
    /// Password
    pub password: String,
}

/// Body of `POST api/auth/register`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequestDto {
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

/// Token pair returned by both auth endpoints
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

// Credentials and tokens never end up in logs.
impl std::fmt::Debug for LoginRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequestDto")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for RegisterRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequestDto")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for AuthResponseDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponseDto")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Response of `POST uploads/{kind}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponseDto {
    /// Public URL of the stored image
    pub url: String,
}

/// Image upload category, used as the last path segment of the upload endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadKind {
    /// Post cover
    Cover,
    /// Cooking step illustration
    Step,
}

impl UploadKind {
    /// Path segment sent to the server
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Step => "step",
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn test_card_with_only_id() {
        let card: PostCardDto = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(card.id, 1);
        assert_eq!(card.post_type, None);
        assert_eq!(card.tags, None);
    }

    #[test]
    fn test_card_camel_case_fields() {
        let card: PostCardDto = serde_json::from_str(
            r#"{"id": 3, "postType": "Article", "likesCount": 5, "authorName": "Anna", "tags": ["soup"]}"#,
        )
        .unwrap();
        assert_eq!(card.post_type.as_deref(), Some("Article"));
        assert_eq!(card.likes_count, Some(5));
        assert_eq!(card.author_name.as_deref(), Some("Anna"));
        assert_eq!(card.tags, Some(vec!["soup".to_string()]));
    }

    #[test]
    fn test_card_missing_id_is_rejected() {
        let result = serde_json::from_str::<PostCardDto>(r#"{"title": "no id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_paginated_null_results() {
        let page: PaginatedResponseDto<TagDto> =
            serde_json::from_str(r#"{"results": null, "next": null}"#).unwrap();
        assert_eq!(page.results, None);
    }

    #[test]
    fn test_create_request_omits_absent_optionals() {
        let request = PostCreateDto {
            post_type: "article".to_string(),
            status: "draft".to_string(),
            title: "t".to_string(),
            excerpt: "e".to_string(),
            content: "c".to_string(),
            cover_url: None,
            cooking_time_minutes: None,
            calories: None,
            author_id: 4,
            tag_ids: vec![],
            ingredients: vec![],
            steps: vec![],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["postType"], "article");
        assert_eq!(json["authorId"], 4);
        assert!(json.get("coverUrl").is_none());
        assert!(json.get("calories").is_none());
    }

    #[test]
    fn test_auth_debug_hides_secrets() {
        let request = LoginRequestDto {
            username: "chef".to_string(),
            password: "secret-password".to_string(),
        };
        let response = AuthResponseDto {
            access_token: "secret-token".to_string(),
            refresh_token: None,
            expires_in: Some(60),
        };

        assert!(!format!("{request:?}").contains("secret"));
        assert!(!format!("{response:?}").contains("secret"));
    }
}
