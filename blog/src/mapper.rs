//! Conversions between wire DTOs and domain models.
//!
//! Every conversion is total: missing collections become empty, counters
//! default to zero and flags to `false`. Deserialization failures are handled
//! before this point by the transport.

use crate::model::{
    AuthSession, IngredientItem, PostAuthor, PostCard, PostFull, PostIngredientLine, PostStep,
    PostTag, PostType, TagItem,
};
use crate::request::NewPost;
use culinary_blog_api::dto::{
    AuthResponseDto, IngredientDto, PostAuthorDto, PostCardDto, PostCreateDto, PostFullDto,
    PostIngredientLineDto, PostIngredientRequestDto, PostStepDto, PostTagDto,
    RecipeStepRequestDto, TagDto,
};

impl From<PostCardDto> for PostCard {
    fn from(dto: PostCardDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.unwrap_or_default(),
            excerpt: dto.excerpt.unwrap_or_default(),
            cover_url: dto.cover_url,
            author_id: dto.author_id,
            author_name: dto.author_name,
            post_type: PostType::normalize(dto.post_type.as_deref()),
            likes_count: dto.likes_count.unwrap_or_default(),
            views_count: dto.views_count.unwrap_or_default(),
            cooking_time_minutes: dto.cooking_time_minutes,
            calories: dto.calories,
            published_at: dto.published_at,
            tags: dto.tags.unwrap_or_default().into_iter().collect(),
        }
    }
}

impl From<PostAuthorDto> for PostAuthor {
    fn from(dto: PostAuthorDto) -> Self {
        Self {
            id: dto.id,
            display_name: dto.display_name,
            avatar_url: dto.avatar_url,
            subscribed: dto.subscribed.unwrap_or_default(),
        }
    }
}

impl From<PostTagDto> for PostTag {
    fn from(dto: PostTagDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            color: dto.color,
        }
    }
}

impl From<PostIngredientLineDto> for PostIngredientLine {
    fn from(dto: PostIngredientLineDto) -> Self {
        Self {
            ingredient_id: dto.ingredient_id,
            ingredient_name: dto.ingredient_name.unwrap_or_default(),
            quantity: dto.quantity_value,
            unit: dto.unit,
        }
    }
}

impl From<PostStepDto> for PostStep {
    fn from(dto: PostStepDto) -> Self {
        Self {
            order: dto.order,
            description: dto.description.unwrap_or_default(),
            image_url: dto.image_url,
        }
    }
}

impl From<PostFullDto> for PostFull {
    fn from(dto: PostFullDto) -> Self {
        let mut steps: Vec<PostStep> = map_all(dto.steps);
        // Stable: equal orders keep their wire order
        steps.sort_by_key(|step| step.order);

        Self {
            id: dto.id,
            post_type: PostType::normalize(dto.post_type.as_deref()),
            status: dto.status,
            title: dto.title,
            excerpt: dto.excerpt,
            content: dto.content,
            cover_url: dto.cover_url,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            author: dto.author.map(PostAuthor::from),
            tags: map_all(dto.tags),
            ingredients: map_all(dto.ingredients),
            steps,
            likes_count: dto.likes_count.unwrap_or_default(),
            liked: dto.liked.unwrap_or_default(),
            views_count: dto.views_count.unwrap_or_default(),
            calories: dto.calories,
            cooking_time_minutes: dto.cooking_time_minutes,
        }
    }
}

impl From<TagDto> for TagItem {
    fn from(dto: TagDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            color: dto.color,
        }
    }
}

impl From<IngredientDto> for IngredientItem {
    fn from(dto: IngredientDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<AuthResponseDto> for AuthSession {
    fn from(dto: AuthResponseDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            expires_in: dto.expires_in,
        }
    }
}

impl From<NewPost> for PostCreateDto {
    fn from(post: NewPost) -> Self {
        Self {
            post_type: post.post_type.as_str().to_string(),
            status: post.status.as_str().to_string(),
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            cover_url: post.cover_url,
            cooking_time_minutes: post.cooking_time_minutes,
            calories: post.calories,
            author_id: post.author_id,
            tag_ids: post.tag_ids,
            ingredients: post
                .ingredients
                .into_iter()
                .map(|line| PostIngredientRequestDto {
                    ingredient_id: line.ingredient_id,
                    quantity_value: Some(line.quantity),
                    unit: line.unit,
                })
                .collect(),
            steps: post
                .steps
                .into_iter()
                .map(|step| RecipeStepRequestDto {
                    order: step.order,
                    description: step.description,
                    image_url: step.image_url,
                })
                .collect(),
        }
    }
}

/// Map an optional wire list, `None` becoming empty.
pub(crate) fn map_all<D, M: From<D>>(items: Option<Vec<D>>) -> Vec<M> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(M::from)
        .collect()
}
