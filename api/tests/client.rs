//! Integration tests for `BlogClient` against a mock HTTP server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use culinary_blog_api::dto::{LoginRequestDto, PostCreateDto};
use culinary_blog_api::{ApiConfig, ApiError, BlogClient, InMemoryTokenStorage, UploadKind};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, tokens: Arc<InMemoryTokenStorage>) -> BlogClient {
    let config = ApiConfig::new(format!("{}/api", server.uri()));
    BlogClient::new(config, tokens).unwrap()
}

#[tokio::test]
async fn test_feed_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "postType": null, "likesCount": 5},
            {"id": 2, "postType": "article", "title": "Knives"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let posts = client.published_posts().await.unwrap().unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].likes_count, Some(5));
    assert_eq!(posts[1].title.as_deref(), Some("Knives"));
}

#[tokio::test]
async fn test_bearer_header_sent_when_token_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::with_token("secret")));
    let posts = client.published_posts().await.unwrap();

    assert_eq!(posts, Some(vec![]));
}

#[tokio::test]
async fn test_no_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    client.published_posts().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_auth_requests_never_carry_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api/auth/login"))
        .and(body_json(json!({"username": "chef", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::with_token("stale")));
    let response = client
        .login(&LoginRequestDto {
            username: "chef".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.access_token, "fresh");
    assert_eq!(response.refresh_token, None);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_post_passes_current_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/7"))
        .and(query_param("currentUserId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "steps": [{"order": 2, "description": "b"}, {"order": 1, "description": "a"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let post = client.post(7, Some(3)).await.unwrap().unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.steps.unwrap().len(), 2);
}

#[tokio::test]
async fn test_lookup_paging_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "16"))
        .and(query_param("search", "soup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "name": "soup", "color": "#ff0000"}],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ingredients"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": null})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));

    let tags = client.tags(Some("soup")).await.unwrap().unwrap();
    assert_eq!(tags.results.unwrap()[0].name, "soup");

    let ingredients = client.ingredients(None).await.unwrap().unwrap();
    assert_eq!(ingredients.results, None);
}

#[tokio::test]
async fn test_non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let error = client.post(9, None).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Server {
            status: 404,
            message: "not found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_empty_body_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/5"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let post = client.post(5, None).await.unwrap();

    assert!(post.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "no id"}])))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let error = client.published_posts().await.unwrap_err();

    assert!(matches!(error, ApiError::ResponseParseFailed(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_request_failure() {
    let server = MockServer::start().await;
    let config = ApiConfig::new(format!("{}/api", server.uri()));
    drop(server);

    let client = BlogClient::new(config, Arc::new(InMemoryTokenStorage::new())).unwrap();
    let error = client.published_posts().await.unwrap_err();

    assert!(matches!(error, ApiError::RequestFailed(_)));
}

#[tokio::test]
async fn test_create_post_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .and(body_json(json!({
            "postType": "recipe",
            "status": "draft",
            "title": "Borscht",
            "excerpt": "Beet soup",
            "content": "Cook it",
            "authorId": 1,
            "tagIds": [2],
            "ingredients": [{"ingredientId": 4, "quantityValue": 0.5, "unit": "kg"}],
            "steps": [{"order": 1, "description": "Chop"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11, "title": "Borscht"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = PostCreateDto {
        post_type: "recipe".to_string(),
        status: "draft".to_string(),
        title: "Borscht".to_string(),
        excerpt: "Beet soup".to_string(),
        content: "Cook it".to_string(),
        cover_url: None,
        cooking_time_minutes: None,
        calories: None,
        author_id: 1,
        tag_ids: vec![2],
        ingredients: vec![culinary_blog_api::dto::PostIngredientRequestDto {
            ingredient_id: 4,
            quantity_value: Some(0.5),
            unit: Some("kg".to_string()),
        }],
        steps: vec![culinary_blog_api::dto::RecipeStepRequestDto {
            order: 1,
            description: "Chop".to_string(),
            image_url: None,
        }],
    };

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let created = client.create_post(&request).await.unwrap().unwrap();

    assert_eq!(created.id, 11);
}

#[tokio::test]
async fn test_upload_image_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/uploads/step"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "http://cdn.test/step.png"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let uploaded = client
        .upload_image(UploadKind::Step, "step.png", vec![1, 2, 3], "image/png")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(uploaded.url, "http://cdn.test/step.png");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"step.png\""));
}

#[tokio::test]
async fn test_invalid_mime_type_rejected_before_sending() {
    let server = MockServer::start().await;

    let client = client_for(&server, Arc::new(InMemoryTokenStorage::new()));
    let error = client
        .upload_image(UploadKind::Cover, "cover.png", vec![1], "not a mime")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
