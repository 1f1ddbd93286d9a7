#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::cookie::Jar;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkwell_api::{
    ApiClient, CategoryPatch, Endpoints, Error, Method, NewCategory, NewPost, Payload, PostPatch,
    PostQuery, QueryParams, ResourceKind, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    client: ApiClient,
    jar: Arc<Jar>,
    origin: Url,
}

async fn setup() -> Harness {
    let server = MockServer::start().await;
    let origin = Url::parse(&server.uri()).unwrap();
    let jar = Arc::new(Jar::default());
    let transport = TransportConfig {
        cookie_jar: Some(Arc::clone(&jar)),
        ..TransportConfig::default()
    };
    let client = ApiClient::new(Endpoints::from_origin(&origin).unwrap(), &transport).unwrap();
    Harness {
        server,
        client,
        jar,
        origin,
    }
}

fn api_path(suffix: &str) -> String {
    format!("/api/v1/{suffix}")
}

fn category_json(id: i64, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "description": "", "posts_count": 0 })
}

fn post_json(id: i64, title: &str, category_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "Body",
        "category": category_json(category_id, "News"),
        "author": { "id": 1, "username": "admin", "first_name": "", "last_name": "", "email": "" },
        "published": false,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z"
    })
}

// ── List / get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_categories_bare_array() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("categories/")))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            category_json(1, "News"),
            category_json(2, "Guides")
        ])))
        .mount(&h.server)
        .await;

    let list = h.client.categories().list(&QueryParams::new()).await.unwrap();
    let names: Vec<String> = list.into_items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["News".to_owned(), "Guides".to_owned()]);
}

#[tokio::test]
async fn test_list_posts_paginated_with_filters() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("posts/")))
        .and(query_param("category", "2"))
        .and(query_param("published", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [post_json(9, "Hello", 2)]
        })))
        .mount(&h.server)
        .await;

    let list = h
        .client
        .posts()
        .list(&PostQuery::default().in_category(2).published(true))
        .await
        .unwrap();

    let posts = list.into_items();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello");
    assert_eq!(posts[0].category.id, 2);
}

#[tokio::test]
async fn test_get_category() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("categories/3/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(3, "Rust")))
        .mount(&h.server)
        .await;

    let category = h.client.categories().get(3).await.unwrap();
    assert_eq!(category.id, 3);
    assert_eq!(category.name, "Rust");
}

#[tokio::test]
async fn test_generic_list_by_kind() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("users/")))
        .and(query_param("search", "adm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "username": "admin" }
        ])))
        .mount(&h.server)
        .await;

    let params = QueryParams::new().with("search", "adm");
    let users = h
        .client
        .list::<inkwell_api::User>(ResourceKind::Users, &params)
        .await
        .unwrap()
        .into_items();
    assert_eq!(users[0].username, "admin");
}

#[tokio::test]
async fn test_extension_endpoints() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("posts/my_posts/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(4, "Mine", 1)])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("users/me/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "admin", "first_name": "Ada", "last_name": "L", "email": "a@x.io"
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("categories/1/posts/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(4, "Mine", 1)])))
        .mount(&h.server)
        .await;

    let mine = h.client.posts().my_items().await.unwrap().into_items();
    assert_eq!(mine[0].title, "Mine");

    let me = h.client.users().current_user().await.unwrap();
    assert_eq!(me.display_name(), "Ada L");

    let in_category = h.client.categories().posts(1).await.unwrap().into_items();
    assert_eq!(in_category.len(), 1);
}

// ── Mutations & CSRF ────────────────────────────────────────────────

#[tokio::test]
async fn test_create_category_sends_csrf_header() {
    let h = setup().await;
    h.jar.add_cookie_str("csrftoken=tok123; Path=/", &h.origin);

    Mock::given(method("POST"))
        .and(path(api_path("categories/")))
        .and(header("X-CSRFToken", "tok123"))
        .and(body_json(json!({ "name": "X", "description": "" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(category_json(5, "X")))
        .mount(&h.server)
        .await;

    let created = h
        .client
        .categories()
        .create(&NewCategory::new("X"))
        .await
        .unwrap();
    assert_eq!(created.id, 5);
}

#[tokio::test]
async fn test_anonymous_get_omits_csrf_header() {
    let h = setup().await;
    h.jar.add_cookie_str("csrftoken=tok123; Path=/", &h.origin);

    Mock::given(method("GET"))
        .and(path(api_path("categories/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.client.categories().list(&QueryParams::new()).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-csrftoken").is_none());
}

#[tokio::test]
async fn test_authenticated_get_sends_csrf_header() {
    let h = setup().await;
    h.jar.add_cookie_str("csrftoken=tok123; Path=/", &h.origin);
    h.jar.add_cookie_str("sessionid=sess1; Path=/", &h.origin);

    Mock::given(method("GET"))
        .and(path(api_path("posts/my_posts/")))
        .and(header("X-CSRFToken", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, "Mine", 1)])))
        .expect(1)
        .mount(&h.server)
        .await;

    let mine = h.client.posts().my_items().await.unwrap().into_items();
    assert_eq!(mine.len(), 1);

    let requests = h.server.received_requests().await.unwrap();
    let cookies = requests[0].headers.get("cookie").unwrap().to_str().unwrap();
    assert!(cookies.contains("sessionid=sess1"));
}

#[tokio::test]
async fn test_unsafe_request_without_cookie_omits_header() {
    let h = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("posts/8/")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    h.client.posts().delete(8).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-csrftoken").is_none());
}

#[tokio::test]
async fn test_update_and_partial_update() {
    let h = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("posts/2/")))
        .and(body_json(json!({
            "title": "T", "content": "C", "category_id": 1, "published": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(2, "T", 1)))
        .mount(&h.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api_path("categories/3/")))
        .and(body_json(json!({ "name": "Y" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(3, "Y")))
        .mount(&h.server)
        .await;

    let post = h
        .client
        .posts()
        .update(
            2,
            &NewPost {
                title: "T".into(),
                content: "C".into(),
                category_id: 1,
                published: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(post.title, "T");

    let category = h
        .client
        .categories()
        .partial_update(
            3,
            &CategoryPatch {
                name: Some("Y".into()),
                ..CategoryPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(category.name, "Y");
}

#[tokio::test]
async fn test_patch_post_sends_only_set_fields() {
    let h = setup().await;

    Mock::given(method("PATCH"))
        .and(path(api_path("posts/6/")))
        .and(body_json(json!({ "published": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(6, "P", 1)))
        .mount(&h.server)
        .await;

    let patch = PostPatch {
        published: Some(true),
        ..PostPatch::default()
    };
    h.client.posts().partial_update(6, &patch).await.unwrap();
}

// ── Response normalization ──────────────────────────────────────────

#[tokio::test]
async fn test_error_detail_becomes_message() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("posts/my_posts/")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Authentication required" })),
        )
        .mount(&h.server)
        .await;

    let result = h.client.posts().my_items().await;

    match result {
        Err(Error::RequestFailed {
            status,
            ref message,
        }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Authentication required");
        }
        other => panic!("expected RequestFailed error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_raw_text_becomes_message() {
    let h = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&h.server)
        .await;

    let err = h.client.categories().get(1).await.unwrap_err();
    assert_eq!(err.message(), "Internal Server Error");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_error_without_body_uses_status_line() {
    let h = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.server)
        .await;

    let err = h.client.posts().get(99).await.unwrap_err();
    assert_eq!(err.message(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_non_json_success_returned_as_text() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("health/")))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&h.server)
        .await;

    let payload = h
        .client
        .send_raw(Method::GET, "health/", &QueryParams::new(), None)
        .await
        .unwrap();

    match payload {
        Payload::Text { body, .. } => assert_eq!(body, "ok"),
        Payload::Json(other) => panic!("expected text payload, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_typed_call_rejects_text_payload() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("categories/1/")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&h.server)
        .await;

    let err = h.client.categories().get(1).await.unwrap_err();
    assert!(
        matches!(err, Error::UnexpectedPayload { .. }),
        "expected UnexpectedPayload, got: {err:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let origin = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let client = ApiClient::new(
        Endpoints::from_origin(&origin).unwrap(),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.users().current_user().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert!(!err.message().is_empty());
}
