//! HTTP tests for `/apis/{apiId}` and its pages, plans and picture.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;

use common::*;

#[tokio::test]
async fn public_api_is_visible_to_anonymous_callers() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-public", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["id"], PUBLIC_API);
    assert_eq!(body["public"], true);
    assert_eq!(body["lifecycle_state"], "PUBLISHED");
    assert_eq!(body["_links"]["self"], "/apis/api-public");
    assert_eq!(body["_links"]["ratings"], "/apis/api-public/ratings");
    assert!(body.get("pages").is_none());
    assert!(body.get("plans").is_none());
}

#[tokio::test]
async fn private_api_is_reported_missing_to_strangers() {
    let app = TestApp::new().await;

    for token in [None, Some(OTHER_TOKEN)] {
        let response = app.send(Method::GET, "/apis/api-private", token, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error = read_error(response).await;
        assert_eq!(error["code"], "errors.api.notFound");
        assert_eq!(error["status"], "404");
        assert_eq!(error["parameters"]["api"], PRIVATE_API);
        assert!(error["message"].as_str().unwrap().contains("api-private"));
    }

    let response = app.send(Method::GET, "/apis/api-private", Some(OWNER_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unpublished_api_is_missing_even_for_its_owner() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-draft", Some(OWNER_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(Method::GET, "/apis/does-not-exist", Some(OWNER_TOKEN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn include_embeds_published_pages_and_plans() {
    let app = TestApp::new().await;

    let response =
        app.send(Method::GET, "/apis/api-public?include=pages&include=plans", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    let pages = body["pages"].as_array().expect("pages included");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["id"], "page-1");
    assert_eq!(pages[0]["type"], "SWAGGER");
    assert_eq!(pages[0]["_links"]["self"], "/apis/api-public/pages/page-1");
    assert_eq!(pages[0]["_links"]["content"], "/apis/api-public/pages/page-1/content");

    let plans = body["plans"].as_array().expect("plans included");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["id"], "plan-published");
}

#[tokio::test]
async fn pages_are_listed_with_pagination_metadata() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-public/pages?page=1&size=5", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["metadata"]["pagination"]["total"], 1);
    assert_eq!(body["links"]["self"], "/apis/api-public/pages?page=1&size=5");

    let response = app.send(Method::GET, "/apis/api-public/pages?page=0", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_error(response).await["code"], "errors.pagination.invalid");
}

#[tokio::test]
async fn page_detail_and_content() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-public/pages/page-1", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["name"], "page-1 title");

    let response = app.send(Method::GET, "/apis/api-public/pages/page-1/content", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(read_bytes(response).await, b"content of page-1");

    let response = app.send(Method::GET, "/apis/api-public/pages/page-hidden", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_error(response).await["code"], "errors.page.notFound");
}

#[tokio::test]
async fn plans_list_only_published_plans() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-public/plans", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    let ids: Vec<&str> =
        body["data"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["plan-published"]);
}

#[tokio::test]
async fn picture_is_served_with_cache_validators() {
    let app = TestApp::new().await;

    let response = app.send(Method::GET, "/apis/api-public/picture", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[header::ETAG], "\"1705314600000\"");
    assert_eq!(response.headers()[header::LAST_MODIFIED], "Mon, 15 Jan 2024 10:30:00 GMT");
    assert!(response.headers().contains_key(header::CACHE_CONTROL));
    assert!(!read_bytes(response).await.is_empty());

    let request = Request::builder()
        .uri("/apis/api-public/picture")
        .header(header::IF_NONE_MATCH, "\"1705314600000\"")
        .body(Body::empty())
        .unwrap();
    let response = app.send_raw(request).await;
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert!(read_bytes(response).await.is_empty());

    let request = Request::builder()
        .uri("/apis/api-public/picture")
        .header(header::IF_MODIFIED_SINCE, "Mon, 15 Jan 2024 10:30:00 GMT")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send_raw(request).await.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn resources_are_mounted_under_the_base_path() {
    let app = TestApp::with_base_path(BASE_PATH).await;

    let response = app
        .send(Method::GET, "/portal/environments/DEFAULT/apis/api-public", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["_links"]["self"], "/portal/environments/DEFAULT/apis/api-public");

    let response = app.send(Method::GET, "/apis/api-public", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
