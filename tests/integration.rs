use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use madlibs_server::{
    ai::{MockChatClient, MockImageGenerationClient},
    api,
    app::{AppServices, MadLibsApp},
    images::ImageStore,
    store::InMemorySessionStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn build_router(
    chat: MockChatClient,
    image_gen: MockImageGenerationClient,
) -> (TempDir, ImageStore, Router) {
    let dir = tempfile::tempdir().unwrap();
    let image_dir = dir.path().join("generated_images");
    let app = MadLibsApp::with_services(
        AppServices {
            chat: Box::new(chat),
            image_gen: Box::new(image_gen),
            store: Box::new(InMemorySessionStore::new()),
        },
        ImageStore::new(&image_dir).unwrap(),
        true,
    );
    let probe = ImageStore::new(&image_dir).unwrap();
    (dir, probe, api::router(Arc::new(app)))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, body.to_vec())
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(router, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_full_flow_template_to_image() {
    let chat = MockChatClient::new()
        .with_template_response("The {adjective} {noun} ran.", &["adjective", "noun"])
        .with_comic_response("A very blue dog sprinting", "1. Dog 2. Run 3. Wind 4. Nap");
    let image_gen = MockImageGenerationClient::new();
    let (_dir, images, router) = build_router(chat, image_gen.clone());

    let (status, template) =
        post_json(&router, "/api/generate-template", json!({ "topic": "dogs" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(template["template"], "The {adjective} {noun} ran.");
    assert_eq!(template["word_types"], json!(["adjective", "noun"]));
    assert_eq!(template["topic"], "dogs");
    let template_id = template["template_id"].as_str().unwrap().to_string();

    let (status, madlib) = post_json(
        &router,
        "/api/submit-madlib",
        json!({
            "template_id": template_id,
            "user_inputs": { "noun": "dog", "adjective": "blue" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(madlib["completed_text"], "The blue dog ran.");
    assert_eq!(madlib["comic_prompt"], "A very blue dog sprinting");
    assert_eq!(madlib["panel_suggestions"], "1. Dog 2. Run 3. Wind 4. Nap");
    let madlib_id = madlib["madlib_id"].as_str().unwrap().to_string();

    let (status, image) =
        post_json(&router, "/api/generate-image", json!({ "madlib_id": madlib_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["madlib_id"], madlib_id.as_str());
    assert_eq!(image["status"], "success");
    let image_url = image["image_url"].as_str().unwrap().to_string();
    assert_eq!(image_url, format!("/api/images/{}.png", madlib_id));
    assert_eq!(
        image_gen.get_prompts(),
        vec!["A very blue dog sprinting".to_string()]
    );

    let (status, bytes) = get(&router, &image_url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    assert!(images.path_for(&madlib_id.parse().unwrap()).exists());

    let (status, health) = get_json(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        health,
        json!({
            "status": "healthy",
            "api_key_configured": true,
            "templates_count": 1,
            "madlibs_count": 1
        })
    );
}

#[tokio::test]
async fn test_root_reports_liveness() {
    let (_dir, _images, router) =
        build_router(MockChatClient::new(), MockImageGenerationClient::new());

    let (status, body) = get_json(&router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "MadLibs API is Running!");
}

#[tokio::test]
async fn test_generate_template_mismatch_is_500_and_not_stored() {
    let chat = MockChatClient::new().with_template_response("{noun} loves {noun}", &["noun"]);
    let (_dir, _images, router) = build_router(chat, MockImageGenerationClient::new());

    let (status, body) =
        post_json(&router, "/api/generate-template", json!({ "topic": "love" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Mismatch"));

    let (_, health) = get_json(&router, "/api/health").await;
    assert_eq!(health["templates_count"], 0);
}

#[tokio::test]
async fn test_generate_template_backend_failure_is_500() {
    let chat = MockChatClient::new().with_failure("quota exceeded");
    let (_dir, _images, router) = build_router(chat, MockImageGenerationClient::new());

    let (status, body) =
        post_json(&router, "/api/generate-template", json!({ "topic": "space" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_submit_unknown_template_is_404() {
    let chat = MockChatClient::new();
    let (_dir, _images, router) = build_router(chat.clone(), MockImageGenerationClient::new());

    let (status, body) = post_json(
        &router,
        "/api/submit-madlib",
        json!({
            "template_id": "00000000-0000-4000-8000-000000000000",
            "user_inputs": { "noun": "dog" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Template not found"));
    assert_eq!(chat.get_comic_call_count(), 0);

    let (_, health) = get_json(&router, "/api/health").await;
    assert_eq!(health["madlibs_count"], 0);
}

#[tokio::test]
async fn test_generate_image_unknown_madlib_is_404() {
    let image_gen = MockImageGenerationClient::new();
    let (_dir, _images, router) = build_router(MockChatClient::new(), image_gen.clone());

    let (status, body) = post_json(
        &router,
        "/api/generate-image",
        json!({ "madlib_id": "not-a-real-id" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("MadLib not found"));
    assert_eq!(image_gen.get_call_count(), 0);
}

#[tokio::test]
async fn test_text_only_image_response_is_500_and_writes_no_file() {
    let (_dir, images, router) = build_router(
        MockChatClient::new(),
        MockImageGenerationClient::new().with_text_only_responses(),
    );

    let (_, template) =
        post_json(&router, "/api/generate-template", json!({ "topic": "cats" })).await;
    let (_, madlib) = post_json(
        &router,
        "/api/submit-madlib",
        json!({ "template_id": template["template_id"], "user_inputs": {} }),
    )
    .await;
    let madlib_id = madlib["madlib_id"].as_str().unwrap().to_string();

    let (status, body) =
        post_json(&router, "/api/generate-image", json!({ "madlib_id": madlib_id })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "No image generated");
    assert!(!images.exists(&madlib_id.parse().unwrap()));
}

#[tokio::test]
async fn test_missing_image_is_404() {
    let (_dir, _images, router) =
        build_router(MockChatClient::new(), MockImageGenerationClient::new());

    let (status, _) = get(&router, "/api/images/nothing-here.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, "/api/images/..%2Fsecret.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
