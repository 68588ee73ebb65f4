use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::config::Config;
use crate::i18n::Language;
use crate::tests::{example_platform, spawn_image_host, EXAMPLE_IMAGE_BASE};
use crate::web::{self, SharedState};

fn app() -> Router {
    app_with(EXAMPLE_IMAGE_BASE, "youtube-thumbnail")
}

fn app_with(image_base: &str, download_prefix: &str) -> Router {
    let platform = example_platform();
    let config = Config {
        image_base: image_base.to_string(),
        canonical_hosts: platform.canonical_hosts,
        short_hosts: platform.short_hosts,
        default_language: "fr".to_string(),
        download_prefix: download_prefix.to_string(),
        ..Default::default()
    };
    web::router(Arc::new(SharedState::new(config)))
}

fn download_uri(url: &str, filename: &str) -> String {
    let url: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("/api/download?url={url}&filename={filename}")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_links(url: &str) -> Request<Body> {
    Request::post("/api/links")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "url": url }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_links_api() {
    let resp = app()
        .oneshot(post_links("https://example.com/watch?v=abc123XYZ_-"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(value["video_id"], "abc123XYZ_-");
    assert_eq!(
        value["links"][0]["url"],
        "https://img.example.com/vi/abc123XYZ_-/maxresdefault.jpg"
    );
    assert_eq!(value["links"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_links_api_errors() {
    let resp = app().oneshot(post_links("not a url")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let value: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(value["error"], "input is not a recognizable video url");

    let resp = app()
        .oneshot(post_links("https://example.com/watch?v=nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let value: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(value["error"], "could not derive a video id from the url");
}

#[tokio::test]
async fn test_index_redirects_to_default_language() {
    let resp = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/fr");
}

#[tokio::test]
async fn test_page_without_input() {
    let resp = app()
        .oneshot(Request::get("/de").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains(r#"<html lang="de">"#));
    assert!(html.contains(Language::De.labels().form.button));
    assert!(!html.contains(r#"class="results""#));
    assert!(!html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_page_with_results() {
    let uri = "/en?url=https%3A%2F%2Fs.example%2Fabc123XYZ_-";
    let resp = app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("Video ID: abc123XYZ_-"));
    assert!(html.contains("https://img.example.com/vi/abc123XYZ_-/maxresdefault.jpg"));
    assert!(html.contains("https://img.example.com/vi/abc123XYZ_-/sddefault.jpg"));
    assert!(html.contains("/placeholder.svg"));
    assert!(html.contains("/api/download?url=https%3A%2F%2Fimg.example.com%2Fvi%2Fabc123XYZ_-%2Fhqdefault.jpg"));
    assert!(html.contains("filename=youtube-thumbnail-cover-1280x720.jpg"));
    assert!(html.contains("filename=youtube-thumbnail-profile-120x120.jpg"));

    // 7 gallery links, 4 by size, profile and cover
    let downloads = html.matches("/api/download?").count();
    assert_eq!(downloads, 13);
    assert_eq!(html.matches("\" download>").count(), downloads);
}

#[tokio::test]
async fn test_page_uses_download_prefix() {
    let uri = "/en?url=https%3A%2F%2Fs.example%2Fabc123XYZ_-";
    let resp = app_with(EXAMPLE_IMAGE_BASE, "clip")
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = body_string(resp).await;
    assert!(html.contains("filename=clip-maxres.jpg"));
    assert!(html.contains("filename=clip-profile-120x120.jpg"));
    assert!(html.contains("filename=clip-cover-1280x720.jpg"));
    assert!(!html.contains("youtube-thumbnail"));
}

#[tokio::test]
async fn test_page_has_processing_label() {
    let resp = app()
        .oneshot(Request::get("/fr").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = body_string(resp).await;
    let processing = Language::Fr.labels().form.processing;
    assert!(html.contains(&format!(r#"data-processing="{processing}""#)));
}

#[tokio::test]
async fn test_page_with_localized_errors() {
    let resp = app()
        .oneshot(Request::get("/es?url=not-a-url").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_string(resp).await;
    assert!(html.contains(Language::Es.labels().errors.invalid_url));

    let resp = app()
        .oneshot(
            Request::get("/es?url=https%3A%2F%2Fexample.com%2Fwatch")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_string(resp).await;
    assert!(html.contains(Language::Es.labels().errors.extract_id));
}

#[tokio::test]
async fn test_page_escapes_input() {
    let resp = app()
        .oneshot(
            Request::get("/en?url=%3Cscript%3E")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_string(resp).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_unknown_language_falls_back_to_english() {
    let resp = app()
        .oneshot(Request::get("/xx").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_string(resp).await;
    assert!(html.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn test_languages_api() {
    let resp = app()
        .oneshot(Request::get("/api/languages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    let codes: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, ["en", "es", "fr", "de", "pt", "ja"]);
}

#[tokio::test]
async fn test_placeholder() {
    let resp = app()
        .oneshot(Request::get("/placeholder.svg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_outside_image_host_is_forbidden() {
    let resp = app()
        .oneshot(
            Request::get("/api/download?url=https%3A%2F%2Fevil.example.com%2Fx.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_is_served_as_attachment() {
    let base = spawn_image_host();
    let url = format!("{base}/abc123XYZ_-/maxresdefault.jpg");

    let resp = app_with(&base, "youtube-thumbnail")
        .oneshot(
            Request::get(download_uri(&url, "youtube-thumbnail-maxres.jpg"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        r#"attachment; filename="youtube-thumbnail-maxres.jpg""#
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(infer::get(&bytes).unwrap().mime_type(), "image/png");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_missing_image_is_bad_gateway() {
    let base = spawn_image_host();
    let url = format!("{base}/abc123XYZ_-/sddefault.jpg");

    let resp = app_with(&base, "youtube-thumbnail")
        .oneshot(
            Request::get(download_uri(&url, "x.jpg"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let value: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(value["error"], "image host answered 404 Not Found");
}
