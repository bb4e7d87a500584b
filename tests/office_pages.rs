mod support;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use vitrine::{
    application::{content::ContentError, office::OfficePageError},
    infra::http::{HttpState, REQUEST_ID_HEADER, build_router},
};
use vitrine_content_types::{OfficeRecord, RichText};

fn router() -> axum::Router {
    build_router(HttpState {
        offices: Arc::new(support::service()),
        chrome: support::chrome(),
    })
}

async fn get(path: &str) -> (StatusCode, String) {
    let response = router()
        .oneshot(Request::get(path).body(Body::empty()).expect("request"))
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

#[tokio::test]
async fn static_paths_list_every_office_without_fallback() {
    let paths = support::service().static_paths().await.expect("paths");

    assert!(!paths.fallback);
    let mut names: Vec<_> = paths.filenames().collect();
    names.sort_unstable();
    assert_eq!(names, ["brisbane", "gold-coast"]);
}

#[tokio::test]
async fn parking_heading_only_renders_when_authored() {
    let service = support::service();

    let with_parking = service
        .page_html(support::chrome(), "gold-coast")
        .await
        .expect("gold coast renders");
    assert!(with_parking.contains("<h2>Parking</h2>"));
    assert!(with_parking.contains("Parking is available under the building."));

    let without_parking = service
        .page_html(support::chrome(), "brisbane")
        .await
        .expect("brisbane renders");
    assert!(!without_parking.contains("<h2>Parking</h2>"));
}

#[tokio::test]
async fn office_page_renders_cover_contact_and_testimonial() {
    let html = support::service()
        .page_html(support::chrome(), "gold-coast")
        .await
        .expect("renders");

    assert!(html.contains(r#"src="/images/gold-coast-cover.jpg""#));
    assert!(html.contains(r#"width="1320""#));
    assert!(html.contains(r#"height="485""#));
    assert!(html.contains(r#"fetchpriority="high""#));
    assert!(html.contains(r#"<h2 id="Directions">Acme Gold Coast Directions</h2>"#));
    assert!(html.contains(r#"href="tel:0755550100""#));
    assert!(html.contains("Priya Raman"));
    assert!(html.contains(r#"<link rel="canonical" href="https://acme.example/offices/gold-coast">"#));
    assert!(html.contains(r#"<span class="breadcrumbs__suffix">Office</span>"#));
    assert!(html.contains(r#"<a href="/offices/gold-coast" aria-current="page">"#));
    assert!(html.contains(r#"id="content-query""#));
}

#[tokio::test]
async fn photos_section_embeds_the_carousel_block() {
    let html = support::service()
        .page_html(support::chrome(), "gold-coast")
        .await
        .expect("renders");

    assert!(html.contains("<h2>Acme Gold Coast Photos</h2>"));
    assert!(html.contains("section--red"));
    assert!(html.contains("data-carousel"));
    assert!(html.contains("Selected: Reception 1"));
    assert!(html.contains(r#"href="https://book.example/room""#));
    assert!(html.contains(r#"target="_blank""#));
}

#[tokio::test]
async fn missing_testimonials_fail_the_page() {
    let mut snapshot = support::snapshot();
    snapshot.testimonials.clear();

    let err = support::service_for(snapshot)
        .page_html(support::chrome(), "brisbane")
        .await
        .expect_err("no testimonials");
    assert!(matches!(
        err,
        OfficePageError::Content(ContentError::EmptyTestimonials)
    ));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn blank_office_keeps_about_and_directions_only() {
    let mut snapshot = support::snapshot();
    snapshot
        .offices
        .insert(
            "empty.mdx".to_string(),
            OfficeRecord {
                parking: Some(RichText::default()),
                ..OfficeRecord::default()
            },
        );

    let html = support::service_for(snapshot)
        .page_html(support::chrome(), "empty")
        .await
        .expect("renders");

    assert!(html.contains("<h2>About Us</h2>"));
    assert!(html.contains(r#"id="Directions""#));
    assert!(html.contains(" Directions</h2>"));
    assert!(!html.contains("<h2>Parking</h2>"));
    assert!(!html.contains(r#"class="cover""#));
}

#[tokio::test]
async fn router_serves_known_offices() {
    let (status, body) = get("/offices/brisbane").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Brisbane</title>"));
}

#[tokio::test]
async fn router_returns_not_found_page_for_unknown_office() {
    let (status, body) = get("/offices/perth").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<h1>Office not found</h1>"));
}

#[tokio::test]
async fn router_returns_not_found_for_unknown_routes() {
    let (status, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_is_empty_success() {
    let (status, body) = get("/_health").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = router()
        .oneshot(Request::get("/_health").body(Body::empty()).expect("request"))
        .await
        .expect("router responds");

    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn public_assets_are_served() {
    let (status, body) = get("/static/public/carousel.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data-carousel"));
}
