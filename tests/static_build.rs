mod support;

use std::sync::Arc;

use vitrine::application::generate::{GenerateError, SiteGenerator};
use vitrine_content_types::OfficeRecord;

fn generator(snapshot: vitrine_content_types::ContentSnapshot) -> SiteGenerator {
    SiteGenerator::new(Arc::new(support::service_for(snapshot)), support::chrome())
}

#[tokio::test]
async fn writes_every_office_and_the_public_assets() {
    let out = tempfile::tempdir().expect("tempdir");

    let report = generator(support::snapshot())
        .generate(out.path(), 4)
        .await
        .expect("generates");

    assert_eq!(report.pages, 2);
    assert!(report.assets >= 2);
    assert_eq!(report.out_dir, out.path());

    let gold_coast = std::fs::read_to_string(out.path().join("offices/gold-coast/index.html"))
        .expect("gold coast page written");
    assert!(gold_coast.contains("<h2>Parking</h2>"));
    assert!(out.path().join("offices/brisbane/index.html").is_file());
    assert!(out.path().join("static/public/carousel.js").is_file());
    assert!(out.path().join("static/public/site.css").is_file());
}

#[tokio::test]
async fn first_page_failure_aborts_the_build() {
    let out = tempfile::tempdir().expect("tempdir");
    let mut snapshot = support::snapshot();
    snapshot.testimonials.clear();

    let err = generator(snapshot)
        .generate(out.path(), 1)
        .await
        .expect_err("pages need a testimonial");

    assert!(matches!(err, GenerateError::Page { .. }));
    assert!(!out.path().join("static/public/carousel.js").exists());
}

#[tokio::test]
async fn filenames_that_escape_the_output_directory_are_rejected() {
    let out = tempfile::tempdir().expect("tempdir");
    let mut snapshot = support::snapshot();
    snapshot
        .offices
        .insert("nested/escape.mdx".to_string(), OfficeRecord::default());

    let err = generator(snapshot)
        .generate(out.path(), 2)
        .await
        .expect_err("traversal rejected");

    assert!(matches!(err, GenerateError::InvalidFilename(name) if name == "nested/escape"));
    assert!(!out.path().join("offices").exists());
}
