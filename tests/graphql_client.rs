use std::time::Duration;

use httpmock::MockServer;
use serde_json::json;
use url::Url;
use vitrine::{
    application::content::{ContentClient, ContentError},
    infra::content::GraphqlContentClient,
};

fn client(server: &MockServer, token: Option<&str>) -> GraphqlContentClient {
    let endpoint = Url::parse(&server.url("/graphql")).expect("mock url");
    GraphqlContentClient::new(
        endpoint,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("client builds")
}

#[tokio::test]
async fn office_query_sends_api_key_and_relative_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/graphql")
            .header("x-api-key", "secret")
            .json_body_includes(r#"{"variables":{"relativePath":"brisbane.mdx"}}"#);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "offices": {
                        "seo": { "title": "Brisbane" },
                        "addressLocality": "Brisbane",
                        "phone": "(07) 5555 0200"
                    },
                    "global": { "breadcrumbSuffix": "Office" }
                }
            }));
    });

    let result = client(&server, Some("secret"))
        .office_content_query("brisbane.mdx")
        .await
        .expect("office decodes");

    mock.assert();
    assert_eq!(result.data.offices.seo.title, "Brisbane");
    assert_eq!(
        result.data.global.breadcrumb_suffix.as_deref(),
        Some("Office")
    );
    assert_eq!(result.variables.relative_path, "brisbane.mdx");
    assert!(result.query.contains("officeContentQuery"));
}

#[tokio::test]
async fn null_office_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "data": { "offices": null } }));
    });

    let err = client(&server, None)
        .office_content_query("perth.mdx")
        .await
        .expect_err("missing office");

    assert!(matches!(err, ContentError::NotFound { relative_path } if relative_path == "perth.mdx"));
}

#[tokio::test]
async fn graphql_errors_are_joined() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": null,
                "errors": [{ "message": "first" }, { "message": "second" }]
            }));
    });

    let err = client(&server, None)
        .all_testimonials_query()
        .await
        .expect_err("query errors");

    match err {
        ContentError::Query { operation, message } => {
            assert_eq!(operation, "allTestimonialsQuery");
            assert_eq!(message, "first; second");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql");
        then.status(401).body("invalid token");
    });

    let err = client(&server, Some("wrong"))
        .offices_connection()
        .await
        .expect_err("unauthorised");

    match err {
        ContentError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid token");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn offices_connection_lists_filenames() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/graphql");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "officesConnection": {
                        "edges": [
                            { "node": { "_sys": { "filename": "brisbane", "relativePath": "brisbane.mdx" } } },
                            { "node": { "_sys": { "filename": "gold-coast", "relativePath": "gold-coast.mdx" } } }
                        ]
                    }
                }
            }));
    });

    let connection = client(&server, None)
        .offices_connection()
        .await
        .expect("connection decodes");

    let names: Vec<_> = connection
        .data
        .offices_connection
        .edges
        .iter()
        .map(|edge| edge.node.sys.filename.as_str())
        .collect();
    assert_eq!(names, ["brisbane", "gold-coast"]);
}
