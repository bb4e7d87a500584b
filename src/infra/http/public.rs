use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use metrics::counter;

use crate::{
    application::{
        error::{ErrorReport, HttpError},
        office::OfficePageService,
    },
    infra::telemetry::HTTP_OFFICE_PAGES_TOTAL,
    presentation::views::{LayoutChrome, render_not_found_response},
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub offices: Arc<OfficePageService>,
    pub chrome: LayoutChrome,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/offices/{filename}", get(office_page))
        .route("/_health", get(health))
        .route(
            "/static/public/{*path}",
            get(crate::infra::assets::serve_public),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn office_page(State(state): State<HttpState>, Path(filename): Path<String>) -> Response {
    match state.offices.page_html(state.chrome.clone(), &filename).await {
        Ok(html) => {
            counter!(HTTP_OFFICE_PAGES_TOTAL).increment(1);
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(err) if err.is_not_found() => {
            let mut response = render_not_found_response(state.chrome);
            ErrorReport::from_error("infra::http::public::office_page", &err)
                .attach(&mut response);
            response
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome)
}
