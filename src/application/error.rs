//! Error plumbing shared by the HTTP surface and the command-line entry point.

use std::{error::Error as StdError, io, iter};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::{content::ContentError, generate::GenerateError, office::OfficePageError},
    config::LoadError,
    infra::error::InfraError,
};

/// Diagnostic chain stashed in response extensions for the logging middleware.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let messages = iter::successors(Some(error), |&err| err.source())
            .map(ToString::to_string)
            .collect();
        Self { source, messages }
    }

    pub fn from_message(source: &'static str, message: impl Into<String>) -> Self {
        Self {
            source,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

/// A failed request: a terse public body plus the full report for the logs.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        Self {
            status,
            public_message,
            report: ErrorReport::from_error(source, error),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

/// Failure of a `vitrine` command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration could not be loaded: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("content source could not be prepared: {0}")]
    Content(#[from] ContentError),
    #[error(transparent)]
    Page(#[from] OfficePageError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] io::Error),
    #[error("block schema could not be encoded: {0}")]
    Schema(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn report_walks_the_source_chain() {
        let err = GenerateError::Page {
            filename: "perth".to_string(),
            source: OfficePageError::from(ContentError::not_found("perth.mdx")),
        };

        let report = ErrorReport::from_error("test", &err);
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].starts_with("failed to render office `perth`"));
        assert_eq!(report.messages[1], "content document `perth.mdx` not found");
    }

    #[tokio::test]
    async fn http_error_hides_detail_from_the_body() {
        let err = DomainError::not_found("office", "perth");
        let response =
            HttpError::from_error("test", StatusCode::NOT_FOUND, "Office not found", &err)
                .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .cloned()
            .expect("report attached");
        assert!(report.messages[0].contains("perth"));

        let body = response.into_body().collect().await.expect("body").to_bytes();
        assert_eq!(&body[..], b"Office not found");
    }

    #[test]
    fn serve_failures_keep_their_cause() {
        let err = AppError::Serve(io::Error::other("listener closed"));
        assert_eq!(err.to_string(), "server stopped unexpectedly: listener closed");
    }
}
