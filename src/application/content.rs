//! Content-source trait describing the headless CMS adapters.

use async_trait::async_trait;
use thiserror::Error;
use vitrine_content_types::{AllTestimonialsQuery, OfficeContentQuery, OfficesConnectionQuery};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Transport(String),
    #[error("content source responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("content query `{operation}` returned errors: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },
    #[error("content document `{relative_path}` not found")]
    NotFound { relative_path: String },
    #[error("malformed content response: {0}")]
    Decode(String),
    #[error("testimonial collection is empty")]
    EmptyTestimonials,
    #[error("content snapshot unreadable: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn not_found(relative_path: impl Into<String>) -> Self {
        Self::NotFound {
            relative_path: relative_path.into(),
        }
    }
}

/// Queries the site needs from the content API.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Fetch one office document by its path relative to the offices collection.
    async fn office_content_query(
        &self,
        relative_path: &str,
    ) -> Result<OfficeContentQuery, ContentError>;

    async fn all_testimonials_query(&self) -> Result<AllTestimonialsQuery, ContentError>;

    /// List every office document.
    async fn offices_connection(&self) -> Result<OfficesConnectionQuery, ContentError>;
}
