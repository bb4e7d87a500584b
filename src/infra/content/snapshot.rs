use std::path::Path;

use async_trait::async_trait;
use vitrine_content_types::{
    AllTestimonialsQuery, ContentSnapshot, DocumentSys, OfficeContentData, OfficeContentQuery,
    OfficeEdge, OfficeNode, OfficeQueryVariables, OfficesConnection, OfficesConnectionData,
    OfficesConnectionQuery, TestimonialEntry, TestimonialsConnection, TestimonialsData,
    queries::OFFICE_CONTENT_QUERY,
};

use crate::application::content::{ContentClient, ContentError};
use crate::domain::offices::remove_extension;

/// Serves content from an exported JSON snapshot instead of the live API.
#[derive(Debug, Clone)]
pub struct SnapshotContentClient {
    snapshot: ContentSnapshot,
}

impl SnapshotContentClient {
    pub async fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot = serde_json::from_str(&raw).map_err(ContentError::decode)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: ContentSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl ContentClient for SnapshotContentClient {
    async fn office_content_query(
        &self,
        relative_path: &str,
    ) -> Result<OfficeContentQuery, ContentError> {
        let offices = self
            .snapshot
            .offices
            .get(relative_path)
            .cloned()
            .ok_or_else(|| ContentError::not_found(relative_path))?;

        Ok(OfficeContentQuery {
            data: OfficeContentData {
                offices,
                global: self.snapshot.global.clone(),
            },
            query: OFFICE_CONTENT_QUERY.to_string(),
            variables: OfficeQueryVariables {
                relative_path: relative_path.to_string(),
            },
        })
    }

    async fn all_testimonials_query(&self) -> Result<AllTestimonialsQuery, ContentError> {
        let testimonials = self
            .snapshot
            .testimonials
            .iter()
            .cloned()
            .map(|testimonial| TestimonialEntry { testimonial })
            .collect();

        Ok(AllTestimonialsQuery {
            data: TestimonialsData {
                testimonials_connection: TestimonialsConnection { testimonials },
            },
        })
    }

    async fn offices_connection(&self) -> Result<OfficesConnectionQuery, ContentError> {
        let edges = self
            .snapshot
            .offices
            .keys()
            .map(|relative_path| OfficeEdge {
                node: OfficeNode {
                    sys: DocumentSys {
                        filename: remove_extension(relative_path).to_string(),
                        relative_path: Some(relative_path.clone()),
                    },
                },
            })
            .collect();

        Ok(OfficesConnectionQuery {
            data: OfficesConnectionData {
                offices_connection: OfficesConnection { edges },
            },
        })
    }
}
