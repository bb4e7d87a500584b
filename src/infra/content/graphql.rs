use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;
use vitrine_content_types::{
    AllTestimonialsQuery, GlobalSettings, OfficeContentData, OfficeContentQuery, OfficeRecord,
    OfficeQueryVariables, OfficesConnectionData, OfficesConnectionQuery, TestimonialsData,
    queries::{ALL_TESTIMONIALS_QUERY, OFFICE_CONTENT_QUERY, OFFICES_CONNECTION_QUERY},
};

use crate::application::content::{ContentClient, ContentError};

pub const API_KEY_HEADER: &str = "X-API-KEY";
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

/// Posts GraphQL documents to the content API.
#[derive(Clone)]
pub struct GraphqlContentClient {
    http: Client,
    endpoint: Url,
    token: Option<String>,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// `offices` is null when no document matches the requested path.
#[derive(Deserialize)]
struct OfficeLookup {
    offices: Option<OfficeRecord>,
    #[serde(default)]
    global: Option<GlobalSettings>,
}

impl GraphqlContentClient {
    pub fn new(
        endpoint: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ContentError::transport)?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, ContentError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = self.token.as_deref() {
            request = request.header(API_KEY_HEADER, token);
        }

        debug!(
            target = "vitrine::content::graphql",
            operation,
            endpoint = %self.endpoint,
            "issuing content query"
        );

        let response = request.send().await.map_err(ContentError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                status: status.as_u16(),
                message: truncate(body, MAX_ERROR_BODY_BYTES),
            });
        }

        let body: GraphqlResponse<T> = response.json().await.map_err(ContentError::decode)?;
        if !body.errors.is_empty() {
            let message = body
                .errors
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ContentError::Query { operation, message });
        }

        body.data
            .ok_or_else(|| ContentError::decode(format!("`{operation}` returned no data")))
    }
}

#[async_trait]
impl ContentClient for GraphqlContentClient {
    async fn office_content_query(
        &self,
        relative_path: &str,
    ) -> Result<OfficeContentQuery, ContentError> {
        let variables = OfficeQueryVariables {
            relative_path: relative_path.to_string(),
        };
        let lookup: OfficeLookup = self
            .execute(
                "officeContentQuery",
                OFFICE_CONTENT_QUERY,
                json!({ "relativePath": relative_path }),
            )
            .await?;
        let offices = lookup
            .offices
            .ok_or_else(|| ContentError::not_found(relative_path))?;

        Ok(OfficeContentQuery {
            data: OfficeContentData {
                offices,
                global: lookup.global.unwrap_or_default(),
            },
            query: OFFICE_CONTENT_QUERY.to_string(),
            variables,
        })
    }

    async fn all_testimonials_query(&self) -> Result<AllTestimonialsQuery, ContentError> {
        let data: TestimonialsData = self
            .execute("allTestimonialsQuery", ALL_TESTIMONIALS_QUERY, json!({}))
            .await?;
        Ok(AllTestimonialsQuery { data })
    }

    async fn offices_connection(&self) -> Result<OfficesConnectionQuery, ContentError> {
        let data: OfficesConnectionData = self
            .execute("officesConnection", OFFICES_CONNECTION_QUERY, json!({}))
            .await?;
        Ok(OfficesConnectionQuery { data })
    }
}

fn truncate(mut body: String, limit: usize) -> String {
    if body.len() > limit {
        let mut end = limit;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
