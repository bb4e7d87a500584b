//! Query documents and response envelopes for the content API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::offices::{GlobalSettings, OfficeRecord, Testimonial};

/// Fetches one office document plus the global settings used by page chrome.
pub const OFFICE_CONTENT_QUERY: &str = r#"query officeContentQuery($relativePath: String!) {
  offices(relativePath: $relativePath) {
    seo { title description canonical }
    coverImg
    addressLocality
    phone
    streetAddress
    suburb
    addressRegion
    postalCode
    addressCountry
    sideImg
    sidebarSecondaryPlace { name url }
    map
    aboutUs
    directions
    parking
    publicTransport
    team
    photos
    _body
  }
  global(relativePath: "index.json") {
    breadcrumbSuffix
  }
}"#;

pub const ALL_TESTIMONIALS_QUERY: &str = r#"query allTestimonialsQuery {
  testimonialsConnection {
    Testimonials {
      Testimonial { name company avatar body }
    }
  }
}"#;

pub const OFFICES_CONNECTION_QUERY: &str = r#"query officesConnection {
  officesConnection {
    edges { node { _sys { filename relativePath } } }
  }
}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeContentQuery {
    pub data: OfficeContentData,
    pub query: String,
    pub variables: OfficeQueryVariables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeContentData {
    pub offices: OfficeRecord,
    #[serde(default)]
    pub global: GlobalSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeQueryVariables {
    pub relative_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllTestimonialsQuery {
    pub data: TestimonialsData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsData {
    pub testimonials_connection: TestimonialsConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialsConnection {
    #[serde(rename = "Testimonials", default)]
    pub testimonials: Vec<TestimonialEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialEntry {
    #[serde(rename = "Testimonial")]
    pub testimonial: Testimonial,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficesConnectionQuery {
    pub data: OfficesConnectionData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficesConnectionData {
    pub offices_connection: OfficesConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficesConnection {
    #[serde(default)]
    pub edges: Vec<OfficeEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeEdge {
    pub node: OfficeNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeNode {
    #[serde(rename = "_sys")]
    pub sys: DocumentSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSys {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

/// Offline export of the content API, keyed by document relative path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(default)]
    pub global: GlobalSettings,
    #[serde(default)]
    pub offices: BTreeMap<String, OfficeRecord>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offices_connection_decodes_sys_filename() {
        let raw = r#"{"data":{"officesConnection":{"edges":[
            {"node":{"_sys":{"filename":"brisbane","relativePath":"brisbane.mdx"}}},
            {"node":{"_sys":{"filename":"sydney"}}}
        ]}}}"#;

        let decoded: OfficesConnectionQuery = serde_json::from_str(raw).expect("decodes");
        let names: Vec<_> = decoded
            .data
            .offices_connection
            .edges
            .iter()
            .map(|edge| edge.node.sys.filename.as_str())
            .collect();
        assert_eq!(names, ["brisbane", "sydney"]);
    }

    #[test]
    fn testimonials_use_capitalised_keys() {
        let raw = r#"{"data":{"testimonialsConnection":{"Testimonials":[
            {"Testimonial":{"name":"Ada","company":"Engines Ltd"}}
        ]}}}"#;

        let decoded: AllTestimonialsQuery = serde_json::from_str(raw).expect("decodes");
        let entries = decoded.data.testimonials_connection.testimonials;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].testimonial.name, "Ada");
    }
}
