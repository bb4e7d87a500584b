use serde::{Deserialize, Serialize};

use crate::rich_text::RichText;

/// An office document as returned by the content API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeRecord {
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub cover_img: Option<String>,
    #[serde(default)]
    pub address_locality: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub address_region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub address_country: String,
    #[serde(default)]
    pub side_img: Option<String>,
    #[serde(default)]
    pub sidebar_secondary_place: Option<SecondaryPlace>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub about_us: Option<RichText>,
    #[serde(default)]
    pub directions: Option<RichText>,
    #[serde(default)]
    pub parking: Option<RichText>,
    #[serde(default)]
    pub public_transport: Option<RichText>,
    #[serde(default)]
    pub team: Option<RichText>,
    #[serde(default)]
    pub photos: Option<RichText>,
    #[serde(rename = "_body", default)]
    pub body: Option<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
}

/// Secondary location shown under the contact details (e.g. a nearby office).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryPlace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default)]
    pub breadcrumb_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub body: Option<RichText>,
}
