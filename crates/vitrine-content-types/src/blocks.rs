use serde::{Deserialize, Serialize};

/// Carousel block as authored in the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselBlock {
    #[serde(default)]
    pub items: Vec<CarouselItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// One slide. `open_in` keeps the authored string so unknown values survive
/// decoding and are handled at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub open_in: String,
    #[serde(default)]
    pub img_src: String,
}
