use serde::{Deserialize, Serialize};
use serde_json::Value;

const ROOT_KIND: &str = "root";

/// Root of an authored rich-text field.
///
/// The CMS always returns a `root` node; a field the author left blank comes
/// back as a root with no children, or as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "root_kind")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<RichNode>,
}

impl RichText {
    pub fn new(children: Vec<RichNode>) -> Self {
        Self {
            kind: root_kind(),
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for RichText {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn root_kind() -> String {
    ROOT_KIND.to_string()
}

/// A node in the rich-text tree.
///
/// Element nodes carry `children`; text leaves carry `text` plus mark flags.
/// Embedded components (`mdxJsxFlowElement`, `mdxJsxTextElement`) carry a
/// `name` and free-form `props`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RichNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub props: Value,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl RichNode {
    pub fn element(kind: impl Into<String>, children: Vec<RichNode>) -> Self {
        Self {
            kind: kind.into(),
            children,
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::element("p", vec![Self::text(text)])
    }

    pub fn component(name: impl Into<String>, props: Value) -> Self {
        Self {
            kind: "mdxJsxFlowElement".to_string(),
            name: Some(name.into()),
            props,
            ..Self::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
