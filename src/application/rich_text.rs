//! Rich-text trees to sanitised HTML, with embedded blocks rendered through a registry.

use std::{collections::HashMap, fmt::Write as _, sync::Arc};

use ammonia::Builder as AmmoniaBuilder;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use vitrine_content_types::{CarouselBlock, RichNode, RichText};

use crate::application::carousel::render_carousel;
use crate::domain::carousel::CarouselBlockData;
use crate::domain::schema::CAROUSEL_TEMPLATE_NAME;
use crate::presentation::views::TemplateRenderError;

#[derive(Debug, Error)]
pub enum RichTextError {
    #[error("component `{name}` has invalid props: {message}")]
    InvalidProps { name: String, message: String },
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
}

impl RichTextError {
    pub fn invalid_props(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidProps {
            name: name.into(),
            message: err.to_string(),
        }
    }
}

pub type ComponentRenderer = Arc<dyn Fn(&Value) -> Result<String, RichTextError> + Send + Sync>;

/// Block renderers for components embedded in rich text, keyed by component name.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentRenderer>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every block the site ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CAROUSEL_TEMPLATE_NAME, render_carousel_component);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, renderer: F)
    where
        F: Fn(&Value) -> Result<String, RichTextError> + Send + Sync + 'static,
    {
        self.components.insert(name.into(), Arc::new(renderer));
    }

    pub fn get(&self, name: &str) -> Option<&ComponentRenderer> {
        self.components.get(name)
    }
}

fn render_carousel_component(props: &Value) -> Result<String, RichTextError> {
    let block: CarouselBlock = serde_json::from_value(props.clone())
        .map_err(|err| RichTextError::invalid_props(CAROUSEL_TEMPLATE_NAME, err))?;
    Ok(render_carousel(&CarouselBlockData::from(block))?)
}

pub struct RichTextRenderer {
    registry: ComponentRegistry,
    sanitizer: AmmoniaBuilder<'static>,
}

impl Default for RichTextRenderer {
    fn default() -> Self {
        Self::new(ComponentRegistry::with_defaults())
    }
}

impl RichTextRenderer {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry,
            sanitizer: build_sanitizer(),
        }
    }

    pub fn render(&self, tree: &RichText) -> Result<String, RichTextError> {
        let mut html = String::new();
        self.render_children(&tree.children, &mut html)?;
        Ok(self.sanitizer.clean(&html).to_string())
    }

    fn render_children(&self, nodes: &[RichNode], out: &mut String) -> Result<(), RichTextError> {
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node(&self, node: &RichNode, out: &mut String) -> Result<(), RichTextError> {
        match node.kind.as_str() {
            "text" => render_text(node, out),
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "li" | "blockquote" => {
                let tag = node.kind.as_str();
                let _ = write!(out, "<{tag}>");
                self.render_children(&node.children, out)?;
                let _ = write!(out, "</{tag}>");
            }
            // List-item content carries no markup of its own.
            "lic" => self.render_children(&node.children, out)?,
            "a" => {
                let href = node.url.as_deref().unwrap_or_default();
                let _ = write!(out, "<a href=\"{}\"", ammonia::clean_text(href));
                if let Some(title) = node.title.as_deref() {
                    let _ = write!(out, " title=\"{}\"", ammonia::clean_text(title));
                }
                out.push('>');
                self.render_children(&node.children, out)?;
                out.push_str("</a>");
            }
            "img" => render_image(node, out),
            "code_block" => {
                out.push_str("<pre><code");
                if let Some(lang) = node.lang.as_deref().filter(|lang| !lang.is_empty()) {
                    let _ = write!(out, " class=\"language-{}\"", ammonia::clean_text(lang));
                }
                out.push('>');
                out.push_str(&ammonia::clean_text(
                    node.value.as_deref().unwrap_or_default(),
                ));
                out.push_str("</code></pre>");
            }
            "hr" => out.push_str("<hr>"),
            "break" => out.push_str("<br>"),
            "mdxJsxFlowElement" | "mdxJsxTextElement" => self.render_component(node, out)?,
            other => {
                debug!(
                    target = "vitrine::rich_text",
                    kind = other,
                    "unknown node type rendered as its children"
                );
                self.render_children(&node.children, out)?;
            }
        }
        Ok(())
    }

    fn render_component(&self, node: &RichNode, out: &mut String) -> Result<(), RichTextError> {
        let name = node.name.as_deref().unwrap_or_default();
        match self.registry.get(name) {
            Some(renderer) => out.push_str(&renderer(&node.props)?),
            None => debug!(
                target = "vitrine::rich_text",
                component = name,
                "no renderer registered for component"
            ),
        }
        Ok(())
    }
}

fn render_text(node: &RichNode, out: &mut String) {
    let text = ammonia::clean_text(node.text.as_deref().unwrap_or_default());
    let marks = [
        (node.code, "code"),
        (node.bold, "strong"),
        (node.italic, "em"),
        (node.underline, "u"),
        (node.strikethrough, "s"),
    ];

    for (_, tag) in marks.iter().filter(|(on, _)| *on) {
        let _ = write!(out, "<{tag}>");
    }
    out.push_str(&text);
    for (_, tag) in marks.iter().rev().filter(|(on, _)| *on) {
        let _ = write!(out, "</{tag}>");
    }
}

fn render_image(node: &RichNode, out: &mut String) {
    let src = ammonia::clean_text(node.url.as_deref().unwrap_or_default());
    let alt = ammonia::clean_text(node.alt.as_deref().unwrap_or_default());
    out.push_str("<figure>");
    let _ = write!(
        out,
        "<img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\" decoding=\"async\">"
    );
    if let Some(caption) = node.caption.as_deref().filter(|caption| !caption.is_empty()) {
        let _ = write!(out, "<figcaption>{}</figcaption>", ammonia::clean_text(caption));
    }
    out.push_str("</figure>");
}

fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_tags(&["section", "figure", "figcaption", "s", "u"]);
    builder.add_generic_attributes(&["class", "id", "role", "tabindex", "title"]);
    builder.add_generic_attribute_prefixes(&["data-", "aria-"]);
    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("li", &["value"]);
    builder.add_tag_attributes(
        "img",
        &["width", "height", "loading", "decoding", "fetchpriority"],
    );
    builder.add_url_schemes(["http", "https", "mailto", "tel"].iter().copied());

    builder
}
