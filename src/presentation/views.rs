use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_to_string<T: Template>(
    template: T,
    source: &'static str,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(source, "Template rendering failed", err))
}

/// Render `template` as a full page with `status`, falling back to a plain 500.
pub fn render_page<T: Template>(template: T, status: StatusCode, source: &'static str) -> Response {
    match render_to_string(template, source) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    const SOURCE: &str = "presentation::views::render_not_found_response";

    let view = LayoutContext::new(chrome, ErrorPageView::not_found());
    let mut response = render_page(ErrorTemplate { view }, StatusCode::NOT_FOUND, SOURCE);
    if response.status() == StatusCode::NOT_FOUND {
        ErrorReport::from_message(SOURCE, "no page at this address").attach(&mut response);
    }
    response
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn new(brand: &str, description: &str, footer_copy: &str) -> Self {
        Self {
            brand: BrandView {
                title: brand.to_string(),
                href: "/".to_string(),
            },
            footer: FooterView {
                copy: footer_copy.to_string(),
            },
            meta: PageMetaView {
                title: brand.to_string(),
                description: description.to_string(),
                canonical: String::new(),
            },
        }
    }

    pub fn with_meta(self, meta: PageMetaView) -> Self {
        Self { meta, ..self }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

/// Attributes of an optimised `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub priority: bool,
    pub responsive: bool,
}

impl ImageView {
    pub fn new(src: &str, width: u32, height: u32, alt: &str) -> Self {
        Self {
            src: src.to_string(),
            width,
            height,
            alt: alt.to_string(),
            priority: false,
            responsive: false,
        }
    }

    /// Scales to its container width while keeping `width:height`.
    pub fn responsive(src: &str, width: u32, height: u32, alt: &str) -> Self {
        Self {
            responsive: true,
            ..Self::new(src, width, height, alt)
        }
    }

    /// Above-the-fold image: fetched eagerly at high priority.
    pub fn with_priority(self) -> Self {
        Self {
            priority: true,
            ..self
        }
    }

    pub fn loading(&self) -> &'static str {
        if self.priority { "eager" } else { "lazy" }
    }
}

#[derive(Clone)]
pub struct BreadcrumbView {
    pub label: String,
    pub href: String,
    pub current: bool,
}

#[derive(Clone)]
pub struct BreadcrumbsView {
    pub crumbs: Vec<BreadcrumbView>,
    pub suffix: Option<String>,
}

#[derive(Clone)]
pub struct OfficeSectionView {
    pub heading: Option<String>,
    pub anchor: Option<&'static str>,
    pub divider: bool,
    pub image: Option<ImageView>,
    pub body_html: Option<String>,
}

#[derive(Clone)]
pub struct SecondaryPlaceView {
    pub name: String,
    pub href: Option<String>,
}

#[derive(Clone)]
pub struct ContactPanelView {
    pub phone: String,
    pub phone_href: String,
    pub street_address: String,
    pub suburb: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
    pub side_image: Option<ImageView>,
    pub secondary_place: Option<SecondaryPlaceView>,
}

#[derive(Clone)]
pub struct TestimonialView {
    pub name: String,
    pub company: Option<String>,
    pub avatar: Option<ImageView>,
    pub body_html: String,
}

#[derive(Clone)]
pub struct SeoView {
    pub title: String,
    pub description: Option<String>,
    pub canonical: String,
}

pub struct OfficePageView {
    pub filename: String,
    pub seo: SeoView,
    pub brand: String,
    pub cover: Option<ImageView>,
    pub breadcrumbs: BreadcrumbsView,
    pub sections: Vec<OfficeSectionView>,
    pub contact: ContactPanelView,
    pub testimonial: TestimonialView,
    /// Content query and variables, JSON-encoded for a `<script>` block.
    pub query_json: String,
}

#[derive(Template)]
#[template(path = "office.html")]
pub struct OfficeTemplate {
    pub view: LayoutContext<OfficePageView>,
}

/// Wrap an office page in the site chrome, taking head metadata from its SEO fields.
pub fn office_layout(chrome: LayoutChrome, view: OfficePageView) -> LayoutContext<OfficePageView> {
    let description = view
        .seo
        .description
        .clone()
        .unwrap_or_else(|| chrome.meta.description.clone());
    let meta = PageMetaView {
        title: view.seo.title.clone(),
        description,
        canonical: view.seo.canonical.clone(),
    };
    LayoutContext::new(chrome.with_meta(meta), view)
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Office not found".to_string(),
            message: "We could not find an office at this address. It may have moved or closed."
                .to_string(),
            primary_action: Some(ErrorAction {
                href: "/".to_string(),
                label: "Back to home".to_string(),
            }),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_images_load_eagerly() {
        let image = ImageView::new("/a.jpg", 10, 10, "a");
        assert_eq!(image.loading(), "lazy");
        assert_eq!(image.with_priority().loading(), "eager");
    }
}
