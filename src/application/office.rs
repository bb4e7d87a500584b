//! Office pages: static path enumeration, per-page data fetch and view assembly.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use vitrine_content_types::{
    OfficeContentData, OfficeContentQuery, OfficeQueryVariables, SecondaryPlace, Testimonial,
};

use crate::application::content::{ContentClient, ContentError};
use crate::application::error::HttpError;
use crate::application::rich_text::{RichTextError, RichTextRenderer};
use crate::application::testimonials::{TestimonialPicker, pick_testimonial};
use crate::domain::error::DomainError;
use crate::domain::offices::{
    ContactDetails, Office, OfficeSectionKind, SectionContent, remove_extension,
};
use crate::presentation::views::{
    BreadcrumbView, BreadcrumbsView, ContactPanelView, ImageView, LayoutChrome, OfficePageView,
    OfficeSectionView, OfficeTemplate, SecondaryPlaceView, SeoView, TemplateRenderError,
    TestimonialView, office_layout, render_to_string,
};

const SOURCE: &str = "application::office::OfficePageService";

/// Path prefix every office page is served under.
pub const OFFICES_PATH: &str = "offices";
const DOCUMENT_EXTENSION: &str = "mdx";

const COVER_WIDTH: u32 = 1320;
const COVER_HEIGHT: u32 = 485;
const COVER_ALT: &str = "Cover image";
const MAP_WIDTH: u32 = 1920;
const MAP_HEIGHT: u32 = 1080;
const SIDE_IMAGE_WIDTH: u32 = 600;
const SIDE_IMAGE_HEIGHT: u32 = 400;
const AVATAR_SIZE: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPath {
    pub filename: String,
}

/// Every office page that exists. Identifiers outside the set are not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<StaticPath>,
    pub fallback: bool,
}

impl StaticPaths {
    pub fn contains(&self, filename: &str) -> bool {
        self.paths.iter().any(|path| path.filename == filename)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|path| path.filename.as_str())
    }
}

/// Everything one office page is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficePageProps {
    pub data: OfficeContentData,
    pub query: String,
    pub variables: OfficeQueryVariables,
    pub testimonial: Testimonial,
}

#[derive(Debug, Error)]
pub enum OfficePageError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    RichText(#[from] RichTextError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error("content query could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl OfficePageError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OfficePageError::Domain(DomainError::NotFound { .. })
                | OfficePageError::Content(ContentError::NotFound { .. })
        )
    }
}

impl From<OfficePageError> for HttpError {
    fn from(err: OfficePageError) -> Self {
        if err.is_not_found() {
            return HttpError::from_error(SOURCE, StatusCode::NOT_FOUND, "Office not found", &err);
        }
        match err {
            OfficePageError::Template(err) => HttpError::from(err),
            other => HttpError::from_error(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load office page",
                &other,
            ),
        }
    }
}

/// Brand and public address the pages are published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    pub brand: String,
    pub public_url: String,
}

impl SiteIdentity {
    pub fn new(brand: impl Into<String>, public_url: &str) -> Self {
        Self {
            brand: brand.into(),
            public_url: normalize_public_site_url(public_url),
        }
    }

    pub fn office_url(&self, filename: &str) -> String {
        format!("{}{OFFICES_PATH}/{filename}", self.public_url)
    }
}

#[derive(Clone)]
pub struct OfficePageService {
    content: Arc<dyn ContentClient>,
    picker: Arc<dyn TestimonialPicker>,
    renderer: Arc<RichTextRenderer>,
    site: SiteIdentity,
}

impl OfficePageService {
    pub fn new(
        content: Arc<dyn ContentClient>,
        picker: Arc<dyn TestimonialPicker>,
        renderer: Arc<RichTextRenderer>,
        site: SiteIdentity,
    ) -> Self {
        Self {
            content,
            picker,
            renderer,
            site,
        }
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    pub async fn static_paths(&self) -> Result<StaticPaths, OfficePageError> {
        let response = self.content.offices_connection().await?;
        let paths = response
            .data
            .offices_connection
            .edges
            .into_iter()
            .map(|edge| StaticPath {
                filename: remove_extension(&edge.node.sys.filename).to_string(),
            })
            .collect();

        Ok(StaticPaths {
            paths,
            fallback: false,
        })
    }

    /// Fetch the office document and the testimonial collection, then pick one testimonial.
    pub async fn static_props(&self, filename: &str) -> Result<OfficePageProps, OfficePageError> {
        let relative_path = format!("{filename}.{DOCUMENT_EXTENSION}");
        let (office, testimonials) = tokio::try_join!(
            self.content.office_content_query(&relative_path),
            self.content.all_testimonials_query(),
        )?;
        let testimonial = pick_testimonial(testimonials, self.picker.as_ref())?;

        let OfficeContentQuery {
            data,
            query,
            variables,
        } = office;

        Ok(OfficePageProps {
            data,
            query,
            variables,
            testimonial,
        })
    }

    pub fn page_view(
        &self,
        filename: &str,
        props: OfficePageProps,
    ) -> Result<OfficePageView, OfficePageError> {
        let OfficePageProps {
            data,
            query,
            variables,
            testimonial,
        } = props;
        let query_json = embed_query(&query, &variables)?;
        let suffix = data.global.breadcrumb_suffix.filter(|s| !s.trim().is_empty());
        let office = Office::from(data.offices);
        let brand = self.site.brand.as_str();

        let sections = office
            .sections()
            .into_iter()
            .map(|(kind, content)| self.section_view(&office, kind, content))
            .collect::<Result<Vec<_>, _>>()?;

        let cover = office.cover_img.as_deref().map(|src| {
            ImageView::responsive(src, COVER_WIDTH, COVER_HEIGHT, COVER_ALT)
                .with_priority()
        });

        let canonical = office
            .seo
            .canonical
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.site.office_url(filename));

        let seo = SeoView {
            title: office.seo.title.clone(),
            description: office.seo.description.clone(),
            canonical,
        };

        Ok(OfficePageView {
            filename: filename.to_string(),
            breadcrumbs: breadcrumbs(
                remove_extension(&variables.relative_path),
                &office.seo.title,
                suffix,
            ),
            contact: contact_view(brand, &office.contact),
            testimonial: self.testimonial_view(testimonial)?,
            brand: brand.to_string(),
            seo,
            cover,
            sections,
            query_json,
        })
    }

    /// Render a page known to be in the static path set.
    pub async fn render(
        &self,
        chrome: LayoutChrome,
        filename: &str,
    ) -> Result<String, OfficePageError> {
        let props = self.static_props(filename).await?;
        let view = self.page_view(filename, props)?;
        let html = render_to_string(
            OfficeTemplate {
                view: office_layout(chrome, view),
            },
            SOURCE,
        )?;
        Ok(html)
    }

    /// Render `filename`, or fail with not-found when it is outside the static path set.
    pub async fn page_html(
        &self,
        chrome: LayoutChrome,
        filename: &str,
    ) -> Result<String, OfficePageError> {
        let paths = self.static_paths().await?;
        if !paths.fallback && !paths.contains(filename) {
            return Err(DomainError::not_found("office", filename).into());
        }
        self.render(chrome, filename).await
    }

    fn section_view(
        &self,
        office: &Office,
        kind: OfficeSectionKind,
        content: SectionContent<'_>,
    ) -> Result<OfficeSectionView, OfficePageError> {
        let heading = kind.heading(&self.site.brand, office.locality());
        let (image, body_html) = match content {
            SectionContent::Image(src) => {
                let alt = heading.clone().unwrap_or_default();
                let image = ImageView::responsive(src, MAP_WIDTH, MAP_HEIGHT, &alt);
                (Some(image), None)
            }
            SectionContent::RichText(tree) => (None, Some(self.renderer.render(tree)?)),
        };

        Ok(OfficeSectionView {
            heading,
            anchor: kind.anchor(),
            divider: kind.preceded_by_divider(),
            image,
            body_html,
        })
    }

    fn testimonial_view(
        &self,
        testimonial: Testimonial,
    ) -> Result<TestimonialView, OfficePageError> {
        let body_html = match testimonial.body.as_ref() {
            Some(body) => self.renderer.render(body)?,
            None => String::new(),
        };
        let avatar = testimonial
            .avatar
            .as_deref()
            .filter(|src| !src.trim().is_empty())
            .map(|src| ImageView::new(src, AVATAR_SIZE, AVATAR_SIZE, &testimonial.name));

        Ok(TestimonialView {
            company: testimonial.company.filter(|c| !c.trim().is_empty()),
            name: testimonial.name,
            avatar,
            body_html,
        })
    }
}

/// Home, then one crumb per segment of the document path; the last one carries the page title.
fn breadcrumbs(path: &str, title: &str, suffix: Option<String>) -> BreadcrumbsView {
    let mut crumbs = vec![BreadcrumbView {
        label: "Home".to_string(),
        href: "/".to_string(),
        current: false,
    }];

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut href = format!("/{OFFICES_PATH}");
    for (index, segment) in segments.iter().enumerate() {
        href.push('/');
        href.push_str(segment);
        let current = index + 1 == segments.len();
        crumbs.push(BreadcrumbView {
            label: if current { title } else { *segment }.to_string(),
            href: href.clone(),
            current,
        });
    }

    BreadcrumbsView { crumbs, suffix }
}

fn contact_view(brand: &str, contact: &ContactDetails) -> ContactPanelView {
    let side_image = contact.side_img.as_deref().map(|src| {
        let alt = format!("{brand} {}", contact.address_locality);
        ImageView::responsive(src, SIDE_IMAGE_WIDTH, SIDE_IMAGE_HEIGHT, &alt)
    });

    ContactPanelView {
        phone: contact.phone.clone(),
        phone_href: phone_href(&contact.phone),
        street_address: contact.street_address.clone(),
        suburb: contact.suburb.clone(),
        address_locality: contact.address_locality.clone(),
        address_region: contact.address_region.clone(),
        postal_code: contact.postal_code.clone(),
        address_country: contact.address_country.clone(),
        side_image,
        secondary_place: contact
            .sidebar_secondary_place
            .as_ref()
            .and_then(secondary_place_view),
    }
}

fn secondary_place_view(place: &SecondaryPlace) -> Option<SecondaryPlaceView> {
    if place.name.trim().is_empty() {
        return None;
    }
    Some(SecondaryPlaceView {
        name: place.name.clone(),
        href: place.url.clone().filter(|url| !url.trim().is_empty()),
    })
}

fn phone_href(phone: &str) -> String {
    let dialable: String = phone
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '+')
        .collect();
    format!("tel:{dialable}")
}

#[derive(Serialize)]
struct EmbeddedQuery<'a> {
    query: &'a str,
    variables: &'a OfficeQueryVariables,
}

/// JSON for an inline `<script>` block; `<` is escaped so the payload cannot close the tag.
fn embed_query(query: &str, variables: &OfficeQueryVariables) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(&EmbeddedQuery { query, variables })?;
    Ok(json.replace('<', "\\u003c"))
}

fn normalize_public_site_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    format!("{trimmed}/")
}
