#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use vitrine::{
    application::{
        office::{OfficePageService, SiteIdentity},
        rich_text::RichTextRenderer,
        testimonials::FixedPicker,
    },
    infra::content::SnapshotContentClient,
    presentation::views::LayoutChrome,
};
use vitrine_content_types::{
    ContentSnapshot, GlobalSettings, OfficeRecord, RichNode, RichText, Seo, Testimonial,
};

pub const BRAND: &str = "Acme";
pub const PUBLIC_URL: &str = "https://acme.example";

pub fn rich(text: &str) -> Option<RichText> {
    Some(RichText::new(vec![RichNode::paragraph(text)]))
}

pub fn office(locality: &str) -> OfficeRecord {
    OfficeRecord {
        seo: Seo {
            title: locality.to_string(),
            description: Some(format!("Visit our {locality} office.")),
            canonical: None,
        },
        cover_img: Some(format!(
            "/images/{}-cover.jpg",
            locality.to_lowercase().replace(' ', "-")
        )),
        address_locality: locality.to_string(),
        phone: "(07) 5555 0100".to_string(),
        street_address: "1 Marine Parade".to_string(),
        suburb: "Southport".to_string(),
        address_region: "QLD".to_string(),
        postal_code: "4215".to_string(),
        address_country: "Australia".to_string(),
        about_us: rich("We have been here since 1999."),
        directions: rich("Take the lift to level 5."),
        ..OfficeRecord::default()
    }
}

pub fn carousel_photos() -> Option<RichText> {
    Some(RichText::new(vec![RichNode::component(
        "Carousel",
        json!({
            "backgroundColor": "red",
            "items": [
                { "label": "Reception", "link": "", "openIn": "sameWindow", "imgSrc": "/images/reception.jpg" },
                { "label": "Boardroom", "link": "https://book.example/room", "openIn": "newWindow", "imgSrc": "/images/boardroom.jpg" }
            ]
        }),
    )]))
}

pub fn snapshot() -> ContentSnapshot {
    let gold_coast = OfficeRecord {
        parking: rich("Parking is available under the building."),
        photos: carousel_photos(),
        ..office("Gold Coast")
    };
    let brisbane = office("Brisbane");

    ContentSnapshot {
        global: GlobalSettings {
            breadcrumb_suffix: Some("Office".to_string()),
        },
        offices: [
            ("gold-coast.mdx".to_string(), gold_coast),
            ("brisbane.mdx".to_string(), brisbane),
        ]
        .into_iter()
        .collect(),
        testimonials: vec![Testimonial {
            name: "Priya Raman".to_string(),
            company: Some("Harbour Logistics".to_string()),
            avatar: Some("/images/priya.jpg".to_string()),
            body: rich("They understood our business."),
        }],
    }
}

pub fn service_for(snapshot: ContentSnapshot) -> OfficePageService {
    OfficePageService::new(
        Arc::new(SnapshotContentClient::from_snapshot(snapshot)),
        Arc::new(FixedPicker(0)),
        Arc::new(RichTextRenderer::default()),
        SiteIdentity::new(BRAND, PUBLIC_URL),
    )
}

pub fn service() -> OfficePageService {
    service_for(snapshot())
}

pub fn chrome() -> LayoutChrome {
    LayoutChrome::new(BRAND, "Find an office near you.", "© Acme")
}
