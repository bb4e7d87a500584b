//! Office pages: the record as the renderer sees it and the fixed section order.

use vitrine_content_types::{OfficeRecord, RichText, SecondaryPlace, Seo};

/// Collapses the "has any children" check every optional section needs.
pub fn present(tree: Option<RichText>) -> Option<RichText> {
    tree.filter(|tree| !tree.is_empty())
}

/// Named sections of an office page, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfficeSectionKind {
    AboutUs,
    Map,
    Directions,
    Parking,
    PublicTransport,
    Team,
    Photos,
    Body,
}

impl OfficeSectionKind {
    pub const ORDER: [OfficeSectionKind; 8] = [
        OfficeSectionKind::AboutUs,
        OfficeSectionKind::Map,
        OfficeSectionKind::Directions,
        OfficeSectionKind::Parking,
        OfficeSectionKind::PublicTransport,
        OfficeSectionKind::Team,
        OfficeSectionKind::Photos,
        OfficeSectionKind::Body,
    ];

    pub fn heading(self, brand: &str, locality: &str) -> Option<String> {
        match self {
            OfficeSectionKind::AboutUs => Some("About Us".to_string()),
            OfficeSectionKind::Map => Some(format!("{brand} {locality} Map")),
            OfficeSectionKind::Directions => Some(format!("{brand} {locality} Directions")),
            OfficeSectionKind::Parking => Some("Parking".to_string()),
            OfficeSectionKind::PublicTransport => Some("Public Transport".to_string()),
            OfficeSectionKind::Team => Some(format!("The {brand} {locality} Team")),
            OfficeSectionKind::Photos => Some(format!("{brand} {locality} Photos")),
            OfficeSectionKind::Body => None,
        }
    }

    pub fn anchor(self) -> Option<&'static str> {
        match self {
            OfficeSectionKind::Directions => Some("Directions"),
            _ => None,
        }
    }

    /// The freeform body is set apart from the named sections by a rule.
    pub fn preceded_by_divider(self) -> bool {
        matches!(self, OfficeSectionKind::Body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub phone: String,
    pub street_address: String,
    pub suburb: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
    pub side_img: Option<String>,
    pub sidebar_secondary_place: Option<SecondaryPlace>,
}

/// Content of one section to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionContent<'a> {
    RichText(&'a RichText),
    Image(&'a str),
}

/// An office record with optional content resolved to `Option`s.
#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub seo: Seo,
    pub cover_img: Option<String>,
    pub contact: ContactDetails,
    pub map: Option<String>,
    pub about_us: RichText,
    pub directions: RichText,
    pub parking: Option<RichText>,
    pub public_transport: Option<RichText>,
    pub team: Option<RichText>,
    pub photos: Option<RichText>,
    pub body: Option<RichText>,
}

impl Office {
    pub fn locality(&self) -> &str {
        &self.contact.address_locality
    }

    /// Sections that have content, in the fixed page order.
    pub fn sections(&self) -> Vec<(OfficeSectionKind, SectionContent<'_>)> {
        OfficeSectionKind::ORDER
            .into_iter()
            .filter_map(|kind| self.section(kind).map(|content| (kind, content)))
            .collect()
    }

    fn section(&self, kind: OfficeSectionKind) -> Option<SectionContent<'_>> {
        match kind {
            OfficeSectionKind::AboutUs => Some(SectionContent::RichText(&self.about_us)),
            OfficeSectionKind::Map => self.map.as_deref().map(SectionContent::Image),
            OfficeSectionKind::Directions => Some(SectionContent::RichText(&self.directions)),
            OfficeSectionKind::Parking => rich(&self.parking),
            OfficeSectionKind::PublicTransport => rich(&self.public_transport),
            OfficeSectionKind::Team => rich(&self.team),
            OfficeSectionKind::Photos => rich(&self.photos),
            OfficeSectionKind::Body => rich(&self.body),
        }
    }
}

fn rich(tree: &Option<RichText>) -> Option<SectionContent<'_>> {
    tree.as_ref().map(SectionContent::RichText)
}

impl From<OfficeRecord> for Office {
    fn from(record: OfficeRecord) -> Self {
        Self {
            seo: record.seo,
            cover_img: non_blank(record.cover_img),
            contact: ContactDetails {
                phone: record.phone,
                street_address: record.street_address,
                suburb: record.suburb,
                address_locality: record.address_locality,
                address_region: record.address_region,
                postal_code: record.postal_code,
                address_country: record.address_country,
                side_img: non_blank(record.side_img),
                sidebar_secondary_place: record.sidebar_secondary_place,
            },
            map: non_blank(record.map),
            about_us: record.about_us.unwrap_or_default(),
            directions: record.directions.unwrap_or_default(),
            parking: present(record.parking),
            public_transport: present(record.public_transport),
            team: present(record.team),
            photos: present(record.photos),
            body: present(record.body),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Strip everything from the first `.` onwards (`brisbane.mdx` → `brisbane`).
pub fn remove_extension(file: &str) -> &str {
    file.split('.').next().unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use vitrine_content_types::RichNode;

    use super::*;

    fn tree(text: &str) -> Option<RichText> {
        Some(RichText::new(vec![RichNode::paragraph(text)]))
    }

    fn record() -> OfficeRecord {
        OfficeRecord {
            address_locality: "Brisbane".into(),
            about_us: tree("about"),
            directions: tree("directions"),
            ..OfficeRecord::default()
        }
    }

    fn kinds(office: &Office) -> Vec<OfficeSectionKind> {
        office.sections().into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn empty_trees_are_absent() {
        assert_eq!(present(Some(RichText::default())), None);
        assert_eq!(present(None), None);
        assert!(present(tree("x")).is_some());
    }

    #[test]
    fn minimal_record_renders_only_required_sections() {
        let office = Office::from(record());
        assert_eq!(
            kinds(&office),
            [OfficeSectionKind::AboutUs, OfficeSectionKind::Directions]
        );
    }

    #[test]
    fn sections_follow_fixed_order() {
        let office = Office::from(OfficeRecord {
            map: Some("/images/map.png".into()),
            parking: tree("parking"),
            public_transport: tree("bus"),
            team: tree("team"),
            photos: tree("photos"),
            body: tree("body"),
            ..record()
        });

        assert_eq!(kinds(&office), OfficeSectionKind::ORDER);
    }

    #[test]
    fn blank_cover_image_is_absent() {
        let office = Office::from(OfficeRecord {
            cover_img: Some("  ".into()),
            ..record()
        });
        assert_eq!(office.cover_img, None);
    }

    #[test]
    fn headings_use_brand_and_locality() {
        assert_eq!(
            OfficeSectionKind::Team.heading("Acme", "Perth").as_deref(),
            Some("The Acme Perth Team")
        );
        assert_eq!(OfficeSectionKind::Body.heading("Acme", "Perth"), None);
        assert_eq!(OfficeSectionKind::Directions.anchor(), Some("Directions"));
    }

    #[test]
    fn remove_extension_strips_suffix() {
        assert_eq!(remove_extension("brisbane.mdx"), "brisbane");
        assert_eq!(remove_extension("sydney"), "sydney");
    }
}
