//! Wire types exchanged with the headless CMS: the authored content schema
//! and the shapes of the query responses Vitrine consumes.

pub mod blocks;
pub mod offices;
pub mod queries;
pub mod rich_text;
pub mod schema;

pub use blocks::{CarouselBlock, CarouselItem};
pub use offices::{GlobalSettings, OfficeRecord, SecondaryPlace, Seo, Testimonial};
pub use queries::{
    AllTestimonialsQuery, ContentSnapshot, DocumentSys, OfficeContentData, OfficeContentQuery,
    OfficeEdge, OfficeNode, OfficeQueryVariables, OfficesConnection, OfficesConnectionData,
    OfficesConnectionQuery, TestimonialEntry, TestimonialsConnection, TestimonialsData,
};
pub use rich_text::{RichNode, RichText};
pub use schema::{Field, FieldOption, FieldType, FieldUi, Template, TemplateUi};
