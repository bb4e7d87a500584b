//! Application services: content fetching, page assembly and static generation.

pub mod carousel;
pub mod content;
pub mod error;
pub mod generate;
pub mod office;
pub mod rich_text;
pub mod testimonials;
