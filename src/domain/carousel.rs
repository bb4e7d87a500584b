//! Carousel block model: slides, how each slide opens, and the section palette.

use std::{fmt, str::FromStr};

use vitrine_content_types::blocks as wire;

use crate::domain::error::DomainError;

/// Where a slide's link opens when the slide is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    SameWindow,
    Modal,
    NewWindow,
}

impl OpenMode {
    pub const ALL: [OpenMode; 3] = [OpenMode::SameWindow, OpenMode::Modal, OpenMode::NewWindow];

    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::SameWindow => "sameWindow",
            OpenMode::Modal => "modal",
            OpenMode::NewWindow => "newWindow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpenMode::SameWindow => "Same window",
            OpenMode::Modal => "Modal",
            OpenMode::NewWindow => "New window",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OpenMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| DomainError::unknown_open_mode(value))
    }
}

/// Background palette of the section enclosing a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundColor {
    #[default]
    Default,
    LightGray,
    Red,
    Black,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 4] = [
        BackgroundColor::Default,
        BackgroundColor::LightGray,
        BackgroundColor::Red,
        BackgroundColor::Black,
    ];

    /// Unrecognised or missing values fall back to [`BackgroundColor::Default`].
    pub fn from_authored(value: Option<&str>) -> Self {
        value
            .and_then(|value| {
                BackgroundColor::ALL
                    .into_iter()
                    .find(|color| color.as_str() == value)
            })
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundColor::Default => "default",
            BackgroundColor::LightGray => "lightgray",
            BackgroundColor::Red => "red",
            BackgroundColor::Black => "black",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackgroundColor::Default => "Default",
            BackgroundColor::LightGray => "Light Gray",
            BackgroundColor::Red => "Red",
            BackgroundColor::Black => "Black",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BackgroundColor::Default => "section section--default",
            BackgroundColor::LightGray => "section section--lightgray",
            BackgroundColor::Red => "section section--red",
            BackgroundColor::Black => "section section--black",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    pub label: String,
    pub link: String,
    /// Authored value, parsed on demand by [`CarouselItem::open_mode`].
    pub open_in: String,
    pub img_src: String,
}

impl CarouselItem {
    pub fn open_mode(&self) -> Result<OpenMode, DomainError> {
        self.open_in.parse()
    }
}

impl From<wire::CarouselItem> for CarouselItem {
    fn from(item: wire::CarouselItem) -> Self {
        Self {
            label: item.label,
            link: item.link,
            open_in: item.open_in,
            img_src: item.img_src,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselBlockData {
    pub items: Vec<CarouselItem>,
    pub background_color: BackgroundColor,
}

impl From<wire::CarouselBlock> for CarouselBlockData {
    fn from(block: wire::CarouselBlock) -> Self {
        Self {
            background_color: BackgroundColor::from_authored(block.background_color.as_deref()),
            items: block.items.into_iter().map(CarouselItem::from).collect(),
        }
    }
}
