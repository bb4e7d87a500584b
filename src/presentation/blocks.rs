use askama::Template;

/// Behaviour flags read by `carousel.js` from the block's `data-*` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    pub auto_play: bool,
    pub infinite_loop: bool,
    pub show_arrows: bool,
    pub show_thumbs: bool,
    pub show_status: bool,
    pub stop_on_hover: bool,
    pub swipeable: bool,
    pub interval_ms: u32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            infinite_loop: true,
            show_arrows: false,
            show_thumbs: false,
            show_status: false,
            stop_on_hover: true,
            swipeable: true,
            interval_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLink {
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SlideView {
    pub index: usize,
    pub label: String,
    pub open_in: String,
    pub image: super::views::ImageView,
    pub link: Option<SlideLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct CarouselView {
    pub background_class: &'static str,
    pub slides: Vec<SlideView>,
    pub indicators: Vec<IndicatorView>,
    pub options: CarouselOptions,
}

#[derive(Template)]
#[template(path = "blocks/carousel.html")]
pub struct CarouselTemplate {
    pub view: CarouselView,
}
