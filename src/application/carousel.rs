//! Carousel block: slide/indicator view building and click dispatch.

use metrics::counter;
use tracing::warn;

use crate::domain::carousel::{CarouselBlockData, CarouselItem, OpenMode};
use crate::domain::error::DomainError;
use crate::infra::telemetry::CAROUSEL_UNKNOWN_OPEN_MODE_TOTAL;
use crate::presentation::blocks::{
    CarouselOptions, CarouselTemplate, CarouselView, IndicatorView, SlideLink, SlideView,
};
use crate::presentation::views::{ImageView, TemplateRenderError, render_to_string};

/// Browsing-context name used for links that leave the current view.
pub const NEW_BROWSING_CONTEXT: &str = "_blank";
const EXTERNAL_LINK_REL: &str = "noopener noreferrer";
const SLIDE_WIDTH: u32 = 1080;
const SLIDE_HEIGHT: u32 = 388;

/// Receiver of the navigation a slide click resolves to.
pub trait Navigator {
    /// Navigate within the current view, keeping application state.
    fn push(&mut self, path: &str);
    /// Open `url` in the browsing context named by `target`.
    fn open(&mut self, url: &str, target: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    Push { path: String },
    Open { url: String, target: &'static str },
}

impl NavigationAction {
    pub fn for_item(item: &CarouselItem) -> Result<Self, DomainError> {
        let action = match item.open_mode()? {
            OpenMode::SameWindow => NavigationAction::Push {
                path: item.link.clone(),
            },
            // No modal presentation exists yet; modal links open like new-window ones.
            OpenMode::Modal | OpenMode::NewWindow => NavigationAction::Open {
                url: item.link.clone(),
                target: NEW_BROWSING_CONTEXT,
            },
        };
        Ok(action)
    }

    pub fn dispatch(&self, navigator: &mut dyn Navigator) {
        match self {
            NavigationAction::Push { path } => navigator.push(path),
            NavigationAction::Open { url, target } => navigator.open(url, target),
        }
    }
}

/// Handle a click on `item`. Unknown `openIn` values are logged and ignored.
pub fn open_item(item: &CarouselItem, navigator: &mut dyn Navigator) {
    match NavigationAction::for_item(item) {
        Ok(action) => action.dispatch(navigator),
        Err(err) => {
            counter!(CAROUSEL_UNKNOWN_OPEN_MODE_TOTAL).increment(1);
            warn!(
                target = "vitrine::carousel",
                label = %item.label,
                open_in = %item.open_in,
                error = %err,
                "carousel item has no navigation"
            );
        }
    }
}

/// Records a dispatched navigation as the anchor wrapping a server-rendered slide.
#[derive(Debug, Default)]
pub struct AnchorNavigator {
    link: Option<SlideLink>,
}

impl AnchorNavigator {
    pub fn into_link(self) -> Option<SlideLink> {
        self.link
    }
}

impl Navigator for AnchorNavigator {
    fn push(&mut self, path: &str) {
        self.link = Some(SlideLink {
            href: path.to_string(),
            target: None,
            rel: None,
        });
    }

    fn open(&mut self, url: &str, target: &str) {
        self.link = Some(SlideLink {
            href: url.to_string(),
            target: Some(target.to_string()),
            rel: Some(EXTERNAL_LINK_REL.to_string()),
        });
    }
}

/// Marker for slide `index`. The selected marker is inert; the others act as buttons.
pub fn indicator(index: usize, label: &str, is_selected: bool) -> IndicatorView {
    let position = index + 1;
    let label = if is_selected {
        format!("Selected: {label} {position}")
    } else {
        format!("{label} {position}")
    };

    IndicatorView {
        index,
        label,
        selected: is_selected,
    }
}

pub fn slide(index: usize, item: &CarouselItem) -> SlideView {
    let mut navigator = AnchorNavigator::default();
    open_item(item, &mut navigator);

    SlideView {
        index,
        label: item.label.clone(),
        open_in: item.open_in.clone(),
        image: ImageView::responsive(&item.img_src, SLIDE_WIDTH, SLIDE_HEIGHT, &item.label),
        link: navigator.into_link(),
    }
}

pub fn carousel_view(block: &CarouselBlockData, active_index: usize) -> CarouselView {
    let slides = block
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| slide(index, item))
        .collect();
    let indicators = block
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| indicator(index, &item.label, index == active_index))
        .collect();

    CarouselView {
        background_class: block.background_color.css_class(),
        slides,
        indicators,
        options: CarouselOptions::default(),
    }
}

pub fn render_carousel(block: &CarouselBlockData) -> Result<String, TemplateRenderError> {
    let view = carousel_view(block, 0);
    render_to_string(
        CarouselTemplate { view },
        "application::carousel::render_carousel",
    )
}

#[cfg(test)]
mod tests {
    use crate::domain::carousel::BackgroundColor;

    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        pushed: Vec<String>,
        opened: Vec<(String, String)>,
    }

    impl Navigator for RecordingNavigator {
        fn push(&mut self, path: &str) {
            self.pushed.push(path.to_string());
        }

        fn open(&mut self, url: &str, target: &str) {
            self.opened.push((url.to_string(), target.to_string()));
        }
    }

    fn item(label: &str, link: &str, open_in: &str) -> CarouselItem {
        CarouselItem {
            label: label.to_string(),
            link: link.to_string(),
            open_in: open_in.to_string(),
            img_src: format!("/images/{label}.jpg"),
        }
    }

    #[test]
    fn same_window_pushes_exact_link() {
        let mut navigator = RecordingNavigator::default();
        open_item(&item("A", "/a?x=1", "sameWindow"), &mut navigator);

        assert_eq!(navigator.pushed, ["/a?x=1"]);
        assert!(navigator.opened.is_empty());
    }

    #[test]
    fn new_window_and_modal_open_new_context() {
        for mode in ["newWindow", "modal"] {
            let mut navigator = RecordingNavigator::default();
            open_item(&item("B", "https://example.com/b", mode), &mut navigator);

            assert!(navigator.pushed.is_empty());
            assert_eq!(
                navigator.opened,
                [("https://example.com/b".to_string(), "_blank".to_string())]
            );
        }
    }

    #[test]
    fn unknown_mode_does_not_navigate() {
        let mut navigator = RecordingNavigator::default();
        open_item(&item("C", "/c", "lightbox"), &mut navigator);

        assert!(navigator.pushed.is_empty());
        assert!(navigator.opened.is_empty());
    }

    #[test]
    fn unknown_mode_reports_explicit_error() {
        let err = NavigationAction::for_item(&item("C", "/c", "")).expect_err("unknown");
        assert_eq!(err, DomainError::unknown_open_mode(""));
    }

    #[test]
    fn selected_indicator_is_labelled_as_selected() {
        let view = indicator(0, "Hero", true);
        assert!(view.selected);
        assert_eq!(view.label, "Selected: Hero 1");

        let view = indicator(4, "Hero", false);
        assert!(!view.selected);
        assert_eq!(view.label, "Hero 5");
    }

    #[test]
    fn slides_carry_dispatched_links() {
        let block = CarouselBlockData {
            items: vec![
                item("A", "/a", "sameWindow"),
                item("B", "/b", "modal"),
                item("C", "/c", "bogus"),
            ],
            background_color: BackgroundColor::Red,
        };

        let view = carousel_view(&block, 0);

        let first = view.slides[0].link.as_ref().expect("in-app link");
        assert_eq!(first.href, "/a");
        assert_eq!(first.target, None);

        let second = view.slides[1].link.as_ref().expect("new-context link");
        assert_eq!(second.href, "/b");
        assert_eq!(second.target.as_deref(), Some("_blank"));

        assert!(view.slides[2].link.is_none());
        assert_eq!(view.background_class, "section section--red");
    }

    #[test]
    fn example_items_label_second_indicator() {
        let block = CarouselBlockData {
            items: vec![item("A", "/a", "sameWindow"), item("B", "/b", "modal")],
            background_color: BackgroundColor::Default,
        };

        let view = carousel_view(&block, 0);
        assert_eq!(view.indicators[0].label, "Selected: A 1");
        assert_eq!(view.indicators[1].label, "B 2");
        assert!(!view.indicators[1].selected);
    }

    #[test]
    fn slide_images_use_fixed_aspect_ratio() {
        let view = slide(0, &item("A", "/a", "sameWindow"));
        assert_eq!((view.image.width, view.image.height), (1080, 388));
        assert_eq!(view.image.alt, "A");
        assert!(view.image.responsive);
    }
}
