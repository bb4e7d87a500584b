//! Authoring templates for the content blocks this site renders.

use serde_json::json;
use vitrine_content_types::{Field, FieldOption, FieldType, FieldUi, Template, TemplateUi};

use crate::domain::carousel::{BackgroundColor, OpenMode};

pub const CAROUSEL_TEMPLATE_NAME: &str = "Carousel";

pub fn carousel_block_schema() -> Template {
    let open_in_options = OpenMode::ALL
        .into_iter()
        .map(|mode| FieldOption::new(mode.label(), mode.as_str()))
        .collect();
    let background_options = BackgroundColor::ALL
        .into_iter()
        .map(|color| FieldOption::new(color.label(), color.as_str()))
        .collect();

    let item_fields = vec![
        Field::new(FieldType::String, "Label", "label"),
        Field::new(FieldType::String, "URL", "link"),
        Field::new(FieldType::String, "Open in", "openIn").with_options(open_in_options),
        Field::new(FieldType::Image, "Image", "imgSrc"),
    ];

    let items_ui = FieldUi {
        default_item: json!({
            "label": "Item description",
            "link": "/",
            "openIn": OpenMode::SameWindow.as_str(),
        }),
        item_label_field: "label".to_string(),
    };

    Template {
        name: CAROUSEL_TEMPLATE_NAME.to_string(),
        label: "Carousel".to_string(),
        ui: Some(TemplateUi {
            preview_src: "/blocks/hero.png".to_string(),
        }),
        fields: vec![
            Field::new(FieldType::Object, "Items", "items").list_of(item_fields, items_ui),
            Field::new(FieldType::String, "Background Color", "backgroundColor")
                .with_options(background_options),
        ],
    }
}
