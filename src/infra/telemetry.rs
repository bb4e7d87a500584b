//! Tracing subscriber bootstrap and the counters this binary reports.

use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const PAGES_RENDERED_TOTAL: &str = "vitrine_pages_rendered_total";
pub const CAROUSEL_UNKNOWN_OPEN_MODE_TOTAL: &str = "vitrine_carousel_unknown_open_mode_total";
pub const HTTP_OFFICE_PAGES_TOTAL: &str = "vitrine_http_office_pages_total";

const COUNTERS: [(&str, &str); 3] = [
    (
        PAGES_RENDERED_TOTAL,
        "Office pages written to disk by `vitrine build`.",
    ),
    (
        CAROUSEL_UNKNOWN_OPEN_MODE_TOTAL,
        "Carousel slides left without a link because their openIn value is unknown.",
    ),
    (
        HTTP_OFFICE_PAGES_TOTAL,
        "Office pages rendered on request by `vitrine serve`.",
    ),
];

static DESCRIBE: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` directives refine the configured level.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    DESCRIBE.call_once(|| {
        for (name, help) in COUNTERS {
            describe_counter!(name, Unit::Count, help);
        }
    });

    let filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default())
        .with(output_layer(logging.format))
        .try_init()
        .map_err(|err| InfraError::telemetry(format!("subscriber already installed: {err}")))
}

fn output_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    }
}
