pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod rating;
pub mod render;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{FetchError, WidgetError};
pub use rating::fetch::RatingFetcher;
pub use rating::record::RatingRecord;
pub use widget::api::FinnrickWidget;

/// Version string exposed on the widget entry point.
pub const WIDGET_VERSION: &str = "1.0.0";

/// Class that marks a host element as a widget container.
pub const MARKER_CLASS: &str = "finnrick-rating";

/// Attribute carrying the host-facing product identifier.
pub const PRODUCT_ID_ATTR: &str = "data-product-id";

/// Processed marker managed by the page scanner.
pub const PROCESSED_ATTR: &str = "data-initialized";

/// Mirrors the container's `WidgetState`.
pub const STATE_ATTR: &str = "data-widget-state";

/// Identifier of the shared `<style>` block.
pub const STYLE_ID: &str = "finnrick-widget-styles";
