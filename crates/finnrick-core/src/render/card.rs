use crate::error::WidgetError;
use crate::rating::record::RatingRecord;
use crate::render::assets::{ABOUT_RATINGS_URL, INFO_ICON_SVG, LOGO_SVG, badge_color};
use crate::render::markup::Element;

pub const LOADING_MESSAGE: &str = "Loading rating...";
pub const MISSING_PRODUCT_ID_MESSAGE: &str = "Product ID is required";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load rating";

/// Renders the rating card for `record`.
///
/// Every record field is inserted as escaped text; only static assets are
/// embedded verbatim.
pub fn render(record: &RatingRecord) -> Result<String, WidgetError> {
    let header = Element::new("div")
        .class("finnrick-widget-embed__header")
        .child(
            Element::new("span")
                .class("finnrick-widget-embed__title")
                .text("FINNRICK RATING\u{2122}"),
        )
        .child(
            Element::new("a")
                .class("finnrick-widget-embed__info-btn")
                .attr("href", ABOUT_RATINGS_URL)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .attr("aria-label", "About Finnrick ratings")
                .trusted(INFO_ICON_SVG),
        );

    let badge = Element::new("div")
        .class("finnrick-widget-embed__rating-badge")
        .attr(
            "style",
            format!("background-color: {}", badge_color(record.grade.letter())),
        )
        .child(
            Element::new("span")
                .class("finnrick-widget-embed__rating-letter")
                .text(record.grade.letter()),
        )
        .child(
            Element::new("span")
                .class("finnrick-widget-embed__rating-label")
                .text(record.label.as_str()),
        );

    let details = Element::new("div")
        .class("finnrick-widget-embed__details")
        .child(
            Element::new("h3")
                .class("finnrick-widget-embed__company")
                .text(record.company_name.as_str()),
        )
        .child(
            Element::new("p")
                .class("finnrick-widget-embed__product")
                .text(record.product_name.as_str()),
        )
        .child(
            Element::new("div")
                .class("finnrick-widget-embed__test-info")
                .child(Element::new("p").text(format!("Tested {} Samples", record.test_count)))
                .child(Element::new("p").text(format!("Last test {}", record.last_test_date))),
        );

    let footer = Element::new("div")
        .class("finnrick-widget-embed__footer")
        .child(
            Element::new("div")
                .class("finnrick-widget-embed__logo")
                .trusted(LOGO_SVG),
        )
        .child(
            Element::new("span")
                .class("finnrick-widget-embed__powered-by")
                .text("Verified by Finnrick"),
        );

    let card = Element::new("div").class("finnrick-widget-embed").child(
        Element::new("div")
            .class("finnrick-widget-embed__container")
            .child(header)
            .child(
                Element::new("div")
                    .class("finnrick-widget-embed__content")
                    .child(badge)
                    .child(details),
            )
            .child(footer),
    );

    Ok(card.to_html()?)
}

const LOADING_CLASS: &str = "finnrick-widget-embed finnrick-widget-embed--loading";
const ERROR_CLASS: &str = "finnrick-widget-embed finnrick-widget-embed--error";

pub fn render_loading() -> Result<String, WidgetError> {
    status_block(LOADING_CLASS, LOADING_MESSAGE)
}

pub fn render_missing_product_id() -> Result<String, WidgetError> {
    status_block(ERROR_CLASS, MISSING_PRODUCT_ID_MESSAGE)
}

pub fn render_load_failed() -> Result<String, WidgetError> {
    status_block(ERROR_CLASS, LOAD_FAILED_MESSAGE)
}

fn status_block(class: &'static str, message: &'static str) -> Result<String, WidgetError> {
    Ok(Element::new("div").class(class).text(message).to_html()?)
}
